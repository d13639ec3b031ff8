use proptest::prelude::*;

use fast5_pack::huffman;
use fast5_pack::{bitpack, PackedInt};

fn map_name() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(huffman::map_names())
}

fn roundtrip<T: PackedInt>(name: &str, values: &[T], diff: bool) -> Result<(), TestCaseError> {
    let coder = huffman::coder(name).unwrap();
    let (bytes, params) = coder.encode(values, diff);
    let decoded: Vec<T> = coder
        .decode(&bytes, &params)
        .map_err(|e| TestCaseError::fail(format!("decode failed: {e}")))?;
    prop_assert_eq!(decoded, values);
    Ok(())
}

proptest! {
    #[test]
    fn prop_huffman_roundtrip_i16(
        values in proptest::collection::vec(any::<i16>(), 0..1024),
        name in map_name(),
        diff in any::<bool>()
    ) {
        roundtrip(name, &values, diff)?;
    }

    #[test]
    fn prop_huffman_roundtrip_u8(
        values in proptest::collection::vec(any::<u8>(), 0..1024),
        name in map_name(),
        diff in any::<bool>()
    ) {
        roundtrip(name, &values, diff)?;
    }

    #[test]
    fn prop_huffman_roundtrip_i64(
        values in proptest::collection::vec(any::<i64>(), 0..512),
        name in map_name(),
        diff in any::<bool>()
    ) {
        roundtrip(name, &values, diff)?;
    }

    #[test]
    fn prop_huffman_roundtrip_u64(
        values in proptest::collection::vec(any::<u64>(), 0..512),
        name in map_name(),
        diff in any::<bool>()
    ) {
        roundtrip(name, &values, diff)?;
    }

    // Small deltas stay on the coded path; this is the intended workload.
    #[test]
    fn prop_huffman_roundtrip_smooth_signal(
        start in -500i32..500,
        steps in proptest::collection::vec(-8i32..=8, 0..1024),
        diff in any::<bool>()
    ) {
        let mut level = start;
        let values: Vec<i32> = steps
            .iter()
            .map(|&d| {
                level += d;
                level
            })
            .collect();
        roundtrip("fast5_rw_1", &values, diff)?;
    }

    #[test]
    fn prop_bitpack_roundtrip_u32(
        values in proptest::collection::vec(any::<u32>(), 0..1024),
        num_bits in 1u32..=32
    ) {
        let (bytes, params) = bitpack::encode(&values, num_bits);
        prop_assert_eq!(
            bytes.len() as u64,
            (values.len() as u64 * u64::from(num_bits)).div_ceil(8)
        );
        let decoded: Vec<u32> = bitpack::decode(&bytes, &params).unwrap();
        let mask = if num_bits == 32 { u32::MAX } else { (1u32 << num_bits) - 1 };
        let expected: Vec<u32> = values.iter().map(|&v| v & mask).collect();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn prop_bitpack_roundtrip_u64_wide(
        values in proptest::collection::vec(any::<u64>(), 0..256),
        num_bits in 33u32..=64
    ) {
        let (bytes, params) = bitpack::encode(&values, num_bits);
        let decoded: Vec<u64> = bitpack::decode(&bytes, &params).unwrap();
        let mask = if num_bits == 64 { u64::MAX } else { (1u64 << num_bits) - 1 };
        let expected: Vec<u64> = values.iter().map(|&v| v & mask).collect();
        prop_assert_eq!(decoded, expected);
    }

    // Arbitrary bytes with a syntactically valid parameter record must
    // either decode or fail cleanly; panics are bugs.
    #[test]
    fn prop_huffman_decode_never_panics(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        name in map_name(),
        diff in any::<bool>()
    ) {
        let coder = huffman::coder(name).unwrap();
        let (_, mut params) = coder.encode::<i16>(&[], diff);
        params.insert("size", bytes.len());
        let _ = coder.decode::<i16>(&bytes, &params);
    }
}
