// Fixed-width bit packer.
//
// Packs each value's low `num_bits` bits back-to-back, LSB-first, with the
// final partial byte zero-padded. No table, no resynchronization: the
// parameter record's `size` and `num_bits` fully determine the geometry,
// and decode refuses blobs whose length disagrees with it.

use log::trace;

use crate::bits::{BitReader, BitWriter};
use crate::error::Error;
use crate::packed_int::PackedInt;
use crate::params::{BIT_PACKER, CodeParams, NUM_BITS, PACKER, SIZE};

/// Pack `values` at `num_bits` bits each (clamped to 1..=element width).
pub fn encode<T: PackedInt>(values: &[T], num_bits: u32) -> (Vec<u8>, CodeParams) {
    let num_bits = num_bits.clamp(1, (T::WIDTH * 8) as u32);
    let mut w = BitWriter::new();
    for v in values {
        w.push_wide(v.to_raw(), num_bits);
    }
    let bytes = w.finish();

    let mut params = CodeParams::new();
    params.insert(PACKER, BIT_PACKER);
    params.insert(NUM_BITS, num_bits);
    params.insert(SIZE, values.len());

    trace!(
        "bitpack encode: num_bits={} n={} -> {} bytes",
        num_bits,
        values.len(),
        bytes.len()
    );
    (bytes, params)
}

/// Unpack exactly `size` values of `num_bits` bits each, as declared by the
/// parameter record.
pub fn decode<T: PackedInt>(bytes: &[u8], params: &CodeParams) -> Result<Vec<T>, Error> {
    let found = params.get(PACKER).unwrap_or("");
    if found != BIT_PACKER {
        return Err(Error::DecodeIdentityMismatch {
            key: PACKER,
            expected: BIT_PACKER.to_string(),
            found: found.to_string(),
        });
    }
    let num_bits: u32 = params.parse_required(NUM_BITS)?;
    let width_bits = (T::WIDTH * 8) as u32;
    if num_bits == 0 || num_bits > width_bits {
        return Err(Error::BadParameter {
            key: NUM_BITS.to_string(),
            reason: format!("{num_bits} outside 1..={width_bits}"),
        });
    }
    let size: usize = params.parse_required(SIZE)?;

    let total_bits = (size as u64)
        .checked_mul(u64::from(num_bits))
        .ok_or_else(|| Error::BadParameter {
            key: SIZE.to_string(),
            reason: "size * num_bits overflows".to_string(),
        })?;
    let expected = usize::try_from(total_bits.div_ceil(8)).map_err(|_| Error::BadParameter {
        key: SIZE.to_string(),
        reason: "declared stream too large".to_string(),
    })?;
    if bytes.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let mut r = BitReader::new(bytes);
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        let raw = r.take_wide(num_bits)?;
        out.push(T::from_raw(raw));
    }

    trace!(
        "bitpack decode: num_bits={num_bits} {} bytes -> n={size}",
        bytes.len()
    );
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
