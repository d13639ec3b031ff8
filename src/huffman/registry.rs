// Process-wide codeword table registry.
//
// The seven shipped maps are embedded as table text and parsed exactly once
// on first use behind a `LazyLock`; afterwards the registry is immutable
// and lookups need no synchronization. Map names and codeword assignments
// are a compatibility contract: changing either breaks decoding of
// previously encoded data.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;

use crate::error::Error;

use super::coder::HuffmanCoder;
use super::codeword::CodewordMap;

/// The shipped tables, one per nanopore data channel:
/// raw-signal deltas, event-detection skip/length counts, basecall letters,
/// quality values, and basecall-event skip/move codes.
const BUILTIN_TABLES: [(&str, &str); 7] = [
    ("fast5_rw_1", include_str!("tables/cwmap.fast5_rw_1.txt")),
    (
        "fast5_ed_skip_1",
        include_str!("tables/cwmap.fast5_ed_skip_1.txt"),
    ),
    (
        "fast5_ed_len_1",
        include_str!("tables/cwmap.fast5_ed_len_1.txt"),
    ),
    (
        "fast5_fq_bp_1",
        include_str!("tables/cwmap.fast5_fq_bp_1.txt"),
    ),
    (
        "fast5_fq_qv_1",
        include_str!("tables/cwmap.fast5_fq_qv_1.txt"),
    ),
    (
        "fast5_ev_skip_1",
        include_str!("tables/cwmap.fast5_ev_skip_1.txt"),
    ),
    (
        "fast5_ev_move_1",
        include_str!("tables/cwmap.fast5_ev_move_1.txt"),
    ),
];

static REGISTRY: LazyLock<HashMap<&'static str, HuffmanCoder>> = LazyLock::new(|| {
    let mut registry = HashMap::with_capacity(BUILTIN_TABLES.len());
    for (name, text) in BUILTIN_TABLES {
        // The embedded tables are compile-time constants; a parse failure
        // is a packaging bug caught by `builtin_maps_load`.
        let map = CodewordMap::parse(name, text)
            .unwrap_or_else(|e| panic!("embedded codeword map {name}: {e}"));
        registry.insert(name, HuffmanCoder::new(map));
    }
    debug!(
        "codeword table registry initialized with {} maps",
        registry.len()
    );
    registry
});

/// Look up the shared coder for a shipped codeword map.
pub fn coder(name: &str) -> Result<&'static HuffmanCoder, Error> {
    REGISTRY
        .get(name)
        .ok_or_else(|| Error::UnknownCodewordMap(name.to_string()))
}

/// Names of all shipped maps, sorted.
pub fn map_names() -> Vec<&'static str> {
    let mut names: Vec<_> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_maps_load() {
        // Forcing the registry validates every embedded table: parse,
        // escape presence, 57-bit limit, prefix-freeness.
        assert_eq!(
            map_names(),
            vec![
                "fast5_ed_len_1",
                "fast5_ed_skip_1",
                "fast5_ev_move_1",
                "fast5_ev_skip_1",
                "fast5_fq_bp_1",
                "fast5_fq_qv_1",
                "fast5_rw_1",
            ]
        );
    }

    #[test]
    fn unknown_map_is_reported() {
        let err = coder("fast5_rw_99").unwrap_err();
        assert!(matches!(err, Error::UnknownCodewordMap(name) if name == "fast5_rw_99"));
    }

    #[test]
    fn lookups_share_one_instance() {
        let a = coder("fast5_rw_1").unwrap();
        let b = coder("fast5_rw_1").unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn every_builtin_map_roundtrips() {
        for name in map_names() {
            let coder = coder(name).unwrap();
            let input: Vec<i32> = vec![77, 78, 78, 76, 90, 4000, 4001, -2, 0];
            for diff in [false, true] {
                let (bytes, params) = coder.encode(&input, diff);
                let decoded: Vec<i32> = coder.decode(&bytes, &params).unwrap();
                assert_eq!(decoded, input, "map={name} diff={diff}");
            }
        }
    }

    #[test]
    fn basecall_letters_code_compactly() {
        // fq_bp assigns short codewords to the four bases.
        let coder = coder("fast5_fq_bp_1").unwrap();
        let read: Vec<u8> = b"ACGTACGTTTGGCCAA".to_vec();
        let (bytes, params) = coder.encode(&read, false);
        // 1 raw byte + ~2 bits per remaining base + final escape.
        assert!(bytes.len() < read.len());
        let decoded: Vec<u8> = coder.decode(&bytes, &params).unwrap();
        assert_eq!(decoded, read);
    }
}
