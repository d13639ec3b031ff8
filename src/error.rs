// Crate-wide error type.
//
// Every failure is terminal for the enclosing encode/decode call: the codec
// is a pure transform with nothing to re-fetch or retry. Each variant carries
// the map name, parameter key, or expected/actual pair a caller needs to
// diagnose which stored field is corrupt or incompatible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Requested codeword map is not present in the registry.
    #[error("unknown codeword map: {0}")]
    UnknownCodewordMap(String),

    /// A codeword table entry failed to load: codeword longer than 57 bits,
    /// non-binary codeword characters, an unparsable or duplicate value
    /// token, or a missing/duplicated escape entry.
    #[error("invalid codeword in map {map} (`{value} {codeword}`): {reason}")]
    InvalidCodeword {
        map: String,
        value: String,
        codeword: String,
        reason: String,
    },

    /// Two codewords overlap: one is a bit prefix of the other, so the map
    /// is not uniquely decodable.
    #[error("overlapping codewords in map {map}: `{first}` is a prefix of `{second}`")]
    OverlappingCodeword {
        map: String,
        first: String,
        second: String,
    },

    /// The parameter record was produced by a different coder, format
    /// version, or codeword map than the one decoding it.
    #[error("decode identity mismatch on `{key}`: expected `{expected}`, found `{found}`")]
    DecodeIdentityMismatch {
        key: &'static str,
        expected: String,
        found: String,
    },

    /// No codeword matches the next bits of the stream. The stream is
    /// corrupt or was encoded with an incompatible map.
    #[error("codeword not found in map {map} at bit offset {bit_offset}")]
    CodewordNotFound { map: String, bit_offset: u64 },

    /// A decoded value does not fit the target integer type.
    #[error("overflow: decoded value {value} does not fit a {width}-byte target")]
    Overflow { value: i64, width: usize },

    /// Bit-packed blob length is inconsistent with the declared size and
    /// bits-per-value.
    #[error("size mismatch: expected {expected} encoded bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The stream ended in the middle of a block.
    #[error("truncated stream: needed {needed} bits, {available} available")]
    TruncatedStream { needed: u32, available: u32 },

    /// A parameter record entry is missing or unparsable.
    #[error("bad parameter `{key}`: {reason}")]
    BadParameter { key: String, reason: String },
}
