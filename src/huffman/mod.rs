// Table-driven variable-length coding for nanopore integer sequences.
//
// # Modules
//
// - `codeword`: codeword map parsing, the escape key, prefix-trie lookup
// - `coder`: the encode/decode state machine (reset/delta blocks)
// - `registry`: the seven shipped maps, lazily parsed once per process

pub mod coder;
pub mod codeword;
pub mod registry;

// Re-export key types for convenience.
pub use coder::HuffmanCoder;
pub use codeword::{Codeword, CodewordMap, Key, MAX_CODEWORD_BITS};
pub use registry::{coder, map_names};
