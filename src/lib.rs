//! fast5-pack: self-describing codecs for nanopore signal, event, and
//! basecall integer sequences.
//!
//! The crate provides:
//! - A table-driven variable-length coder with delta encoding (`huffman`)
//! - A fixed-width bit packer (`bitpack`)
//! - The LSB-first bit buffer both codecs are built on (`bits`)
//!
//! Every encode call returns the encoded bytes together with a
//! [`CodeParams`] record carrying everything a later, independent decode
//! call needs: coder identity, codeword map name, element count. The caller
//! persists both through its container layer and hands them back verbatim.
//!
//! # Quick Start
//!
//! ```
//! use fast5_pack::huffman;
//!
//! // Raw signal samples, delta-coded against the shipped rw table.
//! let samples: Vec<i16> = vec![486, 485, 485, 488, 512, 486];
//! let coder = huffman::coder("fast5_rw_1").unwrap();
//! let (bytes, params) = coder.encode(&samples, true);
//! let decoded: Vec<i16> = coder.decode(&bytes, &params).unwrap();
//! assert_eq!(decoded, samples);
//! ```

pub mod bitpack;
pub mod bits;
pub mod error;
pub mod huffman;
pub mod packed_int;
pub mod params;

pub use error::Error;
pub use packed_int::PackedInt;
pub use params::CodeParams;
