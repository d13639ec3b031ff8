// Table-driven variable-length encode/decode with optional delta coding.
//
// The stream is a run of self-resynchronizing blocks: one uncompressed
// absolute value, zero or more coded deltas, then a byte-aligned escape
// marker. Aligning at every escape bounds how far a corrupt codeword can
// propagate and keeps every absolute value at a byte boundary.

use log::trace;

use crate::bits::{BitReader, BitWriter};
use crate::error::Error;
use crate::packed_int::PackedInt;
use crate::params::{
    AVG_BITS, CODE_DIFF, CODEWORD_MAP_NAME, CodeParams, FORMAT_VERSION, HUFFMAN_FORMAT_VERSION,
    HUFFMAN_PACKER, PACKER, SIZE,
};

use super::codeword::{CodewordMap, Key};

/// Stateless coder over one codeword map. Shared freely across threads;
/// encode and decode hold no mutable state.
#[derive(Debug)]
pub struct HuffmanCoder {
    map: CodewordMap,
}

impl HuffmanCoder {
    pub fn new(map: CodewordMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &CodewordMap {
        &self.map
    }

    pub fn name(&self) -> &str {
        self.map.name()
    }

    fn identity(&self) -> CodeParams {
        let mut params = CodeParams::new();
        params.insert(PACKER, HUFFMAN_PACKER);
        params.insert(FORMAT_VERSION, HUFFMAN_FORMAT_VERSION);
        params.insert(CODEWORD_MAP_NAME, self.map.name());
        params
    }

    fn check_identity(&self, params: &CodeParams) -> Result<(), Error> {
        let expectations: [(&'static str, &str); 3] = [
            (PACKER, HUFFMAN_PACKER),
            (FORMAT_VERSION, HUFFMAN_FORMAT_VERSION),
            (CODEWORD_MAP_NAME, self.map.name()),
        ];
        for (key, expected) in expectations {
            let found = params.get(key).unwrap_or("");
            if found != expected {
                return Err(Error::DecodeIdentityMismatch {
                    key,
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Encode a sequence of fixed-width integers.
    ///
    /// With `code_diff` each element is coded as its difference from the
    /// previous element (wrapping in the `i64` key space); otherwise
    /// elements are coded by value. Values without a registered codeword
    /// fall back to the escape/reset path and are emitted uncompressed, so
    /// encoding never fails.
    pub fn encode<T: PackedInt>(&self, values: &[T], code_diff: bool) -> (Vec<u8>, CodeParams) {
        let mut w = BitWriter::new();
        let mut last: i64 = 0;
        let mut i = 0usize;
        let mut reset = true;
        loop {
            if reset {
                if i == values.len() {
                    break;
                }
                // Absolute value, raw little-endian, byte-aligned.
                w.push_raw_le(values[i].to_raw(), T::WIDTH);
                last = values[i].to_key();
                i += 1;
                reset = false;
            } else {
                let cw = if i < values.len() {
                    let val = values[i].to_key();
                    let x = if code_diff { val.wrapping_sub(last) } else { val };
                    self.map.literal(x)
                } else {
                    None
                };
                match cw {
                    Some(cw) => {
                        w.push(cw.bits, cw.len);
                        last = values[i].to_key();
                        i += 1;
                    }
                    None => {
                        // Unmapped key or end of input: escape, realign,
                        // restart from an absolute value. The element is
                        // not consumed.
                        let esc = self.map.escape();
                        w.push(esc.bits, esc.len);
                        w.align();
                        reset = true;
                    }
                }
            }
        }
        let bytes = w.finish();

        let mut params = self.identity();
        params.insert(CODE_DIFF, if code_diff { "1" } else { "0" });
        params.insert(SIZE, values.len());
        let avg_bits = if values.is_empty() {
            0.0
        } else {
            bytes.len() as f64 * 8.0 / values.len() as f64
        };
        params.insert(AVG_BITS, format!("{avg_bits:.2}"));

        trace!(
            "huffman encode: map={} width={} diff={} n={} -> {} bytes",
            self.map.name(),
            T::WIDTH,
            code_diff,
            values.len(),
            bytes.len()
        );
        (bytes, params)
    }

    /// Decode a stream produced by [`encode`](Self::encode).
    ///
    /// The parameter record's identity (`packer`, `format_version`,
    /// `codeword_map_name`) must match this coder exactly.
    pub fn decode<T: PackedInt>(&self, bytes: &[u8], params: &CodeParams) -> Result<Vec<T>, Error> {
        self.check_identity(params)?;
        let code_diff = params.require_flag(CODE_DIFF)?;

        // `size` is a hint here; a stream cannot decode to more elements
        // than it has bits, so cap the preallocation accordingly.
        let size_hint = params
            .get(SIZE)
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(0)
            .min(bytes.len().saturating_mul(8));
        let mut out: Vec<T> = Vec::with_capacity(size_hint);

        let mut r = BitReader::new(bytes);
        let mut last: i64 = 0;
        let mut reset = true;
        while !r.is_drained() {
            if reset {
                let raw = r.take_wide((T::WIDTH * 8) as u32)?;
                let v = T::from_raw(raw);
                out.push(v);
                last = v.to_key();
                reset = false;
            } else {
                let (window, window_len) = r.window();
                let cw = self.map.match_prefix(window, window_len).ok_or_else(|| {
                    Error::CodewordNotFound {
                        map: self.map.name().to_string(),
                        bit_offset: r.bit_position(),
                    }
                })?;
                let (key, len) = (cw.key, cw.len);
                r.take(len)?;
                match key {
                    Key::Escape => {
                        // Realign: the encoder zero-padded to the byte
                        // boundary after every escape.
                        r.align();
                        reset = true;
                    }
                    Key::Literal(k) => {
                        let x = if code_diff { k.wrapping_add(last) } else { k };
                        let v = T::from_key(x).ok_or(Error::Overflow {
                            value: x,
                            width: T::WIDTH,
                        })?;
                        out.push(v);
                        last = x;
                    }
                }
            }
        }

        trace!(
            "huffman decode: map={} width={} diff={} {} bytes -> n={}",
            self.map.name(),
            T::WIDTH,
            code_diff,
            bytes.len(),
            out.len()
        );
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
