// LSB-first bit buffer primitives shared by the Huffman coder and the bit
// packer.
//
// The wire format is a flat bit sequence packed into bytes least-significant
// bit first: the first bit of the stream is bit 0 of byte 0. Both sides keep
// a 64-bit accumulator; the writer flushes complete bytes before appending,
// the reader refills whenever 56 or fewer bits are buffered and input bytes
// remain, so a full refill always holds at least 57 bits, enough for the
// longest admissible codeword.

use crate::error::Error;

/// Longest single `push`/`take` unit, bounded by the refill guarantee.
pub const MAX_UNIT_BITS: u32 = 57;

#[inline]
fn low_mask(n: u32) -> u64 {
    debug_assert!(n <= 64);
    if n == 0 { 0 } else { u64::MAX >> (64 - n) }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Accumulates bits LSB-first into a byte vector.
#[derive(Debug, Default)]
pub struct BitWriter {
    out: Vec<u8>,
    buf: u64,
    len: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn flush_bytes(&mut self) {
        while self.len >= 8 {
            self.out.push(self.buf as u8);
            self.buf >>= 8;
            self.len -= 8;
        }
    }

    /// Append the low `n` bits of `bits`, first bit = LSB. `n <= 57`.
    #[inline]
    pub fn push(&mut self, bits: u64, n: u32) {
        debug_assert!(n <= MAX_UNIT_BITS);
        self.flush_bytes();
        // After the flush fewer than 8 bits are pending, so n + len <= 64.
        self.buf |= (bits & low_mask(n)) << self.len;
        self.len += n;
    }

    /// Append up to 64 bits, splitting wide values into two units.
    #[inline]
    pub fn push_wide(&mut self, bits: u64, n: u32) {
        debug_assert!(n <= 64);
        if n <= 32 {
            self.push(bits, n);
        } else {
            self.push(bits, 32);
            self.push(bits >> 32, n - 32);
        }
    }

    /// Zero-pad the pending bits up to the next byte boundary.
    #[inline]
    pub fn align(&mut self) {
        // Bits above `len` are always zero, so extending the length pads
        // with zeros.
        self.len = self.len.div_ceil(8) * 8;
    }

    /// Append `width` raw little-endian bytes. The writer must be at a byte
    /// boundary (possibly with complete bytes still pending).
    pub fn push_raw_le(&mut self, raw: u64, width: usize) {
        self.flush_bytes();
        debug_assert_eq!(self.len, 0, "raw bytes require byte alignment");
        for j in 0..width {
            self.out.push((raw >> (8 * j)) as u8);
        }
    }

    /// Flush remaining bits, zero-padding a final partial byte.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush_bytes();
        if self.len > 0 {
            self.out.push(self.buf as u8);
        }
        self.out
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Consumes bits LSB-first from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    buf: u64,
    len: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            buf: 0,
            len: 0,
        }
    }

    #[inline]
    fn fill(&mut self) {
        while self.len <= 56 && self.pos < self.data.len() {
            self.buf |= u64::from(self.data[self.pos]) << self.len;
            self.len += 8;
            self.pos += 1;
        }
    }

    /// True when no input bytes and no buffered bits remain.
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.pos >= self.data.len() && self.len == 0
    }

    /// Refill, then expose the buffered window for prefix matching. The
    /// window holds at least 57 bits unless the stream is nearly exhausted.
    #[inline]
    pub fn window(&mut self) -> (u64, u32) {
        self.fill();
        (self.buf, self.len)
    }

    /// Consume `n <= 57` bits, returned LSB-first.
    #[inline]
    pub fn take(&mut self, n: u32) -> Result<u64, Error> {
        debug_assert!(n <= MAX_UNIT_BITS);
        self.fill();
        if self.len < n {
            return Err(Error::TruncatedStream {
                needed: n,
                available: self.len,
            });
        }
        let bits = self.buf & low_mask(n);
        self.buf >>= n;
        self.len -= n;
        Ok(bits)
    }

    /// Consume up to 64 bits, splitting wide reads into two units.
    #[inline]
    pub fn take_wide(&mut self, n: u32) -> Result<u64, Error> {
        debug_assert!(n <= 64);
        if n <= 32 {
            self.take(n)
        } else {
            let lo = self.take(32)?;
            let hi = self.take(n - 32)?;
            Ok(lo | (hi << 32))
        }
    }

    /// Discard buffered bits up to the next byte boundary.
    #[inline]
    pub fn align(&mut self) {
        let rem = self.len % 8;
        self.buf >>= rem;
        self.len -= rem;
    }

    /// Absolute bit offset consumed so far, for error context.
    #[inline]
    pub fn bit_position(&self) -> u64 {
        self.pos as u64 * 8 - u64::from(self.len)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_is_lsb_first() {
        let mut w = BitWriter::new();
        w.push(0b1, 1);
        w.push(0b0, 1);
        w.push(0b11, 2);
        assert_eq!(w.finish(), vec![0b0000_1101]);
    }

    #[test]
    fn align_pads_with_zeros() {
        let mut w = BitWriter::new();
        w.push(0b1, 1);
        w.align();
        w.push(0xFF, 8);
        assert_eq!(w.finish(), vec![0x01, 0xFF]);
    }

    #[test]
    fn align_at_boundary_is_noop() {
        let mut w = BitWriter::new();
        w.push(0xAB, 8);
        w.align();
        w.push(0b1, 1);
        assert_eq!(w.finish(), vec![0xAB, 0x01]);
    }

    #[test]
    fn raw_bytes_are_little_endian() {
        let mut w = BitWriter::new();
        w.push_raw_le(0x0201, 2);
        assert_eq!(w.finish(), vec![0x01, 0x02]);
    }

    #[test]
    fn push_masks_high_bits() {
        let mut w = BitWriter::new();
        w.push(0xFF, 3);
        assert_eq!(w.finish(), vec![0b0000_0111]);
    }

    #[test]
    fn reader_roundtrip() {
        let mut w = BitWriter::new();
        w.push(0b101, 3);
        w.push(0x5A, 8);
        w.push(0x1FFFF, 17);
        let bytes = w.finish();

        let mut r = BitReader::new(&bytes);
        assert_eq!(r.take(3).unwrap(), 0b101);
        assert_eq!(r.take(8).unwrap(), 0x5A);
        assert_eq!(r.take(17).unwrap(), 0x1FFFF);
    }

    #[test]
    fn wide_roundtrip_full_64_bits() {
        let v = u64::MAX - 12345;
        let mut w = BitWriter::new();
        w.push_wide(v, 64);
        let bytes = w.finish();
        assert_eq!(bytes.len(), 8);

        let mut r = BitReader::new(&bytes);
        assert_eq!(r.take_wide(64).unwrap(), v);
        assert!(r.is_drained());
    }

    #[test]
    fn take_past_end_is_truncated() {
        let mut r = BitReader::new(&[0xFF]);
        let err = r.take(9).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedStream {
                needed: 9,
                available: 8
            }
        ));
    }

    #[test]
    fn reader_align_discards_partial_byte() {
        let mut r = BitReader::new(&[0b0000_0111, 0xAA]);
        assert_eq!(r.take(2).unwrap(), 0b11);
        r.align();
        assert_eq!(r.take(8).unwrap(), 0xAA);
        assert!(r.is_drained());
    }

    #[test]
    fn bit_position_tracks_consumption() {
        let mut r = BitReader::new(&[0x00, 0x00, 0x00]);
        assert_eq!(r.bit_position(), 0);
        r.take(3).unwrap();
        assert_eq!(r.bit_position(), 3);
        r.align();
        assert_eq!(r.bit_position(), 8);
        r.take(16).unwrap();
        assert_eq!(r.bit_position(), 24);
        assert!(r.is_drained());
    }

    #[test]
    fn window_exposes_refilled_buffer() {
        let data = [0xFF; 16];
        let mut r = BitReader::new(&data);
        let (_, len) = r.window();
        assert!(len >= MAX_UNIT_BITS);
        r.take(57).unwrap();
        let (_, len) = r.window();
        assert!(len >= MAX_UNIT_BITS);
    }
}
