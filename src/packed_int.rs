// Fixed-width integer abstraction shared by both codecs.
//
// The coders operate on the eight 1/2/4/8-byte integer types. Values move
// through a common `i64` key space: narrower types widen exactly, 8-byte
// types pass through bit-for-bit (so `u64` wraps through `i64` on both the
// encode and decode side and round-trips unchanged).

/// A fixed-width integer the coders can pack and unpack.
pub trait PackedInt: Copy + Eq + std::fmt::Debug {
    /// Element width in bytes (1, 2, 4, or 8).
    const WIDTH: usize;

    /// The value's zero-extended raw bit pattern.
    fn to_raw(self) -> u64;

    /// Rebuild a value from the low `WIDTH` bytes of a raw bit pattern.
    fn from_raw(raw: u64) -> Self;

    /// Widen into the `i64` codeword key space.
    fn to_key(self) -> i64;

    /// Narrow a key back into this type; `None` when the value is out of
    /// range. Always succeeds for 8-byte types (bit-cast).
    fn from_key(key: i64) -> Option<Self>;
}

macro_rules! impl_packed_int {
    ($t:ty, $unsigned:ty) => {
        impl PackedInt for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();

            #[inline]
            fn to_raw(self) -> u64 {
                self as $unsigned as u64
            }

            #[inline]
            fn from_raw(raw: u64) -> Self {
                raw as $unsigned as $t
            }

            #[inline]
            fn to_key(self) -> i64 {
                self as i64
            }

            #[inline]
            fn from_key(key: i64) -> Option<Self> {
                if Self::WIDTH == 8 {
                    Some(key as $t)
                } else {
                    Self::try_from(key).ok()
                }
            }
        }
    };
}

impl_packed_int!(u8, u8);
impl_packed_int!(i8, u8);
impl_packed_int!(u16, u16);
impl_packed_int!(i16, u16);
impl_packed_int!(u32, u32);
impl_packed_int!(i32, u32);
impl_packed_int!(u64, u64);
impl_packed_int!(i64, u64);
