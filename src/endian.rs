//! Byte order used by every multi-byte codec of a buffer.

/// Byte order of multi-byte integers and floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

macro_rules! codec {
    ($decode:ident, $encode:ident, $ty:ty, $width:literal) => {
        /// Decodes a value from its fixed-width byte representation.
        #[inline]
        pub fn $decode(self, bytes: [u8; $width]) -> $ty {
            match self {
                Endianness::Little => <$ty>::from_le_bytes(bytes),
                Endianness::Big => <$ty>::from_be_bytes(bytes),
            }
        }

        /// Encodes a value into its fixed-width byte representation.
        #[inline]
        pub fn $encode(self, value: $ty) -> [u8; $width] {
            match self {
                Endianness::Little => value.to_le_bytes(),
                Endianness::Big => value.to_be_bytes(),
            }
        }
    };
}

impl Endianness {
    codec!(decode_u16, encode_u16, u16, 2);
    codec!(decode_u32, encode_u32, u32, 4);
    codec!(decode_u64, encode_u64, u64, 8);
    codec!(decode_f32, encode_f32, f32, 4);
    codec!(decode_f64, encode_f64, f64, 8);
}
