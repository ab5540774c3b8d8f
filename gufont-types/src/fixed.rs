//! fixed-point numerical types

/// 16-bit signed fixed point number with 14 bits of fraction.
///
/// Used for the scale and skew entries of composite glyph transforms.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct F2Dot14(i16);

impl F2Dot14 {
    const ONE_BITS: i16 = 1 << 14;

    /// The value `0.0`.
    pub const ZERO: Self = Self(0);

    /// The value `1.0`.
    pub const ONE: Self = Self(Self::ONE_BITS);

    /// Creates a new value from its raw bit representation.
    pub const fn from_bits(bits: i16) -> Self {
        Self(bits)
    }

    /// Returns the raw bit representation.
    pub const fn to_bits(self) -> i16 {
        self.0
    }

    /// Creates a value from a float, rounding to the nearest representable value.
    pub fn from_f32(x: f32) -> Self {
        Self((x * Self::ONE_BITS as f32).round() as i16)
    }

    /// Returns the value as an `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE_BITS as f32
    }
}

impl std::fmt::Debug for F2Dot14 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

crate::newtype_scalar!(F2Dot14, [u8; 2]);
