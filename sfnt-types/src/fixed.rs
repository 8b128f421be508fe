//! fixed-point numerical types

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// Used for `fontRevision` in the `head` table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fixed(i32);

impl Fixed {
    /// Minimum value.
    pub const MIN: Self = Self(i32::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i32::MAX);

    /// One.
    pub const ONE: Self = Self(1 << Self::FRACT_BITS);

    const INT_MASK: i32 = !0 << Self::FRACT_BITS;
    const FRACT_BITS: u32 = 16;

    /// Creates a new fixed point value from the underlying bit representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the underlying bit representation of the value.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a fixed point value from a f64.
    ///
    /// This operation is lossy; the float will be rounded to the nearest
    /// representable value.
    pub fn from_f64(x: f64) -> Self {
        Self((x * Self::ONE.0 as f64).round() as i32)
    }

    /// Returns the value as an f64.
    ///
    /// This operation is lossless: all representable values can be
    /// round-tripped.
    pub fn to_f64(self) -> f64 {
        let int = ((self.0 & Self::INT_MASK) >> Self::FRACT_BITS) as f64;
        let fract = (self.0 & !Self::INT_MASK) as f64 / Self::ONE.0 as f64;
        int + fract
    }
}

crate::newtype_scalar!(Fixed, [u8; 4]);

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn fixed_floats() {
        assert_eq!(Fixed(0x7fff_0000), Fixed::from_f64(32767.));
        assert_eq!(Fixed(0x0001_0000), Fixed::from_f64(1.0));
        assert_eq!(Fixed(0x0002_8000), Fixed::from_f64(2.5));
        assert_eq!(Fixed(-0x0001_8000), Fixed::from_f64(-1.5));
        assert_eq!(Fixed::from_f64(-1.5).to_f64(), -1.5);
    }

    #[test]
    fn raw_bytes() {
        let rev = Fixed::from_raw([0x00, 0x02, 0xCC, 0xCD]);
        assert_eq!(rev.to_bits(), 0x0002_CCCD);
        assert_eq!(rev.to_raw(), [0x00, 0x02, 0xCC, 0xCD]);
    }
}
