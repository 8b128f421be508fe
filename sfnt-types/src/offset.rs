//! Offsets to tables

macro_rules! impl_offset {
    ($name:ident, $bits:literal, $rawty:ty) => {
        #[doc = concat!("A ", stringify!($bits), "-bit offset to a table.")]
        ///
        /// Specific offset fields may or may not permit NULL values; however we
        /// assume that errors are possible, and expect the caller to handle
        /// the `None` case.
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $name($rawty);

        impl $name {
            /// Create a new offset.
            pub const fn new(raw: $rawty) -> Self {
                Self(raw)
            }

            /// Return `true` if this offset is null.
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }

            /// Returns this offset as a `usize`, or `None` if it is null.
            pub const fn non_null(self) -> Option<usize> {
                match self.0 {
                    0 => None,
                    other => Some(other as usize),
                }
            }

            /// Returns this offset as a `usize`, treating null as `0`.
            pub const fn to_usize(self) -> usize {
                self.0 as usize
            }
        }

        crate::newtype_scalar!($name, <$rawty as crate::raw::Scalar>::Raw);
    };
}

impl_offset!(Offset16, 16, u16);
impl_offset!(Offset32, 32, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_offsets() {
        assert_eq!(Offset16::new(0).non_null(), None);
        assert!(Offset32::default().is_null());
        assert_eq!(Offset16::new(40).non_null(), Some(40));
        assert_eq!(Offset32::new(0).to_usize(), 0);
    }
}
