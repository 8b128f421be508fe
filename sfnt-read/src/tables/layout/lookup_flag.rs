//! The lookup flag type.
//!
//! This is kind-of-but-not-quite-exactly a bit enumeration, and so we implement
//! it manually.

/// The [LookupFlag](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#lookupFlag) bit enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LookupFlag(u16);

impl LookupFlag {
    /// This bit relates only to the correct processing of GPOS type 3 (cursive attachment) lookups
    pub const RIGHT_TO_LEFT: Self = LookupFlag(0x0001);
    /// If set, skips over base glyphs
    pub const IGNORE_BASE_GLYPHS: Self = LookupFlag(0x002);
    /// If set, skips over ligatures
    pub const IGNORE_LIGATURES: Self = LookupFlag(0x004);
    /// If set, skips over all combining marks
    pub const IGNORE_MARKS: Self = LookupFlag(0x008);
    /// If set, indicates that the lookup table structure is followed by a MarkFilteringSet field.
    pub const USE_MARK_FILTERING_SET: Self = LookupFlag(0x010);

    // union of all flags, above
    const FLAG_MASK: Self = LookupFlag(0x1F);

    const NAMES: [(LookupFlag, &'static str); 5] = [
        (Self::RIGHT_TO_LEFT, "RIGHT_TO_LEFT"),
        (Self::IGNORE_BASE_GLYPHS, "IGNORE_BASE_GLYPHS"),
        (Self::IGNORE_LIGATURES, "IGNORE_LIGATURES"),
        (Self::IGNORE_MARKS, "IGNORE_MARKS"),
        (Self::USE_MARK_FILTERING_SET, "USE_MARK_FILTERING_SET"),
    ];

    /// Construct a LookupFlag from a raw value.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw transmutation to u16.
    pub fn to_bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if all of the flags in `other` are contained within `self`.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        // only count flag bits
        let other = other.0 & Self::FLAG_MASK.0;
        (self.0 & other) == other
    }

    /// If not zero, skips over all marks of attachment type different from specified.
    pub fn mark_attachment_class(self) -> Option<u16> {
        let val = self.0 & 0xff00;
        if val == 0 {
            None
        } else {
            Some(val >> 8)
        }
    }
}

impl std::fmt::Display for LookupFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if let Some(class) = self.mark_attachment_class() {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "MARK_ATTACHMENT_CLASS({class})")?;
            first = false;
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl types::Scalar for LookupFlag {
    type Raw = <u16 as types::Scalar>::Raw;
    fn to_raw(self) -> Self::Raw {
        self.0.to_raw()
    }
    fn from_raw(raw: Self::Raw) -> Self {
        let t = <u16>::from_raw(raw);
        Self(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        let flag = LookupFlag::from_bits(0x0308);
        assert!(flag.contains(LookupFlag::IGNORE_MARKS));
        assert!(!flag.contains(LookupFlag::USE_MARK_FILTERING_SET));
        assert_eq!(flag.mark_attachment_class(), Some(3));
        assert_eq!(flag.to_string(), "IGNORE_MARKS | MARK_ATTACHMENT_CLASS(3)");
        assert_eq!(LookupFlag::default().to_string(), "0");
    }
}
