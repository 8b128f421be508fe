//! Name Identifiers
//!
//! Although these are treated as u16s in the format, we choose to represent
//! them as a distinct type.

use core::fmt;

/// Identifier for an informational string in the `name` table.
///
/// IDs 0 to 25 are predefined; 26 to 255 are reserved, and 256 to 32767 are
/// font-specific (for instance, names referenced by layout features).
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(transparent)]
pub struct NameId(u16);

impl NameId {
    pub const COPYRIGHT_NOTICE: Self = Self(0);
    pub const FAMILY_NAME: Self = Self(1);
    pub const SUBFAMILY_NAME: Self = Self(2);
    pub const UNIQUE_ID: Self = Self(3);
    pub const FULL_NAME: Self = Self(4);
    pub const VERSION_STRING: Self = Self(5);
    pub const POSTSCRIPT_NAME: Self = Self(6);
    pub const TRADEMARK: Self = Self(7);
    pub const MANUFACTURER: Self = Self(8);
    pub const DESIGNER: Self = Self(9);
    pub const DESCRIPTION: Self = Self(10);
    pub const VENDOR_URL: Self = Self(11);
    pub const DESIGNER_URL: Self = Self(12);
    pub const LICENSE_DESCRIPTION: Self = Self(13);
    pub const LICENSE_URL: Self = Self(14);
    pub const TYPOGRAPHIC_FAMILY_NAME: Self = Self(16);
    pub const TYPOGRAPHIC_SUBFAMILY_NAME: Self = Self(17);
    pub const COMPATIBLE_FULL_NAME: Self = Self(18);
    pub const SAMPLE_TEXT: Self = Self(19);
    pub const POSTSCRIPT_CID_NAME: Self = Self(20);
    pub const WWS_FAMILY_NAME: Self = Self(21);
    pub const WWS_SUBFAMILY_NAME: Self = Self(22);
    pub const LIGHT_BACKGROUND_PALETTE: Self = Self(23);
    pub const DARK_BACKGROUND_PALETTE: Self = Self(24);
    pub const VARIATIONS_POSTSCRIPT_NAME_PREFIX: Self = Self(25);

    /// Create a new identifier from a raw u16 value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Return the identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// A short human readable description for predefined identifiers.
    pub fn label(self) -> Option<&'static str> {
        Some(match self {
            Self::COPYRIGHT_NOTICE => "Copyright",
            Self::FAMILY_NAME => "Family",
            Self::SUBFAMILY_NAME => "Subfamily",
            Self::UNIQUE_ID => "Unique ID",
            Self::FULL_NAME => "Full name",
            Self::VERSION_STRING => "Version",
            Self::POSTSCRIPT_NAME => "PostScript name",
            Self::TRADEMARK => "Trademark",
            Self::MANUFACTURER => "Manufacturer",
            Self::DESIGNER => "Designer",
            Self::DESCRIPTION => "Description",
            Self::VENDOR_URL => "Vendor URL",
            Self::DESIGNER_URL => "Designer URL",
            Self::LICENSE_DESCRIPTION => "License",
            Self::LICENSE_URL => "License URL",
            Self::TYPOGRAPHIC_FAMILY_NAME => "Typographic family",
            Self::TYPOGRAPHIC_SUBFAMILY_NAME => "Typographic subfamily",
            Self::COMPATIBLE_FULL_NAME => "Compatible full name",
            Self::SAMPLE_TEXT => "Sample text",
            Self::POSTSCRIPT_CID_NAME => "PostScript CID findfont name",
            Self::WWS_FAMILY_NAME => "WWS family",
            Self::WWS_SUBFAMILY_NAME => "WWS subfamily",
            Self::LIGHT_BACKGROUND_PALETTE => "Light background palette",
            Self::DARK_BACKGROUND_PALETTE => "Dark background palette",
            Self::VARIATIONS_POSTSCRIPT_NAME_PREFIX => "Variations PostScript name prefix",
            _ => return None,
        })
    }
}

impl From<u16> for NameId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Debug for NameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NameId({})", self.0)
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({label})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

crate::newtype_scalar!(NameId, [u8; 2]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(NameId::FAMILY_NAME.to_string(), "1 (Family)");
        assert_eq!(NameId::new(15).label(), None);
        assert_eq!(NameId::new(256).to_string(), "256");
    }
}
