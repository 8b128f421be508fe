use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A four-byte table, script, language or feature identifier.
///
/// Tags found in a file are not validated: a directory may legitimately
/// carry bytes outside the printable ASCII range, and these still need to be
/// listed and compared. [`Tag::new_checked`] validates tags built from user
/// input, such as command line filters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::AnyBitPattern))]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes, without validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Attempt to create a `Tag` from between 1 and 4 printable ascii bytes.
    ///
    /// Short input is padded with spaces. Leading spaces, and non-space bytes
    /// following a space, are rejected.
    pub const fn new_checked(src: &[u8]) -> Result<Self, InvalidTag> {
        if src.is_empty() || src.len() > 4 {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        let mut raw = [b' '; 4];
        let mut seen_space = false;
        let mut i = 0;
        while i < src.len() {
            let byte = src[i];
            match byte {
                0x20 if i == 0 => return Err(InvalidTag::InvalidByte { pos: i, byte }),
                0x20 => seen_space = true,
                0..=0x1F | 0x7F.. => return Err(InvalidTag::InvalidByte { pos: i, byte }),
                _ if seen_space => return Err(InvalidTag::ByteAfterSpace { pos: i }),
                _ => (),
            }
            raw[i] = byte;
            i += 1;
        }
        Ok(Tag(raw))
    }

    /// Construct a `Tag` from a big-endian `u32`, such as a container signature.
    pub const fn from_u32(src: u32) -> Self {
        Self(src.to_be_bytes())
    }

    /// Create a tag from raw big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The tag as a big-endian `u32`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Return the memory representation of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// `true` if every byte is in the printable ascii range.
    pub fn is_printable(self) -> bool {
        self.0.iter().all(|b| (0x20..=0x7E).contains(b))
    }
}

/// An error representing an invalid tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// The tag was not between 1 and 4 bytes in length.
    InvalidLength(usize),
    /// The tag contained a byte outside of `0x20..=0x7E`, or began with a space.
    InvalidByte { pos: usize, byte: u8 },
    /// The tag contained one or more non-space characters after a space.
    ByteAfterSpace { pos: usize },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::new_checked(src.as_bytes())
    }
}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(raw)
    }
}

impl std::error::Error for InvalidTag {}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "Invalid byte 0x{byte:X} at index {pos}")
            }
            InvalidTag::InvalidLength(len) => write!(f, "Invalid length ({len})"),
            InvalidTag::ByteAfterSpace { .. } => write!(f, "Non-space character after first space"),
        }
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl Default for Tag {
    fn default() -> Self {
        Tag([b' '; 4])
    }
}

// human-readable formats get the escaped `Display` form, so any four bytes
// serialize.
#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serde::Serialize::serialize(&self.0, serializer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_construction() {
        assert!(Tag::new_checked(b"").is_err());
        assert!(Tag::new_checked(b" ").is_err());
        assert!(Tag::new_checked(b"abcde").is_err());
        assert!(Tag::new_checked(b"b c").is_err());
        assert_eq!(Tag::new_checked(b"cv"), Ok(Tag::new(b"cv  ")));
        assert_eq!("GSUB".parse::<Tag>(), Ok(Tag::new(b"GSUB")));
        assert!(Tag::new_checked(&[0x7F]).is_err());
    }

    #[test]
    fn signatures() {
        assert_eq!(Tag::from_u32(0x4F54544F), Tag::new(b"OTTO"));
        assert_eq!(Tag::new(b"ttcf").to_u32(), crate::TTC_SIGNATURE);
    }

    #[test]
    fn display_escapes_unprintable() {
        let bad_tag = Tag::new(&[0x00, b'z', b'@', 0x7F]);
        assert!(!bad_tag.is_printable());
        assert_eq!(bad_tag.to_string(), "{0x00}z@{0x7F}");
        assert_eq!(format!("{:?}", Tag::new(b"name")), "Tag(name)");
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serialize_any_bytes() {
        assert_eq!(
            serde_json::to_value(Tag::new(b"liga")).unwrap(),
            serde_json::json!("liga")
        );
        let bad_tag = Tag::new(&[0xFF, b'a', b'b', b'c']);
        assert_eq!(
            serde_json::to_value(bad_tag).unwrap(),
            serde_json::json!("{0xFF}abc")
        );
    }
}
