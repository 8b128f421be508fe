//! Traits for interpreting font data

use types::Tag;

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all tables that are self-describing: that
/// is, tables that do not require any external state in order to interpret
/// their underlying bytes. (Tables that require external state implement
/// [`FontReadWithArgs`] instead)
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// Any length or offset found in the data is checked against the bounds of
    /// `data` before it is followed.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for a type that needs additional arguments to be read.
pub trait ReadArgs {
    type Args: Copy;
}

/// A trait for types that require external data in order to be constructed.
///
/// Any type that requires external arguments also has a custom `read`
/// constructor where you can pass those arguments like normal.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    /// read an item, using the provided args.
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

// a blanket impl of ReadArgs/FontReadWithArgs for general FontRead types.
impl<'a, T: FontRead<'a>> ReadArgs for T {
    type Args = ();
}

impl<'a, T: FontRead<'a>> FontReadWithArgs<'a> for T {
    fn read_with_args(data: FontData<'a>, _: &Self::Args) -> Result<Self, ReadError> {
        Self::read(data)
    }
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum ReadError {
    #[error("An offset was out of bounds")]
    OutOfBounds,
    #[error("Invalid index {0} for font collection")]
    InvalidCollectionIndex(u32),
    #[error("Specified array length not a multiple of item size")]
    InvalidArrayLen,
    #[error("Malformed data: '{0}'")]
    MalformedData(&'static str),
}

/// An error produced when decoding a single table of a font.
///
/// Only the table named by the error is affected; other tables in the same
/// font, and other fonts in the same file, decode independently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("no decoder available for '{0}'")]
    NoDecoder(Tag),
    #[error("the '{0}' table is missing")]
    TableIsMissing(Tag),
    #[error("failed to decode '{tag}': {error}")]
    Read {
        tag: Tag,
        #[source]
        error: ReadError,
    },
}

impl DecodeError {
    /// The tag of the table this error belongs to.
    pub fn tag(&self) -> Tag {
        match self {
            DecodeError::NoDecoder(tag)
            | DecodeError::TableIsMissing(tag)
            | DecodeError::Read { tag, .. } => *tag,
        }
    }

    /// The underlying read error, if decoding was attempted.
    pub fn read_error(&self) -> Option<&ReadError> {
        match self {
            DecodeError::Read { error, .. } => Some(error),
            _ => None,
        }
    }

    pub(crate) fn read(tag: Tag) -> impl FnOnce(ReadError) -> DecodeError {
        move |error| DecodeError::Read { tag, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let tag = Tag::new(b"name");
        let err = DecodeError::read(tag)(ReadError::OutOfBounds);
        assert_eq!(err.tag(), tag);
        assert_eq!(err.read_error(), Some(&ReadError::OutOfBounds));
        assert_eq!(
            err.to_string(),
            "failed to decode 'name': An offset was out of bounds"
        );
        assert_eq!(
            DecodeError::NoDecoder(Tag::new(b"glyf")).to_string(),
            "no decoder available for 'glyf'"
        );
    }
}
