//! Recoverable problems found while decoding.
//!
//! An [`Anomaly`] never stops a decode: the affected entry is skipped (or, for
//! an integrity check, the value is kept) and the anomaly is stored alongside
//! the result so that callers can report it.

use types::{NameId, Tag};

use crate::{tables::name::DecodeTextError, ReadError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Anomaly {
    /// The file does not start with a known SFNT or collection signature.
    ///
    /// Contains the first four bytes, if the file is at least that long.
    #[error("unrecognized container signature {}", display_opt_tag(.0))]
    UnrecognizedContainer(Option<Tag>),
    /// A collection header ends before the last of its font offsets.
    ///
    /// Only the fonts whose offsets are present are read.
    #[error("collection declares {num_fonts} fonts, but only {readable} offsets are present")]
    TruncatedCollection { num_fonts: u32, readable: u32 },
    /// A `name` entry could not be decoded with the codec for its encoding.
    #[error(
        "name record ({platform_id}, {encoding_id}, 0x{language_id:04X}, {name_id}) skipped: {error}"
    )]
    MalformedText {
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
        name_id: NameId,
        error: DecodeTextError,
    },
    /// A LangSys referenced a feature index past the end of the FeatureList.
    #[error(
        "script '{script}'{} references feature {index}, but only {feature_count} features exist",
        display_lang_sys(.lang_sys)
    )]
    UnresolvedFeatureIndex {
        script: Tag,
        /// `None` for the default LangSys.
        lang_sys: Option<Tag>,
        index: u16,
        feature_count: u16,
    },
    /// The `head` magic number did not match the expected constant.
    #[error("head magic number is 0x{found:08X}, expected 0x{:08X}", types::HEAD_MAGIC_NUMBER)]
    IntegrityMismatch { found: u32 },
    /// The LookupList of a `GSUB` or `GPOS` table could not be read.
    ///
    /// The script and feature lists are unaffected; the lookup list is left
    /// empty.
    #[error("'{table}' LookupList skipped: {error}")]
    UnreadableLookupList { table: Tag, error: ReadError },
}

fn display_lang_sys(tag: &Option<Tag>) -> String {
    tag.map(|tag| format!(" language '{tag}'"))
        .unwrap_or_default()
}

fn display_opt_tag(tag: &Option<Tag>) -> String {
    match tag {
        Some(tag) => format!("'{tag}'"),
        None => "(file too short)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_messages() {
        let unresolved = Anomaly::UnresolvedFeatureIndex {
            script: Tag::new(b"latn"),
            lang_sys: Some(Tag::new(b"TRK ")),
            index: 9,
            feature_count: 3,
        };
        assert_eq!(
            unresolved.to_string(),
            "script 'latn' language 'TRK ' references feature 9, but only 3 features exist"
        );
        assert_eq!(
            Anomaly::UnrecognizedContainer(None).to_string(),
            "unrecognized container signature (file too short)"
        );
        assert_eq!(
            Anomaly::IntegrityMismatch { found: 0xDEADBEEF }.to_string(),
            "head magic number is 0xDEADBEEF, expected 0x5F0F3CF5"
        );
        assert_eq!(
            Anomaly::TruncatedCollection {
                num_fonts: 2,
                readable: 1
            }
            .to_string(),
            "collection declares 2 fonts, but only 1 offsets are present"
        );
        assert_eq!(
            Anomaly::UnreadableLookupList {
                table: Tag::new(b"GSUB"),
                error: ReadError::OutOfBounds,
            }
            .to_string(),
            "'GSUB' LookupList skipped: An offset was out of bounds"
        );
    }
}
