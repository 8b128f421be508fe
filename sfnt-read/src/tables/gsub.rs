//! the [GSUB] table
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub

use types::Tag;

/// 'GSUB'
pub const TAG: Tag = Tag::new(b"GSUB");

/// The glyph substitution table.
pub type Gsub = super::layout::Layout;
