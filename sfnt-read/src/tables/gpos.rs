//! the [GPOS] table
//!
//! [GPOS]: https://docs.microsoft.com/en-us/typography/opentype/spec/gpos

use types::Tag;

/// 'GPOS'
pub const TAG: Tag = Tag::new(b"GPOS");

/// The glyph positioning table.
pub type Gpos = super::layout::Layout;
