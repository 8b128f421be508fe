//! the [vhea (Vertical Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea) table

use types::Tag;

/// 'vhea'
pub const TAG: Tag = Tag::new(b"vhea");
