//! the [hhea (Horizontal Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table
//!
//! The table is decoded by [`HVhea`](super::hvhea::HVhea) with
//! [`Axis::Horizontal`](super::hvhea::Axis::Horizontal).

use types::Tag;

/// 'hhea'
pub const TAG: Tag = Tag::new(b"hhea");
