//! Scalar types used by the [SFNT] container and the tables it carries.
//!
//! Everything in an SFNT file is stored big-endian. The [`Scalar`] trait
//! describes how a type is converted to and from its raw byte
//! representation, and [`BigEndian`] wraps those raw bytes so that
//! fixed-size records can be viewed in place.
//!
//! [SFNT]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff

#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixed;
mod fword;
mod longdatetime;
mod name_id;
mod offset;
mod raw;
mod tag;
mod version;

pub use fixed::Fixed;
pub use fword::{FWord, UfWord};
pub use longdatetime::LongDateTime;
pub use name_id::NameId;
pub use offset::{Offset16, Offset32};
pub use raw::{BigEndian, FixedSize, Scalar};
pub use tag::{InvalidTag, Tag};
pub use version::MajorMinor;

/// The header tag for a font collection file.
pub const TTC_HEADER_TAG: Tag = Tag::new(b"ttcf");

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The SFNT version for fonts containing CFF outlines.
pub const CFF_SFNT_VERSION: u32 = 0x4F54544F;
/// The signature of a font collection, as a big-endian `u32`.
pub const TTC_SIGNATURE: u32 = 0x74746366;

/// The value expected in the `magicNumber` field of the `head` table.
pub const HEAD_MAGIC_NUMBER: u32 = 0x5F0F3CF5;
