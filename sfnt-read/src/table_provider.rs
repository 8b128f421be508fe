//! a trait for things that can serve font tables

use types::Tag;

use crate::{tables, DecodeError, FontData, FontRead};

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    /// Returns the bytes of the table with the given tag.
    ///
    /// This is [`DecodeError::TableIsMissing`] if the font has no such table,
    /// and [`DecodeError::Read`] if its record points outside the file.
    fn data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, DecodeError>;

    fn head(&self) -> Result<tables::head::Head, DecodeError> {
        self.data_for_tag(tables::head::TAG).and_then(|data| {
            tables::head::Head::read(data).map_err(DecodeError::read(tables::head::TAG))
        })
    }

    fn name(&self) -> Result<tables::name::Name, DecodeError> {
        self.data_for_tag(tables::name::TAG).and_then(|data| {
            tables::name::Name::read(data).map_err(DecodeError::read(tables::name::TAG))
        })
    }

    fn hhea(&self) -> Result<tables::hvhea::HVhea, DecodeError> {
        self.data_for_tag(tables::hhea::TAG).and_then(|data| {
            tables::hvhea::HVhea::read(data, tables::hvhea::Axis::Horizontal)
                .map_err(DecodeError::read(tables::hhea::TAG))
        })
    }

    fn vhea(&self) -> Result<tables::hvhea::HVhea, DecodeError> {
        self.data_for_tag(tables::vhea::TAG).and_then(|data| {
            tables::hvhea::HVhea::read(data, tables::hvhea::Axis::Vertical)
                .map_err(DecodeError::read(tables::vhea::TAG))
        })
    }

    #[cfg(feature = "layout")]
    fn gsub(&self) -> Result<tables::gsub::Gsub, DecodeError> {
        self.data_for_tag(tables::gsub::TAG).and_then(|data| {
            tables::layout::Layout::read(data, tables::gsub::TAG)
                .map_err(DecodeError::read(tables::gsub::TAG))
        })
    }

    #[cfg(feature = "layout")]
    fn gpos(&self) -> Result<tables::gpos::Gpos, DecodeError> {
        self.data_for_tag(tables::gpos::TAG).and_then(|data| {
            tables::layout::Layout::read(data, tables::gpos::TAG)
                .map_err(DecodeError::read(tables::gpos::TAG))
        })
    }
}
