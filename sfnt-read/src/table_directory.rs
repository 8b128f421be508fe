//! The [table directory] of a single font.
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

use std::ops::Range;

use types::{BigEndian, Tag};

use crate::{font_data::FontData, FontRead, ReadError};

/// An entry in a table directory, read in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::AnyBitPattern)]
#[repr(C)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: BigEndian<Tag>,
    /// Checksum for the table.
    pub checksum: BigEndian<u32>,
    /// Offset from the beginning of the file.
    pub offset: BigEndian<u32>,
    /// Length of the table.
    pub length: BigEndian<u32>,
}

impl TableRecord {
    /// Table identifier.
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    /// Checksum for the table.
    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    /// Offset from the beginning of the file.
    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    /// Length of the table.
    pub fn length(&self) -> u32 {
        self.length.get()
    }

    /// The byte range of the table in the file, or `None` if it would
    /// overflow.
    pub fn data_range(&self) -> Option<Range<usize>> {
        let start = self.offset() as usize;
        let end = start.checked_add(self.length() as usize)?;
        Some(start..end)
    }
}

impl std::fmt::Debug for TableRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRecord")
            .field("tag", &self.tag())
            .field("checksum", &format_args!("0x{:08X}", self.checksum()))
            .field("offset", &self.offset())
            .field("length", &self.length())
            .finish()
    }
}

/// The table directory for an OpenType font.
#[derive(Clone, Copy)]
pub struct TableDirectory<'a> {
    pub sfnt_version: u32,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    table_records: &'a [TableRecord],
}

impl<'a> TableDirectory<'a> {
    /// The number of bytes before the first record.
    pub const HEADER_LEN: usize = 12;

    /// Table records, in the order they appear in the directory.
    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_records
    }

    pub fn num_tables(&self) -> u16 {
        self.table_records.len() as u16
    }
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }
}

impl std::fmt::Debug for TableDirectory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableDirectory")
            .field("sfnt_version", &format_args!("0x{:08X}", self.sfnt_version))
            .field("search_range", &self.search_range)
            .field("entry_selector", &self.entry_selector)
            .field("range_shift", &self.range_shift)
            .field("table_records", &self.table_records)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::be_buffer;
    use types::TT_SFNT_VERSION;

    #[test]
    fn records_keep_directory_order() {
        let buf = be_buffer! {
            TT_SFNT_VERSION, 3u16, 32u16, 1u16, 16u16,
            (Tag::new(b"name")), 0xAABBCCDDu32, 60u32, 10u32,
            (Tag::new(b"head")), 1u32, 70u32, 54u32,
            (Tag::new(b"name")), 2u32, 124u32, 0u32
        };
        let directory = TableDirectory::read(buf.font_data()).unwrap();
        assert_eq!(directory.num_tables(), 3);
        assert_eq!(directory.search_range, 32);
        let tags: Vec<_> = directory.table_records().iter().map(|r| r.tag()).collect();
        assert_eq!(tags, [Tag::new(b"name"), Tag::new(b"head"), Tag::new(b"name")]);
        assert_eq!(directory.table_records()[0].checksum(), 0xAABBCCDD);
        assert_eq!(directory.table_records()[1].data_range(), Some(70..124));
    }

    #[test]
    fn truncated_records() {
        let buf = be_buffer! {
            TT_SFNT_VERSION, 2u16, 0u16, 0u16, 0u16,
            (Tag::new(b"head")), 0u32, 44u32, 54u32
        };
        assert!(matches!(
            TableDirectory::read(buf.font_data()),
            Err(ReadError::OutOfBounds)
        ));
    }
}
