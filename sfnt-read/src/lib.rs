//! Reading SFNT font files
//!
//! This crate decodes the container structure of OpenType/TrueType fonts and
//! TrueType collections, and a small set of the tables they carry: `head`,
//! `name`, `hhea`, `vhea`, and (with the `layout` feature) the script,
//! feature and lookup lists of `GSUB` and `GPOS`.
//!
//! Parsing happens in two stages. [`FontFile::new`] inspects the signature
//! and reads the [table directory] of every font in the file. Individual
//! tables are then decoded on demand, either through the typed accessors of
//! [`TableProvider`] or by tag with [`FontDirectory::decode`].
//!
//! Decoded tables are plain owned values and do not borrow the file data.
//! Problems that do not prevent decoding (an undecodable name string, a
//! feature index that points nowhere, a bad magic number) are reported as
//! [`Anomaly`] values next to the decoded data.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use sfnt_read::{FontFile, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let file = FontFile::new(&font_bytes);
//! for font in file.fonts().iter().flatten() {
//!     let head = font.head().expect("missing or malformed 'head' table");
//!     println!("{} units per em", head.units_per_em);
//! }
//! ```
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod anomaly;
pub mod collection;
mod font_data;
mod read;
pub mod registry;
mod table_directory;
mod table_provider;
pub mod tables;
pub mod traversal;

#[cfg(test)]
#[path = "tests/test_helpers.rs"]
mod test_helpers;

pub use anomaly::Anomaly;
pub use collection::{directory_offsets, CollectionHeader, ContainerKind};
pub use font_data::FontData;
pub use read::{DecodeError, FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use registry::AnyTable;
pub use table_directory::{TableDirectory, TableRecord};
pub use table_provider::TableProvider;

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;

use types::Tag;

/// A font or font collection file.
///
/// Every font in the file is read when this is constructed. A font whose
/// table directory cannot be read is kept as an error, without affecting
/// the other fonts.
#[derive(Clone, Debug)]
pub struct FontFile<'a> {
    data: FontData<'a>,
    kind: ContainerKind,
    fonts: Vec<Result<FontDirectory<'a>, ReadError>>,
    anomalies: Vec<Anomaly>,
}

impl<'a> FontFile<'a> {
    /// Reads the container structure of `data`.
    ///
    /// This never fails. An unrecognized signature gives no fonts and an
    /// [`Anomaly::UnrecognizedContainer`]; a collection header that ends
    /// early gives the fonts whose offsets are present and an
    /// [`Anomaly::TruncatedCollection`].
    pub fn new(data: &'a [u8]) -> Self {
        let data = FontData::new(data);
        let kind = ContainerKind::detect(data);
        let anomaly = match &kind {
            ContainerKind::Unrecognized(signature) => {
                Some(Anomaly::UnrecognizedContainer(*signature))
            }
            ContainerKind::Collection(header) if header.is_truncated() => {
                Some(Anomaly::TruncatedCollection {
                    num_fonts: header.num_fonts,
                    readable: header.offsets.len() as u32,
                })
            }
            _ => None,
        };
        if let Some(anomaly) = &anomaly {
            log::warn!("{anomaly}");
        }
        let anomalies = anomaly.into_iter().collect();
        let is_collection = kind.is_collection();
        let fonts = kind
            .directory_offsets()
            .iter()
            .enumerate()
            .map(|(index, offset)| {
                let ttc_index = is_collection.then_some(index as u32);
                let font = FontDirectory::read(data, *offset, ttc_index);
                if let Err(error) = &font {
                    log::warn!("font {index} at offset {offset} is unreadable: {error}");
                }
                font
            })
            .collect();
        FontFile {
            data,
            kind,
            fonts,
            anomalies,
        }
    }

    /// Returns the underlying file data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    /// One entry per font, in the order the file lists them.
    pub fn fonts(&self) -> &[Result<FontDirectory<'a>, ReadError>] {
        &self.fonts
    }

    /// The number of fonts, including unreadable ones.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Returns the font at `index`.
    pub fn get(&self, index: u32) -> Result<&FontDirectory<'a>, ReadError> {
        match self.fonts.get(index as usize) {
            Some(Ok(font)) => Ok(font),
            Some(Err(error)) => Err(error.clone()),
            None => Err(ReadError::InvalidCollectionIndex(index)),
        }
    }

    /// Problems with the file as a whole.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }
}

/// A single font: its table directory, and the file it is stored in.
#[derive(Clone, Copy, Debug)]
pub struct FontDirectory<'a> {
    data: FontData<'a>,
    table_directory: TableDirectory<'a>,
    ttc_index: Option<u32>,
}

impl<'a> FontDirectory<'a> {
    fn read(data: FontData<'a>, offset: u32, ttc_index: Option<u32>) -> Result<Self, ReadError> {
        let table_directory = data
            .split_off(offset as usize)
            .ok_or(ReadError::OutOfBounds)
            .and_then(TableDirectory::read)?;
        log::debug!(
            "table directory at {offset}: version 0x{:08X}, {} tables",
            table_directory.sfnt_version,
            table_directory.num_tables()
        );
        Ok(FontDirectory {
            data,
            table_directory,
            ttc_index,
        })
    }

    /// Returns the underlying font data.
    ///
    /// For collections this is the entire file, since table offsets are
    /// relative to its start.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// If the font is in a TrueType collection (ttc) file, returns the index
    /// of the font in that collection.
    pub fn ttc_index(&self) -> Option<u32> {
        self.ttc_index
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// Table records, in directory order. Duplicate tags are kept.
    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_directory.table_records()
    }

    /// Returns the first record with the given tag.
    pub fn table_record(&self, tag: Tag) -> Option<&'a TableRecord> {
        self.table_records().iter().find(|record| record.tag() == tag)
    }

    /// Returns the bytes described by `record`.
    pub fn record_data(&self, record: &TableRecord) -> Result<FontData<'a>, ReadError> {
        record
            .data_range()
            .and_then(|range| self.data.slice(range))
            .ok_or(ReadError::OutOfBounds)
    }

    /// Returns the data for the first table with the specified tag.
    pub fn table_data(&self, tag: Tag) -> Result<FontData<'a>, DecodeError> {
        let record = self
            .table_record(tag)
            .ok_or(DecodeError::TableIsMissing(tag))?;
        self.record_data(record).map_err(DecodeError::read(tag))
    }

    /// Decodes the first table with the given tag.
    pub fn decode(&self, tag: Tag) -> Result<AnyTable, DecodeError> {
        let decode = registry::decoder_for(tag).ok_or(DecodeError::NoDecoder(tag))?;
        let data = self.table_data(tag)?;
        decode(data).map_err(DecodeError::read(tag))
    }

    /// Decodes the table described by `record`.
    ///
    /// Unlike [`decode`](Self::decode), this reaches every occurrence of a
    /// duplicated tag.
    pub fn decode_record(&self, record: &TableRecord) -> Result<AnyTable, DecodeError> {
        let tag = record.tag();
        let decode = registry::decoder_for(tag).ok_or(DecodeError::NoDecoder(tag))?;
        self.record_data(record)
            .and_then(decode)
            .map_err(DecodeError::read(tag))
    }

    /// Decodes every table in the directory, in order.
    pub fn decode_all(
        &self,
    ) -> impl Iterator<Item = (&'a TableRecord, Result<AnyTable, DecodeError>)> + '_ {
        self.table_records()
            .iter()
            .map(|record| (record, self.decode_record(record)))
    }
}

impl<'a> TableProvider<'a> for FontDirectory<'a> {
    fn data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, DecodeError> {
        self.table_data(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        be_buffer,
        tables::{head, name::NameId},
        test_helpers::{utf16_be, BeBuffer},
    };
    use pretty_assertions::assert_eq;
    use types::{HEAD_MAGIC_NUMBER, TTC_HEADER_TAG, TT_SFNT_VERSION};

    fn make_head() -> BeBuffer {
        BeBuffer::new()
            .extend([1u16, 0, 1, 0]) // version, revision
            .extend([0u32, HEAD_MAGIC_NUMBER])
            .extend([0u16, 1000])
            .extend([0u64, 0])
            .extend([-20i16, -250, 980, 900])
            .extend([0u16, 8])
            .extend([2i16, 0, 0])
    }

    fn make_name() -> BeBuffer {
        let string = utf16_be("Test Font");
        be_buffer!(0u16, 1u16, 18u16, 3u16, 1u16, 0x409u16, 1u16, (string.len() as u16), 0u16)
            .extend_bytes(&string)
            .pad_to(40)
    }

    // a directory with 'head' at 44 and 'name' at 98
    fn make_font() -> BeBuffer {
        be_buffer!(
            TT_SFNT_VERSION, 2u16, 32u16, 1u16, 0u16,
            (Tag::new(b"head")), 0u32, 44u32, 54u32,
            (Tag::new(b"name")), 0u32, 98u32, 40u32
        )
        .extend_bytes(&make_head())
        .extend_bytes(&make_name())
    }

    #[test]
    fn two_table_font() {
        let buf = make_font();
        let file = FontFile::new(&buf);
        assert_eq!(file.kind(), &ContainerKind::Font { sfnt_version: TT_SFNT_VERSION });
        assert_eq!(file.len(), 1);
        let font = file.get(0).unwrap();
        assert_eq!(font.ttc_index(), None);

        let tags: Vec<_> = font.table_records().iter().map(TableRecord::tag).collect();
        assert_eq!(tags, [Tag::new(b"head"), Tag::new(b"name")]);
        assert_eq!(font.table_records()[1].offset(), 98);

        let name = font.name().unwrap();
        assert_eq!(name.entries.len(), 1);
        assert_eq!(name.entries[0].name_id, NameId::FAMILY_NAME);
        assert_eq!(name.entries[0].string, "Test Font");
        assert_eq!(font.head().unwrap().y_max, 900);
        assert!(file.anomalies().is_empty());
    }

    #[test]
    fn missing_and_undecodable_tables() {
        let buf = make_font();
        let file = FontFile::new(&buf);
        let font = file.get(0).unwrap();
        assert_eq!(
            font.hhea(),
            Err(DecodeError::TableIsMissing(Tag::new(b"hhea")))
        );
        assert_eq!(
            font.decode(Tag::new(b"glyf")),
            Err(DecodeError::NoDecoder(Tag::new(b"glyf")))
        );
        let decoded: Vec<_> = font
            .decode_all()
            .map(|(record, table)| (record.tag(), table.map(|table| table.tag())))
            .collect();
        assert_eq!(
            decoded,
            [
                (head::TAG, Ok(head::TAG)),
                (Tag::new(b"name"), Ok(Tag::new(b"name")))
            ]
        );
    }

    #[test]
    fn table_past_end_of_file() {
        let buf = be_buffer! {
            TT_SFNT_VERSION, 1u16, 16u16, 0u16, 0u16,
            (Tag::new(b"head")), 0u32, 28u32, 54u32
        };
        let file = FontFile::new(&buf);
        let font = file.get(0).unwrap();
        assert_eq!(
            font.head(),
            Err(DecodeError::Read {
                tag: head::TAG,
                error: ReadError::OutOfBounds
            })
        );
    }

    #[test]
    fn collection_with_unreadable_font() {
        let _ = env_logger::builder().is_test(true).try_init();
        let buf = be_buffer! {
            TTC_HEADER_TAG, 1u16, 0u16, 2u32, [28u32, 5000],
            0u32, 0u32,
            TT_SFNT_VERSION, 0u16, 0u16, 0u16, 0u16
        };
        assert_eq!(buf.len(), 40);
        let file = FontFile::new(&buf);
        assert!(file.kind().is_collection());
        assert_eq!(file.len(), 2);
        let font = file.get(0).unwrap();
        assert_eq!(font.ttc_index(), Some(0));
        assert_eq!(font.table_directory().num_tables(), 0);
        assert_eq!(file.get(1).err(), Some(ReadError::OutOfBounds));
        assert_eq!(file.get(2).err(), Some(ReadError::InvalidCollectionIndex(2)));
    }

    #[test]
    fn truncated_collection_keeps_what_is_present() {
        let buf = be_buffer! { TTC_HEADER_TAG, 1u16, 0u16, 2u32, 16u32 };
        let file = FontFile::new(&buf);
        assert!(file.kind().is_collection());
        assert_eq!(file.len(), 1);
        assert_eq!(file.get(0).err(), Some(ReadError::OutOfBounds));
        assert_eq!(file.get(1).err(), Some(ReadError::InvalidCollectionIndex(1)));
        assert_eq!(
            file.anomalies(),
            [Anomaly::TruncatedCollection {
                num_fonts: 2,
                readable: 1
            }]
        );

        // too short for numFonts
        let file = FontFile::new(b"ttcf\0\x01");
        assert!(file.is_empty());
        assert_eq!(
            file.anomalies(),
            [Anomaly::UnrecognizedContainer(Some(TTC_HEADER_TAG))]
        );
    }

    #[test]
    fn unrecognized_signature() {
        let buf = be_buffer! { 0xDEADBEEFu32, 0u32 };
        let file = FontFile::new(&buf);
        assert!(file.is_empty());
        assert_eq!(
            file.anomalies(),
            [Anomaly::UnrecognizedContainer(Some(Tag::from_u32(0xDEADBEEF)))]
        );

        let file = FontFile::new(&[0, 1]);
        assert!(file.is_empty());
        assert_eq!(file.anomalies(), [Anomaly::UnrecognizedContainer(None)]);
    }

    #[test]
    fn duplicate_tags_are_all_reachable() {
        let buf = be_buffer!(
            TT_SFNT_VERSION, 2u16, 32u16, 1u16, 0u16,
            (Tag::new(b"head")), 0u32, 44u32, 54u32,
            (Tag::new(b"head")), 0u32, 98u32, 54u32
        )
        .extend_bytes(&make_head())
        .extend_bytes(&make_head());
        let file = FontFile::new(&buf);
        let font = file.get(0).unwrap();
        let records = font.table_records();
        assert_eq!(records.len(), 2);
        assert_eq!(font.table_record(head::TAG), Some(&records[0]));
        assert_eq!(font.record_data(&records[1]).unwrap().len(), 54);
        assert!(matches!(font.decode_record(&records[1]), Ok(AnyTable::Head(_))));
    }

    #[test]
    fn fonts_decode_across_threads() {
        let buf = make_font();
        let file = FontFile::new(&buf);
        let font = file.get(0).unwrap();
        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = font
                .table_records()
                .iter()
                .map(|record| scope.spawn(move || font.decode_record(record)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], font.decode(head::TAG));
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn public_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FontFile>();
        assert_send_sync::<FontDirectory>();
        assert_send_sync::<AnyTable>();
        assert_send_sync::<DecodeError>();
        assert_send_sync::<Anomaly>();
    }
}
