//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

mod encoding;
#[cfg(feature = "legacy-codecs")]
mod johab;

pub use encoding::{Codec, DecodeTextError};
pub use types::NameId;

use types::{BigEndian, Offset16, Tag};

use crate::{
    font_data::array_end,
    traversal::{Field, FieldType, SomeTable},
    Anomaly, FontData, FontRead, ReadError,
};

/// 'name'
pub const TAG: Tag = Tag::new(b"name");

/// The Windows platform; the only platform whose strings are decoded.
pub const WINDOWS_PLATFORM_ID: u16 = 3;

/// [Naming table version 1](https://docs.microsoft.com/en-us/typography/opentype/spec/name#naming-table-version-1)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Name {
    /// Table version number (0 or 1)
    pub format: u16,
    /// The decoded Windows platform entries, in record order.
    pub entries: Vec<NameEntry>,
    /// Language-tag strings, present in format 1 tables.
    pub lang_tags: Vec<String>,
    /// Entries that were skipped because their text could not be decoded.
    pub anomalies: Vec<Anomaly>,
}

/// A decoded name string, with the identifiers of its record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NameEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    pub string: String,
}

/// Part of [Name], read in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::AnyBitPattern)]
#[repr(C)]
pub struct NameRecord {
    /// Platform ID.
    pub platform_id: BigEndian<u16>,
    /// Platform-specific encoding ID.
    pub encoding_id: BigEndian<u16>,
    /// Language ID.
    pub language_id: BigEndian<u16>,
    /// Name ID.
    pub name_id: BigEndian<NameId>,
    /// String length (in bytes).
    pub length: BigEndian<u16>,
    /// String offset from start of storage area (in bytes).
    pub string_offset: BigEndian<Offset16>,
}

/// Part of [Name], read in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::AnyBitPattern)]
#[repr(C)]
pub struct LangTagRecord {
    /// Language-tag string length (in bytes)
    pub length: BigEndian<u16>,
    /// Language-tag string offset from start of storage area (in bytes).
    pub lang_tag_offset: BigEndian<Offset16>,
}

impl NameRecord {
    pub fn platform_id(&self) -> u16 {
        self.platform_id.get()
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id.get()
    }

    pub fn language_id(&self) -> u16 {
        self.language_id.get()
    }

    pub fn name_id(&self) -> NameId {
        self.name_id.get()
    }

    /// The raw bytes of this record's string, given the storage area.
    pub fn string_bytes<'a>(&self, storage: FontData<'a>) -> Result<&'a [u8], ReadError> {
        let start = self.string_offset.get().to_usize();
        storage.read_bytes(start..array_end(start, self.length.get() as usize, 1)?)
    }
}

impl LangTagRecord {
    /// The raw UTF-16BE bytes of this language tag, given the storage area.
    pub fn lang_tag_bytes<'a>(&self, storage: FontData<'a>) -> Result<&'a [u8], ReadError> {
        let start = self.lang_tag_offset.get().to_usize();
        storage.read_bytes(start..array_end(start, self.length.get() as usize, 1)?)
    }
}

impl Name {
    /// The first entry with the given name id.
    pub fn get(&self, name_id: NameId) -> Option<&NameEntry> {
        self.entries.iter().find(|entry| entry.name_id == name_id)
    }

    /// The first entry with the given name id and language.
    pub fn get_for_language(&self, name_id: NameId, language_id: u16) -> Option<&NameEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name_id == name_id && entry.language_id == language_id)
    }
}

impl<'a> FontRead<'a> for Name {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let storage_offset: Offset16 = cursor.read()?;
        let name_records: &[NameRecord] = cursor.read_array(count as usize)?;
        let lang_tag_records: &[LangTagRecord] = if format >= 1 {
            let lang_tag_count: u16 = cursor.read()?;
            cursor.read_array(lang_tag_count as usize)?
        } else {
            &[]
        };
        let storage = data
            .split_off(storage_offset.to_usize())
            .ok_or(ReadError::OutOfBounds)?;

        let mut entries = Vec::new();
        let mut anomalies = Vec::new();
        for record in name_records {
            if record.platform_id() != WINDOWS_PLATFORM_ID {
                log::trace!(
                    "skipping name record {} on platform {}",
                    record.name_id(),
                    record.platform_id()
                );
                continue;
            }
            let bytes = record.string_bytes(storage)?;
            let codec = Codec::for_windows_encoding(record.encoding_id());
            match codec.decode(bytes) {
                Ok(string) => entries.push(NameEntry {
                    platform_id: record.platform_id(),
                    encoding_id: record.encoding_id(),
                    language_id: record.language_id(),
                    name_id: record.name_id(),
                    string,
                }),
                Err(error) => {
                    let anomaly = Anomaly::MalformedText {
                        platform_id: record.platform_id(),
                        encoding_id: record.encoding_id(),
                        language_id: record.language_id(),
                        name_id: record.name_id(),
                        error,
                    };
                    log::warn!("{anomaly}");
                    anomalies.push(anomaly);
                }
            }
        }

        let lang_tags = lang_tag_records
            .iter()
            .map(|record| {
                let bytes = record.lang_tag_bytes(storage)?;
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
                Ok(char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect())
            })
            .collect::<Result<_, ReadError>>()?;

        Ok(Name {
            format,
            entries,
            lang_tags,
            anomalies,
        })
    }
}

impl<'a> SomeTable<'a> for &'a Name {
    fn type_name(&self) -> &str {
        "Name"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let name: &'a Name = *self;
        match idx {
            0 => Some(Field::new("format", name.format)),
            1 => Some(Field::new(
                "entries",
                FieldType::records("NameEntry", &name.entries),
            )),
            2 if name.format >= 1 => Some(Field::new(
                "lang_tags",
                FieldType::strings(&name.lang_tags),
            )),
            _ => None,
        }
    }
}

impl<'a> SomeTable<'a> for &'a NameEntry {
    fn type_name(&self) -> &str {
        "NameEntry"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let entry: &'a NameEntry = *self;
        match idx {
            0 => Some(Field::new("platform_id", entry.platform_id)),
            1 => Some(Field::new("encoding_id", entry.encoding_id)),
            2 => Some(Field::new("language_id", entry.language_id)),
            3 => Some(Field::new("name_id", entry.name_id)),
            4 => Some(Field::new("string", entry.string.as_str())),
            _ => None,
        }
    }
}
