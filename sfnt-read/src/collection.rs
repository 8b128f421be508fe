//! Container detection and the [TTC header].
//!
//! [TTC header]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header

use types::{
    BigEndian, FixedSize, MajorMinor, Tag, CFF_SFNT_VERSION, TTC_HEADER_TAG, TT_SFNT_VERSION,
};

use crate::{font_data::FontData, FontRead, ReadError};

/// The kind of file, as determined by its first four bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// A single font, with its table directory at offset 0.
    Font { sfnt_version: u32 },
    /// A font collection.
    Collection(CollectionHeader),
    /// Neither a font nor a collection; contains the signature, if the data
    /// was long enough to have one.
    ///
    /// A `ttcf` signature without room for the rest of its header is also
    /// unrecognized.
    Unrecognized(Option<Tag>),
}

impl ContainerKind {
    /// Inspect the signature of `data`.
    pub fn detect(data: FontData) -> ContainerKind {
        let Ok(signature) = data.read_at::<u32>(0) else {
            log::debug!("{} bytes is too short for an sfnt signature", data.len());
            return ContainerKind::Unrecognized(None);
        };
        let tag = Tag::from_u32(signature);
        match signature {
            TT_SFNT_VERSION | CFF_SFNT_VERSION => ContainerKind::Font {
                sfnt_version: signature,
            },
            _ if tag == TTC_HEADER_TAG => match CollectionHeader::read(data) {
                Ok(header) => ContainerKind::Collection(header),
                Err(error) => {
                    log::debug!("'{tag}' header is unreadable: {error}");
                    ContainerKind::Unrecognized(Some(tag))
                }
            },
            _ => ContainerKind::Unrecognized(Some(tag)),
        }
    }

    /// The start of every table directory in the file, in order.
    pub fn directory_offsets(&self) -> &[u32] {
        match self {
            ContainerKind::Font { .. } => &[0],
            ContainerKind::Collection(header) => &header.offsets,
            ContainerKind::Unrecognized(_) => &[],
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ContainerKind::Collection(_))
    }
}

/// The location of a collection's digital signature, present in version 2.0
/// headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DsigRecord {
    pub tag: u32,
    pub length: u32,
    pub offset: u32,
}

/// The header of a TrueType collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionHeader {
    pub version: MajorMinor,
    pub num_fonts: u32,
    /// Table directory offsets, as stored.
    ///
    /// Shorter than `num_fonts` if the data ends inside the offset array.
    pub offsets: Vec<u32>,
    /// `None` for version 1 headers, or when the DSIG fields are not present.
    pub dsig: Option<DsigRecord>,
}

impl<'a> FontRead<'a> for CollectionHeader {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let tag: Tag = cursor.read()?;
        if tag != TTC_HEADER_TAG {
            return Err(ReadError::MalformedData("missing 'ttcf' tag"));
        }
        let version = MajorMinor::new(cursor.read()?, cursor.read()?);
        let num_fonts: u32 = cursor.read()?;
        let readable = (num_fonts as usize).min(cursor.remaining_bytes() / u32::RAW_BYTE_LEN);
        let offsets: &[BigEndian<u32>] = cursor.read_array(readable)?;
        let offsets: Vec<u32> = offsets.iter().map(BigEndian::get).collect();
        let dsig = if offsets.len() < num_fonts as usize {
            log::debug!(
                "collection header ends after {} of {num_fonts} offsets",
                offsets.len()
            );
            None
        } else if version.major >= 2 {
            match (cursor.read(), cursor.read(), cursor.read()) {
                (Ok(tag), Ok(length), Ok(offset)) => Some(DsigRecord {
                    tag,
                    length,
                    offset,
                }),
                _ => {
                    log::debug!("collection header {version} has no DSIG fields");
                    None
                }
            }
        } else {
            None
        };
        log::debug!("collection {version} with {num_fonts} fonts at {offsets:?}");
        Ok(CollectionHeader {
            version,
            num_fonts,
            offsets,
            dsig,
        })
    }
}

impl CollectionHeader {
    /// `true` if fewer than `num_fonts` offsets could be read.
    pub fn is_truncated(&self) -> bool {
        self.offsets.len() < self.num_fonts as usize
    }
}

/// Returns the start offset of each table directory in `data`.
///
/// A single font has exactly one directory, at offset 0. A collection has one
/// per font, exactly as stored in its header; this fails with `OutOfBounds`
/// if the data ends before the last of them. Data with any other signature
/// has none.
pub fn directory_offsets(data: &[u8]) -> Result<Vec<u32>, ReadError> {
    match ContainerKind::detect(FontData::new(data)) {
        ContainerKind::Collection(header) if header.is_truncated() => Err(ReadError::OutOfBounds),
        kind => Ok(kind.directory_offsets().to_vec()),
    }
}
