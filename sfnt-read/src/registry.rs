//! The set of tables that can be decoded, keyed by tag.

use types::Tag;

use crate::{
    tables::{
        head::{self, Head},
        hhea,
        hvhea::{Axis, HVhea},
        name::{self, Name},
        vhea,
    },
    traversal::SomeTable,
    Anomaly, FontData, FontRead, ReadError,
};

#[cfg(feature = "layout")]
use crate::tables::{gpos, gsub, layout::Layout};

/// A decoded table of any supported type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "table", content = "value"))]
#[non_exhaustive]
pub enum AnyTable {
    Head(Head),
    Name(Name),
    Hhea(HVhea),
    Vhea(HVhea),
    #[cfg(feature = "layout")]
    Gsub(Layout),
    #[cfg(feature = "layout")]
    Gpos(Layout),
}

impl AnyTable {
    /// The tag of the table this was decoded from.
    pub fn tag(&self) -> Tag {
        match self {
            AnyTable::Head(_) => head::TAG,
            AnyTable::Name(_) => name::TAG,
            AnyTable::Hhea(_) => hhea::TAG,
            AnyTable::Vhea(_) => vhea::TAG,
            #[cfg(feature = "layout")]
            AnyTable::Gsub(_) => gsub::TAG,
            #[cfg(feature = "layout")]
            AnyTable::Gpos(_) => gpos::TAG,
        }
    }

    /// Problems found while decoding that did not prevent it.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        match self {
            AnyTable::Head(table) => table.anomalies(),
            AnyTable::Name(table) => table.anomalies.clone(),
            AnyTable::Hhea(_) | AnyTable::Vhea(_) => Vec::new(),
            #[cfg(feature = "layout")]
            AnyTable::Gsub(table) | AnyTable::Gpos(table) => table.anomalies.clone(),
        }
    }

    /// Returns a type-erased view of the table, for traversal.
    pub fn as_some_table(&self) -> Box<dyn SomeTable<'_> + '_> {
        match self {
            AnyTable::Head(table) => Box::new(table),
            AnyTable::Name(table) => Box::new(table),
            AnyTable::Hhea(table) | AnyTable::Vhea(table) => Box::new(table),
            #[cfg(feature = "layout")]
            AnyTable::Gsub(table) | AnyTable::Gpos(table) => Box::new(table),
        }
    }
}

/// A function that decodes the bytes of one table.
pub type DecodeFn = fn(FontData) -> Result<AnyTable, ReadError>;

static DECODERS: &[(Tag, DecodeFn)] = &[
    (head::TAG, decode_head),
    (name::TAG, decode_name),
    (hhea::TAG, decode_hhea),
    (vhea::TAG, decode_vhea),
    #[cfg(feature = "layout")]
    (gsub::TAG, decode_gsub),
    #[cfg(feature = "layout")]
    (gpos::TAG, decode_gpos),
];

/// Returns the decoder registered for `tag`, if any.
pub fn decoder_for(tag: Tag) -> Option<DecodeFn> {
    DECODERS
        .iter()
        .find_map(|(registered, decode)| (*registered == tag).then_some(*decode))
}

/// Every tag with a registered decoder.
pub fn registered_tags() -> impl Iterator<Item = Tag> {
    DECODERS.iter().map(|(tag, _)| *tag)
}

fn decode_head(data: FontData) -> Result<AnyTable, ReadError> {
    Head::read(data).map(AnyTable::Head)
}

fn decode_name(data: FontData) -> Result<AnyTable, ReadError> {
    Name::read(data).map(AnyTable::Name)
}

fn decode_hhea(data: FontData) -> Result<AnyTable, ReadError> {
    HVhea::read(data, Axis::Horizontal).map(AnyTable::Hhea)
}

fn decode_vhea(data: FontData) -> Result<AnyTable, ReadError> {
    HVhea::read(data, Axis::Vertical).map(AnyTable::Vhea)
}

#[cfg(feature = "layout")]
fn decode_gsub(data: FontData) -> Result<AnyTable, ReadError> {
    Layout::read(data, gsub::TAG).map(AnyTable::Gsub)
}

#[cfg(feature = "layout")]
fn decode_gpos(data: FontData) -> Result<AnyTable, ReadError> {
    Layout::read(data, gpos::TAG).map(AnyTable::Gpos)
}
