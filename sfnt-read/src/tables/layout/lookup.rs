//! A summary of the [LookupList] table.

use types::{BigEndian, FixedSize, Offset16};

use super::LookupFlag;
use crate::{
    traversal::{Field, FieldType, SomeTable},
    FontData, FontRead, ReadError,
};

/// [Lookup List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-list-table)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LookupList {
    pub lookups: Vec<Lookup>,
}

/// The header of a [Lookup Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-table).
///
/// Subtables are counted but not decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lookup {
    /// Different enumerations for GSUB and GPOS
    pub lookup_type: u16,
    /// Lookup qualifiers
    pub lookup_flag: LookupFlag,
    /// Number of subtables for this lookup
    pub subtable_count: u16,
    /// Index (base 0) into GDEF mark glyph sets structure, present when
    /// [`LookupFlag::USE_MARK_FILTERING_SET`] is set.
    pub mark_filtering_set: Option<u16>,
}

impl LookupList {
    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

impl<'a> FontRead<'a> for LookupList {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let lookup_count: u16 = cursor.read()?;
        let offsets: &[BigEndian<Offset16>] = cursor.read_array(lookup_count as usize)?;
        let lookups = offsets
            .iter()
            .map(|offset| {
                data.split_off(offset.get().to_usize())
                    .ok_or(ReadError::OutOfBounds)
                    .and_then(Lookup::read)
            })
            .collect::<Result<_, _>>()?;
        Ok(LookupList { lookups })
    }
}

impl<'a> FontRead<'a> for Lookup {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let lookup_type = cursor.read()?;
        let lookup_flag: LookupFlag = cursor.read()?;
        let subtable_count: u16 = cursor.read()?;
        cursor.advance_by(subtable_count as usize * Offset16::RAW_BYTE_LEN);
        let mark_filtering_set = if lookup_flag.contains(LookupFlag::USE_MARK_FILTERING_SET) {
            Some(cursor.read()?)
        } else {
            // the offsets must still be in bounds
            cursor.position()?;
            None
        };
        Ok(Lookup {
            lookup_type,
            lookup_flag,
            subtable_count,
            mark_filtering_set,
        })
    }
}

impl<'a> SomeTable<'a> for &'a LookupList {
    fn type_name(&self) -> &str {
        "LookupList"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let list: &'a LookupList = *self;
        match idx {
            0 => Some(Field::new("lookup_count", list.lookups.len() as u16)),
            1 => Some(Field::new("lookups", FieldType::records("Lookup", &list.lookups))),
            _ => None,
        }
    }
}

impl<'a> SomeTable<'a> for &'a Lookup {
    fn type_name(&self) -> &str {
        "Lookup"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        match idx {
            0 => Some(Field::new("lookup_type", self.lookup_type)),
            1 => Some(Field::new("lookup_flag", self.lookup_flag.to_bits())),
            2 => Some(Field::new("subtable_count", self.subtable_count)),
            3 => Some(Field::new(
                "mark_filtering_set",
                FieldType::optional(self.mark_filtering_set),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::be_buffer;

    #[test]
    fn lookup_summary() {
        let buf = be_buffer! {
            2u16, [6u16, 16],
            // lookup 0: two subtables
            4u16, 0u16, 2u16, [100u16, 200],
            // lookup 1: one subtable and a mark filtering set
            4u16, 0x0010u16, 1u16, [100u16], 3u16
        };
        let list = LookupList::read(buf.font_data()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.lookups[0],
            Lookup {
                lookup_type: 4,
                lookup_flag: LookupFlag::from_bits(0),
                subtable_count: 2,
                mark_filtering_set: None,
            }
        );
        assert_eq!(list.lookups[1].mark_filtering_set, Some(3));
    }

    #[test]
    fn subtable_offsets_out_of_bounds() {
        let buf = be_buffer! { 1u16, 0u16, 3u16, [10u16] };
        assert_eq!(Lookup::read(buf.font_data()), Err(ReadError::OutOfBounds));
    }
}
