//! The [FeatureList] table.

use types::Tag;

use super::TagOffsetRecord;
use crate::{
    traversal::{Field, FieldType, SomeTable},
    FontData, FontRead, ReadError,
};

/// [Feature List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-list-table)
///
/// Only the feature tags are retained; a feature index is a position in
/// this list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FeatureList {
    pub tags: Vec<Tag>,
}

impl FeatureList {
    /// Returns the tag of the feature at the given index.
    pub fn get(&self, index: u16) -> Option<Tag> {
        self.tags.get(index as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> FontRead<'a> for FeatureList {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let feature_count: u16 = cursor.read()?;
        let records: &[TagOffsetRecord] = cursor.read_array(feature_count as usize)?;
        Ok(FeatureList {
            tags: records.iter().map(TagOffsetRecord::tag).collect(),
        })
    }
}

impl<'a> SomeTable<'a> for &'a FeatureList {
    fn type_name(&self) -> &str {
        "FeatureList"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let list: &'a FeatureList = *self;
        match idx {
            0 => Some(Field::new("feature_count", list.tags.len() as u16)),
            1 => Some(Field::new("feature_tags", FieldType::scalars("Tag", &list.tags))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::be_buffer;

    #[test]
    fn feature_list_get() {
        let buf = be_buffer! {
            2u16,
            (Tag::new(b"c2sc")), 14u16,
            (Tag::new(b"liga")), 14u16
        };
        let feature_list = FeatureList::read(buf.font_data()).unwrap();
        assert_eq!(feature_list.get(0), Some(Tag::new(b"c2sc")));
        assert_eq!(feature_list.get(1), Some(Tag::new(b"liga")));
        assert!(feature_list.get(2).is_none());
    }

    #[test]
    fn truncated_records() {
        let buf = be_buffer! { 2u16, (Tag::new(b"kern")), 8u16 };
        assert_eq!(
            FeatureList::read(buf.font_data()),
            Err(ReadError::OutOfBounds)
        );
    }
}
