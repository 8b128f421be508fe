//! The [ScriptList] and the language systems it contains.

use types::{BigEndian, Offset16, Tag};

use super::TagOffsetRecord;
use crate::{
    traversal::{Field, FieldType, SomeTable},
    FontData, FontRead, ReadError,
};

/// The value of `requiredFeatureIndex` when there is no required feature.
pub const NO_REQUIRED_FEATURE: u16 = 0xFFFF;

/// [Script List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-list-table-and-script-record)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScriptList {
    pub scripts: Vec<Script>,
}

/// [Script Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Script {
    pub tag: Tag,
    /// `None` if the default language system offset is null.
    pub default_lang_sys: Option<LangSys>,
    /// Tagged language systems, in record order.
    pub lang_sys: Vec<(Tag, LangSys)>,
}

/// [Language System Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#language-system-table)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LangSys {
    /// Index of a feature required for this language system, if any.
    pub required_feature_index: Option<u16>,
    /// Indices into the FeatureList, in arbitrary order.
    pub feature_indices: Vec<u16>,
}

impl ScriptList {
    /// Returns the index of the script with the given tag.
    pub fn index_for_tag(&self, tag: Tag) -> Option<u16> {
        self.scripts
            .iter()
            .position(|script| script.tag == tag)
            .map(|index| index as u16)
    }

    /// Returns the first script with the given tag.
    pub fn get(&self, tag: Tag) -> Option<&Script> {
        self.scripts.iter().find(|script| script.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl Script {
    /// Returns the language system for `tag`, if present.
    pub fn lang_sys_for_tag(&self, tag: Tag) -> Option<&LangSys> {
        self.lang_sys
            .iter()
            .find_map(|(lang_tag, lang_sys)| (*lang_tag == tag).then_some(lang_sys))
    }

    fn read(data: FontData, tag: Tag) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let default_lang_sys_offset: Offset16 = cursor.read()?;
        let lang_sys_count: u16 = cursor.read()?;
        let records: &[TagOffsetRecord] = cursor.read_array(lang_sys_count as usize)?;
        let default_lang_sys = default_lang_sys_offset
            .non_null()
            .map(|offset| read_at_offset(data, offset))
            .transpose()?;
        let lang_sys = records
            .iter()
            .map(|record| Ok((record.tag(), read_at_offset(data, record.offset())?)))
            .collect::<Result<_, ReadError>>()?;
        Ok(Script {
            tag,
            default_lang_sys,
            lang_sys,
        })
    }
}

impl LangSys {
    /// Remove indices that are not less than `feature_count`, returning them.
    ///
    /// A rejected required feature index is returned first.
    pub(crate) fn retain_valid_indices(&mut self, feature_count: usize) -> Vec<u16> {
        let mut rejected = Vec::new();
        if let Some(index) = self.required_feature_index {
            if index as usize >= feature_count {
                rejected.push(index);
                self.required_feature_index = None;
            }
        }
        self.feature_indices.retain(|index| {
            let valid = (*index as usize) < feature_count;
            if !valid {
                rejected.push(*index);
            }
            valid
        });
        rejected
    }
}

fn read_at_offset<'a, T: FontRead<'a>>(data: FontData<'a>, offset: usize) -> Result<T, ReadError> {
    data.split_off(offset)
        .ok_or(ReadError::OutOfBounds)
        .and_then(T::read)
}

impl<'a> FontRead<'a> for ScriptList {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let script_count: u16 = cursor.read()?;
        let records: &[TagOffsetRecord] = cursor.read_array(script_count as usize)?;
        let scripts = records
            .iter()
            .map(|record| {
                let script_data = data
                    .split_off(record.offset())
                    .ok_or(ReadError::OutOfBounds)?;
                Script::read(script_data, record.tag())
            })
            .collect::<Result<_, _>>()?;
        Ok(ScriptList { scripts })
    }
}

impl<'a> FontRead<'a> for LangSys {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // lookupOrderOffset, reserved
        cursor.advance::<u16>();
        let required_feature_index: u16 = cursor.read()?;
        let feature_index_count: u16 = cursor.read()?;
        let feature_indices: &[BigEndian<u16>] =
            cursor.read_array(feature_index_count as usize)?;
        Ok(LangSys {
            required_feature_index: (required_feature_index != NO_REQUIRED_FEATURE)
                .then_some(required_feature_index),
            feature_indices: feature_indices.iter().map(BigEndian::get).collect(),
        })
    }
}

impl<'a> SomeTable<'a> for &'a ScriptList {
    fn type_name(&self) -> &str {
        "ScriptList"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let list: &'a ScriptList = *self;
        match idx {
            0 => Some(Field::new("script_count", list.scripts.len() as u16)),
            1 => Some(Field::new("scripts", FieldType::records("Script", &list.scripts))),
            _ => None,
        }
    }
}

impl<'a> SomeTable<'a> for &'a Script {
    fn type_name(&self) -> &str {
        "Script"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let script: &'a Script = *self;
        match idx {
            0 => Some(Field::new("tag", script.tag)),
            1 => Some(Field::new(
                "default_lang_sys",
                FieldType::optional(script.default_lang_sys.as_ref().map(FieldType::record)),
            )),
            2 => Some(Field::new(
                "lang_sys",
                FieldType::records("LangSysRecord", &script.lang_sys),
            )),
            _ => None,
        }
    }
}

impl<'a> SomeTable<'a> for &'a (Tag, LangSys) {
    fn type_name(&self) -> &str {
        "LangSysRecord"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let (tag, lang_sys): &'a (Tag, LangSys) = *self;
        match idx {
            0 => Some(Field::new("tag", *tag)),
            1 => Some(Field::new("lang_sys", FieldType::record(lang_sys))),
            _ => None,
        }
    }
}

impl<'a> SomeTable<'a> for &'a LangSys {
    fn type_name(&self) -> &str {
        "LangSys"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let lang_sys: &'a LangSys = *self;
        match idx {
            0 => Some(Field::new(
                "required_feature_index",
                FieldType::optional(lang_sys.required_feature_index),
            )),
            1 => Some(Field::new(
                "feature_indices",
                FieldType::scalars("u16", &lang_sys.feature_indices),
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
    fn required_feature_sentinel() {
        let buf = be_buffer! { 0u16, 0xFFFFu16, 2u16, [0u16, 1] };
        let lang_sys = LangSys::read(buf.font_data()).unwrap();
        assert_eq!(lang_sys.required_feature_index, None);
        assert_eq!(lang_sys.feature_indices, [0, 1]);

        let buf = be_buffer! { 0u16, 4u16, 0u16 };
        let lang_sys = LangSys::read(buf.font_data()).unwrap();
        assert_eq!(lang_sys.required_feature_index, Some(4));
        assert!(lang_sys.feature_indices.is_empty());
    }

    #[test]
    fn index_validation() {
        let mut lang_sys = LangSys {
            required_feature_index: Some(7),
            feature_indices: vec![0, 3, 2, 9],
        };
        assert_eq!(lang_sys.retain_valid_indices(3), [7, 3, 9]);
        assert_eq!(lang_sys.required_feature_index, None);
        assert_eq!(lang_sys.feature_indices, [0, 2]);
    }

    #[test]
    fn null_default_lang_sys() {
        // script with no default and one tagged LangSys at offset 10
        let buf = be_buffer! {
            0u16, 1u16,
            (Tag::new(b"TRK ")), 10u16,
            0u16, 0xFFFFu16, 1u16, [5u16]
        };
        let script = Script::read(buf.font_data(), Tag::new(b"latn")).unwrap();
        assert!(script.default_lang_sys.is_none());
        assert_eq!(
            script.lang_sys_for_tag(Tag::new(b"TRK ")).map(|ls| &ls.feature_indices[..]),
            Some(&[5u16][..])
        );
    }

    #[test]
    fn truncated_lang_sys() {
        let buf = be_buffer! { 0u16, 0xFFFFu16, 3u16, [0u16, 1] };
        assert_eq!(LangSys::read(buf.font_data()), Err(ReadError::OutOfBounds));
    }
}
