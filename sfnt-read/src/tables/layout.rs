//! OpenType Layout common table formats
//!
//! `GSUB` and `GPOS` share a header and the script, feature, and lookup
//! lists it points to. Both are decoded by [`Layout`].

mod feature;
mod lookup;
mod lookup_flag;
mod script;

pub use feature::FeatureList;
pub use lookup::{Lookup, LookupList};
pub use lookup_flag::LookupFlag;
pub use script::{LangSys, Script, ScriptList, NO_REQUIRED_FEATURE};

use types::{BigEndian, MajorMinor, Offset16, Offset32, Tag};

use crate::{
    traversal::{Field, FieldType, SomeTable},
    Anomaly, FontData, FontRead, FontReadWithArgs, ReadArgs, ReadError,
};

/// A `(tag, offset)` pair, as used in the script, language system and
/// feature lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::AnyBitPattern)]
#[repr(C)]
pub(crate) struct TagOffsetRecord {
    tag: BigEndian<Tag>,
    offset: BigEndian<Offset16>,
}

impl TagOffsetRecord {
    pub(crate) fn tag(&self) -> Tag {
        self.tag.get()
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset.get().to_usize()
    }
}

/// A decoded [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub)
/// or [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Layout {
    /// The tag of the table this was decoded from.
    pub tag: Tag,
    pub version: MajorMinor,
    pub script_list: ScriptList,
    pub feature_list: FeatureList,
    /// Empty if the table has no LookupList, or if it could not be read.
    pub lookup_list: LookupList,
    /// Offset to the FeatureVariations table, for version 1.1 and later.
    pub feature_variations_offset: Option<u32>,
    /// An unreadable lookup list, and feature indices that were dropped
    /// because they do not exist in the feature list.
    pub anomalies: Vec<Anomaly>,
}

impl Layout {
    /// Returns the tag of the feature at `index`, if it exists.
    pub fn feature_tag(&self, index: u16) -> Option<Tag> {
        self.feature_list.get(index)
    }

    /// The tags of the features referenced by `lang_sys`, required feature first.
    pub fn feature_tags<'b>(&'b self, lang_sys: &'b LangSys) -> impl Iterator<Item = Tag> + 'b {
        lang_sys
            .required_feature_index
            .into_iter()
            .chain(lang_sys.feature_indices.iter().copied())
            .filter_map(|index| self.feature_tag(index))
    }

    pub fn read(data: FontData, tag: Tag) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        let script_list_offset: Offset16 = cursor.read()?;
        let feature_list_offset: Offset16 = cursor.read()?;
        let lookup_list_offset: Offset16 = cursor.read()?;
        let feature_variations_offset = if version >= MajorMinor::VERSION_1_1 {
            cursor
                .read::<Offset32>()?
                .non_null()
                .map(|offset| offset as u32)
        } else {
            None
        };

        let mut script_list: ScriptList = read_list(data, script_list_offset, tag, "ScriptList")?;
        let feature_list: FeatureList = read_list(data, feature_list_offset, tag, "FeatureList")?;
        let mut anomalies = Vec::new();
        let lookup_list = read_list::<LookupList>(data, lookup_list_offset, tag, "LookupList")
            .unwrap_or_else(|error| {
                let anomaly = Anomaly::UnreadableLookupList { table: tag, error };
                log::warn!("{anomaly}");
                anomalies.push(anomaly);
                LookupList::default()
            });
        anomalies.extend(validate_feature_indices(&mut script_list, feature_list.len()));
        Ok(Layout {
            tag,
            version,
            script_list,
            feature_list,
            lookup_list,
            feature_variations_offset,
            anomalies,
        })
    }
}

fn read_list<'a, T: FontRead<'a> + Default>(
    data: FontData<'a>,
    offset: Offset16,
    tag: Tag,
    name: &str,
) -> Result<T, ReadError> {
    match offset.non_null() {
        Some(offset) => data
            .split_off(offset)
            .ok_or(ReadError::OutOfBounds)
            .and_then(T::read),
        None => {
            log::debug!("'{tag}' has no {name}");
            Ok(T::default())
        }
    }
}

/// Drop every feature index that does not resolve, reporting each one.
fn validate_feature_indices(script_list: &mut ScriptList, feature_count: usize) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    for script in script_list.scripts.iter_mut() {
        let script_tag = script.tag;
        let lang_systems = script
            .default_lang_sys
            .iter_mut()
            .map(|lang_sys| (None, lang_sys))
            .chain(
                script
                    .lang_sys
                    .iter_mut()
                    .map(|(tag, lang_sys)| (Some(*tag), lang_sys)),
            );
        for (lang_sys_tag, lang_sys) in lang_systems {
            for index in lang_sys.retain_valid_indices(feature_count) {
                let anomaly = Anomaly::UnresolvedFeatureIndex {
                    script: script_tag,
                    lang_sys: lang_sys_tag,
                    index,
                    feature_count: feature_count as u16,
                };
                log::warn!("{anomaly}");
                anomalies.push(anomaly);
            }
        }
    }
    anomalies
}

impl ReadArgs for Layout {
    type Args = Tag;
}

impl<'a> FontReadWithArgs<'a> for Layout {
    fn read_with_args(data: FontData<'a>, args: &Tag) -> Result<Self, ReadError> {
        Layout::read(data, *args)
    }
}

impl<'a> SomeTable<'a> for &'a Layout {
    fn type_name(&self) -> &str {
        if self.tag == super::gpos::TAG {
            "Gpos"
        } else {
            "Gsub"
        }
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let layout: &'a Layout = *self;
        match idx {
            0 => Some(Field::new("version", layout.version)),
            1 => Some(Field::new("script_list", FieldType::record(&layout.script_list))),
            2 => Some(Field::new("feature_list", FieldType::record(&layout.feature_list))),
            3 => Some(Field::new("lookup_list", FieldType::record(&layout.lookup_list))),
            4 if layout.version >= MajorMinor::VERSION_1_1 => Some(Field::new(
                "feature_variations_offset",
                FieldType::optional(layout.feature_variations_offset),
            )),
            _ => None,
        }
    }
}
