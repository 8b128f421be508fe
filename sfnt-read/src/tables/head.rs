//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{Fixed, LongDateTime, MajorMinor, Tag, HEAD_MAGIC_NUMBER};

use crate::{
    traversal::{Field, FieldType, SomeTable},
    Anomaly, FontData, FontRead, ReadError,
};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Head {
    /// Version number of the font header table, set to (1, 0)
    pub version: MajorMinor,
    /// Set by font manufacturer.
    pub font_revision: Fixed,
    /// To compute: set it to 0, sum the entire font as uint32, then
    /// store 0xB1B0AFBA - sum.
    pub checksum_adjustment: u32,
    /// Set to 0x5F0F3CF5.
    pub magic_number: u32,
    pub flags: u16,
    /// Set to a value from 16 to 16384.
    pub units_per_em: u16,
    /// Number of seconds since 12:00 midnight that started January 1st
    /// 1904 in GMT/UTC time zone.
    pub created: LongDateTime,
    /// Number of seconds since 12:00 midnight that started January 1st
    /// 1904 in GMT/UTC time zone.
    pub modified: LongDateTime,
    /// Minimum x coordinate across all glyph bounding boxes.
    pub x_min: i16,
    /// Minimum y coordinate across all glyph bounding boxes.
    pub y_min: i16,
    /// Maximum x coordinate across all glyph bounding boxes.
    pub x_max: i16,
    /// Maximum y coordinate across all glyph bounding boxes.
    pub y_max: i16,
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    /// Deprecated (Set to 2).
    pub font_direction_hint: i16,
    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub index_to_loc_format: i16,
    /// 0 for current format.
    pub glyph_data_format: i16,
}

impl Head {
    /// The encoded size of the table.
    pub const LEN: usize = 54;

    /// `true` if the magic number has its expected value.
    pub fn is_magic_valid(&self) -> bool {
        self.magic_number == HEAD_MAGIC_NUMBER
    }

    pub fn anomalies(&self) -> Vec<Anomaly> {
        if self.is_magic_valid() {
            Vec::new()
        } else {
            vec![Anomaly::IntegrityMismatch {
                found: self.magic_number,
            }]
        }
    }
}

impl<'a> FontRead<'a> for Head {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let head = Head {
            version: cursor.read()?,
            font_revision: cursor.read()?,
            checksum_adjustment: cursor.read()?,
            magic_number: cursor.read()?,
            flags: cursor.read()?,
            units_per_em: cursor.read()?,
            created: cursor.read()?,
            modified: cursor.read()?,
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
            mac_style: cursor.read()?,
            lowest_rec_ppem: cursor.read()?,
            font_direction_hint: cursor.read()?,
            index_to_loc_format: cursor.read()?,
            glyph_data_format: cursor.read()?,
        };
        if !head.is_magic_valid() {
            log::warn!("head magic number is 0x{:08X}", head.magic_number);
        }
        Ok(head)
    }
}

impl<'a> SomeTable<'a> for &'a Head {
    fn type_name(&self) -> &str {
        "Head"
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        let value: FieldType = match idx {
            0 => self.version.into(),
            1 => self.font_revision.into(),
            2 => FieldType::Hex32(self.checksum_adjustment),
            3 => FieldType::Hex32(self.magic_number),
            4 => self.flags.into(),
            5 => self.units_per_em.into(),
            6 => self.created.into(),
            7 => self.modified.into(),
            8 => self.x_min.into(),
            9 => self.y_min.into(),
            10 => self.x_max.into(),
            11 => self.y_max.into(),
            12 => self.mac_style.into(),
            13 => self.lowest_rec_ppem.into(),
            14 => self.font_direction_hint.into(),
            15 => self.index_to_loc_format.into(),
            16 => self.glyph_data_format.into(),
            _ => return None,
        };
        Some(Field {
            name: FIELD_NAMES[idx],
            value,
        })
    }
}

static FIELD_NAMES: [&str; 17] = [
    "version",
    "font_revision",
    "checksum_adjustment",
    "magic_number",
    "flags",
    "units_per_em",
    "created",
    "modified",
    "x_min",
    "y_min",
    "x_max",
    "y_max",
    "mac_style",
    "lowest_rec_ppem",
    "font_direction_hint",
    "index_to_loc_format",
    "glyph_data_format",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;
    use pretty_assertions::assert_eq;

    fn make_head(magic: u32) -> BeBuffer {
        BeBuffer::new()
            .extend([1u16, 0u16])
            .push(Fixed::from_f64(2.5))
            .extend([42u32, magic])
            .extend([16u16, 4096]) // flags, upm
            .extend([LongDateTime::new(-500), LongDateTime::new(3_600_000_000)])
            .extend([-100i16, -50, 400, 711])
            .extend([0u16, 12]) // mac_style / ppem
            .extend([2i16, 1, 0])
    }

    #[test]
    fn known_values() {
        let buf = make_head(HEAD_MAGIC_NUMBER);
        assert_eq!(buf.len(), Head::LEN);
        let head = Head::read(buf.font_data()).unwrap();
        assert_eq!(
            head,
            Head {
                version: MajorMinor::VERSION_1_0,
                font_revision: Fixed::from_f64(2.5),
                checksum_adjustment: 42,
                magic_number: HEAD_MAGIC_NUMBER,
                flags: 16,
                units_per_em: 4096,
                created: LongDateTime::new(-500),
                modified: LongDateTime::new(3_600_000_000),
                x_min: -100,
                y_min: -50,
                x_max: 400,
                y_max: 711,
                mac_style: 0,
                lowest_rec_ppem: 12,
                font_direction_hint: 2,
                index_to_loc_format: 1,
                glyph_data_format: 0,
            }
        );
        assert_eq!(head.font_revision.to_f64(), 2.5);
        assert!(head.anomalies().is_empty());
    }

    #[test]
    fn bad_magic_still_decodes() {
        let head = Head::read(make_head(0x1234_5678).font_data()).unwrap();
        assert!(!head.is_magic_valid());
        assert_eq!(head.units_per_em, 4096);
        assert_eq!(
            head.anomalies(),
            [Anomaly::IntegrityMismatch { found: 0x1234_5678 }]
        );
    }

    #[test]
    fn truncated() {
        let buf = make_head(HEAD_MAGIC_NUMBER);
        let data = FontData::new(&buf[..Head::LEN - 1]);
        assert_eq!(Head::read(data), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn traversal_labels() {
        let head = Head::read(make_head(HEAD_MAGIC_NUMBER).font_data()).unwrap();
        let table: &dyn SomeTable = &&head;
        let names: Vec<_> = table.iter().map(|field| field.name).collect();
        assert_eq!(names, FIELD_NAMES);
    }
}
