//! The Horizontal/Vertical Header tables.
//!
//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
//! and [vhea](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea)
//! tables have the same structure and so we define them in the same module.
//! The axis only changes the names given to each field.

use types::{FWord, MajorMinor, UfWord};

use crate::{
    traversal::{Field, FieldType, SomeTable},
    FontData, FontReadWithArgs, ReadArgs, ReadError,
};

/// The direction of layout a metrics header describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The fields shared by `hhea` and `vhea`, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricField {
    Ascender,
    Descender,
    LineGap,
    AdvanceMax,
    MinLeadingBearing,
    MinTrailingBearing,
    MaxExtent,
    CaretSlopeRise,
    CaretSlopeRun,
    CaretOffset,
    MetricDataFormat,
    NumberOfLongMetrics,
}

// (horizontal, vertical) names, indexed by `MetricField`.
static LABELS: [(&str, &str); 12] = [
    ("ascender", "ascender"),
    ("descender", "descender"),
    ("lineGap", "lineGap"),
    ("advanceWidthMax", "advanceHeightMax"),
    ("minLeftSideBearing", "minTopSideBearing"),
    ("minRightSideBearing", "minBottomSideBearing"),
    ("xMaxExtent", "yMaxExtent"),
    ("caretSlopeRise", "caretSlopeRise"),
    ("caretSlopeRun", "caretSlopeRun"),
    ("caretOffset", "caretOffset"),
    ("metricDataFormat", "metricDataFormat"),
    ("numberOfHMetrics", "numberOfVMetrics"),
];

impl MetricField {
    pub const ALL: [MetricField; 12] = [
        MetricField::Ascender,
        MetricField::Descender,
        MetricField::LineGap,
        MetricField::AdvanceMax,
        MetricField::MinLeadingBearing,
        MetricField::MinTrailingBearing,
        MetricField::MaxExtent,
        MetricField::CaretSlopeRise,
        MetricField::CaretSlopeRun,
        MetricField::CaretOffset,
        MetricField::MetricDataFormat,
        MetricField::NumberOfLongMetrics,
    ];

    /// The name of this field in the table for `axis`.
    pub fn label(self, axis: Axis) -> &'static str {
        let (horizontal, vertical) = LABELS[self as usize];
        match axis {
            Axis::Horizontal => horizontal,
            Axis::Vertical => vertical,
        }
    }
}

/// The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
/// or [vhea](https://docs.microsoft.com/en-us/typography/opentype/spec/vhea)
/// table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HVhea {
    pub axis: Axis,
    /// The major/minor version (1, 0)
    pub version: MajorMinor,
    /// Typographic ascent.
    pub ascender: FWord,
    /// Typographic descent.
    pub descender: FWord,
    /// Typographic line gap. Negative values are treated as zero.
    pub line_gap: FWord,
    /// Maximum advance width or height value in 'hmtx'/'vmtx' table.
    pub advance_max: UfWord,
    /// Minimum left or top sidebearing value.
    pub min_leading_bearing: FWord,
    /// Minimum right or bottom sidebearing value.
    pub min_trailing_bearing: FWord,
    /// Max of leading bearing plus the glyph's extent.
    pub max_extent: FWord,
    /// Used to calculate the slope of the caret (rise/run); 1 for vertical caret.
    pub caret_slope_rise: i16,
    /// 0 for vertical caret, 1 for horizontal.
    pub caret_slope_run: i16,
    /// The amount by which a slanted highlight on a glyph needs to be shifted
    /// to produce the best appearance. Set to 0 for non-slanted fonts.
    pub caret_offset: i16,
    /// 0 for current format.
    pub metric_data_format: i16,
    /// Number of LongMetric entries in the 'hmtx'/'vmtx' table.
    pub number_of_long_metrics: u16,
}

impl HVhea {
    /// The encoded size of the table.
    pub const LEN: usize = 36;

    /// The value of `field`, widened to an `i32`.
    pub fn get(&self, field: MetricField) -> i32 {
        match field {
            MetricField::Ascender => self.ascender.to_i16().into(),
            MetricField::Descender => self.descender.to_i16().into(),
            MetricField::LineGap => self.line_gap.to_i16().into(),
            MetricField::AdvanceMax => self.advance_max.to_u16().into(),
            MetricField::MinLeadingBearing => self.min_leading_bearing.to_i16().into(),
            MetricField::MinTrailingBearing => self.min_trailing_bearing.to_i16().into(),
            MetricField::MaxExtent => self.max_extent.to_i16().into(),
            MetricField::CaretSlopeRise => self.caret_slope_rise.into(),
            MetricField::CaretSlopeRun => self.caret_slope_run.into(),
            MetricField::CaretOffset => self.caret_offset.into(),
            MetricField::MetricDataFormat => self.metric_data_format.into(),
            MetricField::NumberOfLongMetrics => self.number_of_long_metrics.into(),
        }
    }

    /// Each field with its axis-specific label, in table order.
    pub fn labelled_values(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        MetricField::ALL
            .into_iter()
            .map(|field| (field.label(self.axis), self.get(field)))
    }

    /// Read the table for the given axis.
    pub fn read(data: FontData, axis: Axis) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let ascender = cursor.read()?;
        let descender = cursor.read()?;
        let line_gap = cursor.read()?;
        let advance_max = cursor.read()?;
        let min_leading_bearing = cursor.read()?;
        let min_trailing_bearing = cursor.read()?;
        let max_extent = cursor.read()?;
        let caret_slope_rise = cursor.read()?;
        let caret_slope_run = cursor.read()?;
        let caret_offset = cursor.read()?;
        // reserved
        cursor.advance_by(8);
        let metric_data_format = cursor.read()?;
        let number_of_long_metrics = cursor.read()?;
        Ok(HVhea {
            axis,
            version,
            ascender,
            descender,
            line_gap,
            advance_max,
            min_leading_bearing,
            min_trailing_bearing,
            max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            metric_data_format,
            number_of_long_metrics,
        })
    }
}

impl ReadArgs for HVhea {
    type Args = Axis;
}

impl<'a> FontReadWithArgs<'a> for HVhea {
    fn read_with_args(data: FontData<'a>, args: &Axis) -> Result<Self, ReadError> {
        HVhea::read(data, *args)
    }
}

impl<'a> SomeTable<'a> for &'a HVhea {
    fn type_name(&self) -> &str {
        match self.axis {
            Axis::Horizontal => "Hhea",
            Axis::Vertical => "Vhea",
        }
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        if idx == 0 {
            return Some(Field::new("version", self.version));
        }
        let field = *MetricField::ALL.get(idx - 1)?;
        let value: FieldType = match field {
            MetricField::Ascender => self.ascender.into(),
            MetricField::Descender => self.descender.into(),
            MetricField::LineGap => self.line_gap.into(),
            MetricField::AdvanceMax => self.advance_max.into(),
            MetricField::MinLeadingBearing => self.min_leading_bearing.into(),
            MetricField::MinTrailingBearing => self.min_trailing_bearing.into(),
            MetricField::MaxExtent => self.max_extent.into(),
            MetricField::CaretSlopeRise => self.caret_slope_rise.into(),
            MetricField::CaretSlopeRun => self.caret_slope_run.into(),
            MetricField::CaretOffset => self.caret_offset.into(),
            MetricField::MetricDataFormat => self.metric_data_format.into(),
            MetricField::NumberOfLongMetrics => self.number_of_long_metrics.into(),
        };
        Some(Field {
            name: field.label(self.axis),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn make_hvhea() -> BeBuffer {
        BeBuffer::new()
            .extend([1u16, 0]) // version
            .extend([800i16, -200, 90]) // ascender, descender, line gap
            .push(1200u16) // advance max
            .extend([-50i16, -60, 1100]) // bearings, extent
            .extend([1i16, 0, 0]) // caret
            .extend([0u16; 4]) // reserved
            .push(0i16)
            .push(258u16)
    }

    #[test]
    fn both_axes_decode_identically() {
        let buf = make_hvhea();
        assert_eq!(buf.len(), HVhea::LEN);
        let hhea = HVhea::read(buf.font_data(), Axis::Horizontal).unwrap();
        let vhea = HVhea::read_with_args(buf.font_data(), &Axis::Vertical).unwrap();
        assert_eq!(hhea.descender, FWord::new(-200));
        assert_eq!(hhea.min_trailing_bearing, FWord::new(-60));
        assert_eq!(hhea.number_of_long_metrics, 258);
        let values: Vec<_> = hhea.labelled_values().map(|(_, v)| v).collect();
        let vvalues: Vec<_> = vhea.labelled_values().map(|(_, v)| v).collect();
        assert_eq!(values, vvalues);
        assert_eq!(values[3], 1200);
    }

    #[test]
    fn axis_labels() {
        assert_eq!(MetricField::AdvanceMax.label(Axis::Horizontal), "advanceWidthMax");
        assert_eq!(MetricField::AdvanceMax.label(Axis::Vertical), "advanceHeightMax");
        assert_eq!(
            MetricField::MinLeadingBearing.label(Axis::Vertical),
            "minTopSideBearing"
        );
        assert_eq!(MetricField::MaxExtent.label(Axis::Vertical), "yMaxExtent");
        assert_eq!(
            MetricField::NumberOfLongMetrics.label(Axis::Vertical),
            "numberOfVMetrics"
        );
    }

    // each vertical label is the horizontal one with the fixed word
    // substitutions applied.
    #[test]
    fn vertical_labels_follow_translation() {
        const SUBSTITUTIONS: [(&str, &str); 5] = [
            ("Width", "Height"),
            ("Left", "Top"),
            ("Right", "Bottom"),
            ("HMetrics", "VMetrics"),
            ("xMax", "yMax"),
        ];
        for field in MetricField::ALL {
            let translated = SUBSTITUTIONS
                .iter()
                .fold(field.label(Axis::Horizontal).to_string(), |label, (h, v)| {
                    label.replace(h, v)
                });
            assert_eq!(translated, field.label(Axis::Vertical));
        }
    }

    #[test]
    fn reserved_bytes_are_required() {
        let buf = make_hvhea();
        let data = FontData::new(&buf[..HVhea::LEN - 2]);
        assert_eq!(
            HVhea::read(data, Axis::Horizontal),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn traversal_uses_axis_labels() {
        let vhea = HVhea::read(make_hvhea().font_data(), Axis::Vertical).unwrap();
        let table: &dyn SomeTable = &&vhea;
        assert_eq!(table.type_name(), "Vhea");
        let names: Vec<_> = table.iter().map(|field| field.name).collect();
        assert_eq!(names.len(), 13);
        assert_eq!(names[4], "advanceHeightMax");
        assert_eq!(names[12], "numberOfVMetrics");
    }
}
