//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use types::{GlyphId, Scalar, Tag};

use crate::{
    array::BeArray, FontData, FontReadWithArgs, ReadArgs, ReadError, TopLevelTable,
};

/// An advance width and left side bearing pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LongMetric {
    pub advance: u16,
    pub side_bearing: i16,
}

impl Scalar for LongMetric {
    type Raw = [u8; 4];

    fn from_raw(raw: Self::Raw) -> Self {
        LongMetric {
            advance: u16::from_be_bytes([raw[0], raw[1]]),
            side_bearing: i16::from_be_bytes([raw[2], raw[3]]),
        }
    }

    fn to_raw(self) -> Self::Raw {
        let [a, b] = self.advance.to_be_bytes();
        let [c, d] = self.side_bearing.to_be_bytes();
        [a, b, c, d]
    }
}

/// The hmtx table.
#[derive(Clone, Debug)]
pub struct Hmtx<'a> {
    h_metrics: BeArray<'a, LongMetric>,
    left_side_bearings: BeArray<'a, i16>,
}

impl TopLevelTable for Hmtx<'_> {
    const TAG: Tag = Tag::new(b"hmtx");
}

impl<'a> Hmtx<'a> {
    /// Read the table, given `numberOfHMetrics` from hhea and `numGlyphs`
    /// from maxp.
    pub fn read(
        data: FontData<'a>,
        number_of_h_metrics: u16,
        num_glyphs: u16,
    ) -> Result<Self, ReadError> {
        Self::read_with_args(data, &(number_of_h_metrics, num_glyphs))
    }

    /// The long metrics.
    pub fn h_metrics(&self) -> BeArray<'a, LongMetric> {
        self.h_metrics
    }

    /// Side bearings for glyphs past the end of the long metrics.
    pub fn left_side_bearings(&self) -> BeArray<'a, i16> {
        self.left_side_bearings
    }

    /// The metrics for a glyph.
    ///
    /// Glyphs beyond the long metrics share the last advance width and read
    /// their side bearing from the trailing array.
    pub fn metric(&self, gid: GlyphId) -> Option<LongMetric> {
        let idx = gid.to_u16() as usize;
        if let Some(metric) = self.h_metrics.get(idx) {
            return Some(metric);
        }
        let advance = self.h_metrics.last()?.advance;
        let side_bearing = self.left_side_bearings.get(idx - self.h_metrics.len())?;
        Some(LongMetric {
            advance,
            side_bearing,
        })
    }

    pub fn advance(&self, gid: GlyphId) -> Option<u16> {
        self.metric(gid).map(|metric| metric.advance)
    }

    pub fn side_bearing(&self, gid: GlyphId) -> Option<i16> {
        self.metric(gid).map(|metric| metric.side_bearing)
    }
}

impl ReadArgs for Hmtx<'_> {
    type Args = (u16, u16);
}

impl<'a> FontReadWithArgs<'a> for Hmtx<'a> {
    fn read_with_args(data: FontData<'a>, args: &(u16, u16)) -> Result<Self, ReadError> {
        let (number_of_h_metrics, num_glyphs) = *args;
        let n_long = number_of_h_metrics as usize;
        // trailing glyphs take their advance from the last long metric
        if n_long == 0 && num_glyphs > 0 {
            return Err(ReadError::MalformedData("hmtx has no long metrics"));
        }
        let n_short = (num_glyphs as usize).saturating_sub(n_long);
        let mut cursor = data.cursor();
        let h_metrics = cursor.read_array(n_long)?;
        let left_side_bearings = cursor.read_array(n_short)?;
        Ok(Hmtx {
            h_metrics,
            left_side_bearings,
        })
    }
}
