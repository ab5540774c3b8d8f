//! The [head (Font Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{BoundingBox, FontStyle, HeadFlags, MajorMinor, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The head table.
#[derive(Clone, Debug)]
pub struct Head<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Head<'_> {
    const TAG: Tag = Tag::new(b"head");
}

impl Head<'_> {
    const MIN_LEN: usize = 54;

    // Every field access is in bounds, checked in `read`.
    fn field<T: types::Scalar + Default>(&self, offset: usize) -> T {
        self.data.read_at(offset).unwrap_or_default()
    }

    /// Version number of the font header table, set to (1, 0)
    pub fn version(&self) -> MajorMinor {
        self.field(0)
    }

    /// Set by font manufacturer.
    pub fn font_revision(&self) -> MajorMinor {
        self.field(4)
    }

    pub fn magic_number(&self) -> u32 {
        self.field(12)
    }

    /// The raw `flags` field.
    pub fn raw_flags(&self) -> u16 {
        self.field(16)
    }

    /// The baseline, side bearing and scaling flags.
    pub fn flags(&self) -> HeadFlags {
        HeadFlags::from_head_flags(self.raw_flags())
    }

    /// Set to a value from 16 to 16384. Any value in this range is valid.
    /// In fonts that have TrueType outlines, a power of 2 is recommended
    /// as this allows performance optimization in some rasterizers.
    pub fn units_per_em(&self) -> u16 {
        self.field(18)
    }

    /// The bounding box of all glyphs.
    pub fn bounding_box(&self) -> BoundingBox<i16> {
        BoundingBox {
            x_min: self.field(36),
            y_min: self.field(38),
            x_max: self.field(40),
            y_max: self.field(42),
        }
    }

    /// The raw `macStyle` field.
    pub fn raw_mac_style(&self) -> u16 {
        self.field(44)
    }

    pub fn mac_style(&self) -> FontStyle {
        FontStyle::from_mac_style(self.raw_mac_style())
    }

    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub fn index_to_loc_format(&self) -> i16 {
        self.field(50)
    }
}

impl<'a> FontRead<'a> for Head<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        if data.len() < Self::MIN_LEN {
            return Err(ReadError::OutOfBounds);
        }
        Ok(Head { data })
    }
}
