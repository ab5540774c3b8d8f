//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use types::{GlyphId, Tag};

use crate::{
    array::BeArray,
    read::{FontReadWithArgs, ReadArgs, ReadError},
    FontData, TopLevelTable,
};

/// The [loca] table.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug)]
pub enum Loca<'a> {
    Short(BeArray<'a, u16>),
    Long(BeArray<'a, u32>),
}

impl TopLevelTable for Loca<'_> {
    const TAG: Tag = Tag::new(b"loca");
}

impl<'a> Loca<'a> {
    pub fn read(data: FontData<'a>, is_long: bool) -> Result<Self, ReadError> {
        Self::read_with_args(data, &is_long)
    }

    /// The number of glyphs described by the table.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to return the offset for a given glyph id.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x as u32 * 2),
            Loca::Long(data) => data.get(idx),
        }
    }

    /// The range of the glyph in the glyf table, or `None` if the glyph
    /// has no outline.
    ///
    /// A range is empty whenever its end does not lie past its start.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Option<Range<usize>>, ReadError> {
        let idx = gid.to_u16() as usize;
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)?;
        if end <= start {
            return Ok(None);
        }
        Ok(Some(start as usize..end as usize))
    }
}

impl ReadArgs for Loca<'_> {
    type Args = bool;
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let is_long = *args;
        if is_long {
            data.read_array(0..data.len()).map(Loca::Long)
        } else {
            data.read_array(0..data.len()).map(Loca::Short)
        }
    }
}
