//! The [maxp (Maximum Profile)](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::Tag;

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The maxp table.
///
/// Only the glyph count is read; the version 1.0 limits are for hinting.
#[derive(Clone, Debug)]
pub struct Maxp<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Maxp<'_> {
    const TAG: Tag = Tag::new(b"maxp");
}

impl Maxp<'_> {
    /// The version of the table, 0x00005000 or 0x00010000.
    pub fn version(&self) -> u32 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }
}

impl<'a> FontRead<'a> for Maxp<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        if data.len() < 6 {
            return Err(ReadError::OutOfBounds);
        }
        Ok(Maxp { data })
    }
}
