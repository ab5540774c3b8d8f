//! The [hhea (Horizontal Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::Tag;

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The hhea table.
#[derive(Clone, Debug)]
pub struct Hhea<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Hhea<'_> {
    const TAG: Tag = Tag::new(b"hhea");
}

impl Hhea<'_> {
    const MIN_LEN: usize = 36;

    fn field<T: types::Scalar + Default>(&self, offset: usize) -> T {
        self.data.read_at(offset).unwrap_or_default()
    }

    /// Typographic ascent.
    pub fn ascender(&self) -> i16 {
        self.field(4)
    }

    /// Typographic descent.
    pub fn descender(&self) -> i16 {
        self.field(6)
    }

    /// Typographic line gap.
    pub fn line_gap(&self) -> i16 {
        self.field(8)
    }

    /// Maximum advance width value in the `hmtx` table.
    pub fn advance_width_max(&self) -> u16 {
        self.field(10)
    }

    /// Number of long metrics in the `hmtx` table.
    pub fn number_of_h_metrics(&self) -> u16 {
        self.field(34)
    }
}

impl<'a> FontRead<'a> for Hhea<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        if data.len() < Self::MIN_LEN {
            return Err(ReadError::OutOfBounds);
        }
        Ok(Hhea { data })
    }
}
