//! Traits for interpreting font data

use types::{NameId, Tag};

use crate::font_data::FontData;

/// Parsing a value from table bytes alone.
///
/// Tables whose layout depends on other tables implement
/// [`FontReadWithArgs`] instead.
pub trait FontRead<'a>: Sized {
    /// Parse `data`, checking that every fixed size header and array it
    /// declares is present.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// The arguments a [`FontReadWithArgs`] type is parsed with.
pub trait ReadArgs {
    type Args: Copy;
}

/// Parsing a value whose layout is described by other tables.
///
/// `hmtx` needs the metric and glyph counts from `hhea` and `maxp`; `loca`
/// needs the offset format from `head`.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

/// Why a font could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    OutOfBounds,
    InvalidSfnt(u32),
    TableIsMissing(Tag),
    UnsupportedCmapFormat(u16),
    MissingUnicodeCmap,
    MalformedNameTable(NameId),
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset or length points past the end of the data"),
            ReadError::InvalidSfnt(ver) => write!(f, "Invalid sfnt version 0x{ver:08X}"),
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::UnsupportedCmapFormat(format) => {
                write!(f, "cmap subtable format {format} is not supported")
            }
            ReadError::MissingUnicodeCmap => {
                write!(f, "the cmap table has no Windows Unicode BMP subtable")
            }
            ReadError::MalformedNameTable(name_id) => {
                write!(f, "the name table has no Windows English {name_id} record")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

impl std::error::Error for ReadError {}
