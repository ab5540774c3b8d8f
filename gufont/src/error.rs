//! Errors that occur while converting, writing or loading

use std::fmt;

use crate::read::ReadError;

/// An error from reading a TrueType font or a gufont file.
#[derive(Debug)]
pub enum Error {
    /// The TrueType font could not be parsed.
    Read(ReadError),
    Io(std::io::Error),
    /// The file doesn't start with the gufont magic.
    BadMagic([u8; 6]),
    /// A gufont file or font model is inconsistent.
    Validation(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "Failed to read font: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::BadMagic(magic) => {
                write!(f, "Not a gufont file (magic {:?})", String::from_utf8_lossy(magic))
            }
            Error::Validation(what) => write!(f, "Invalid gufont data: {what}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Error::Read(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
