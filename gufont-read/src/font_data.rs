//! raw font bytes

use std::ops::{Range, RangeBounds};

use types::Scalar;

use crate::array::BeArray;
use crate::read::{FontReadWithArgs, ReadError};

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
///
/// Every read is bounds checked and advances the cursor, so reading a
/// sequence of fields reads like the table layout.
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns self[pos..]
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Like [`slice`](Self::slice), but returns [`ReadError::OutOfBounds`]
    /// instead of `None`.
    pub fn expect_slice(&self, range: impl RangeBounds<usize>) -> Result<FontData<'a>, ReadError> {
        self.slice(range).ok_or(ReadError::OutOfBounds)
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..offset.saturating_add(T::RAW_BYTE_LEN))
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn read_with_args<T>(&self, range: Range<usize>, args: &T::Args) -> Result<T, ReadError>
    where
        T: FontReadWithArgs<'a>,
    {
        self.slice(range)
            .ok_or(ReadError::OutOfBounds)
            .and_then(|data| T::read_with_args(data, args))
    }

    /// Interpret the bytes in `range` as an array of big-endian scalars.
    pub fn read_array<T: Scalar>(&self, range: Range<usize>) -> Result<BeArray<'a, T>, ReadError> {
        let bytes = self
            .bytes
            .get(range.start..range.end)
            .ok_or(ReadError::OutOfBounds)?;
        if bytes.len() % T::RAW_BYTE_LEN != 0 {
            return Err(ReadError::MalformedData(
                "array length not a multiple of item size",
            ));
        }
        Ok(BeArray::new(bytes))
    }

    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    /// Read `len` consecutive scalars.
    pub fn read_array<T: Scalar>(&mut self, len: usize) -> Result<BeArray<'a, T>, ReadError> {
        let end = len
            .checked_mul(T::RAW_BYTE_LEN)
            .and_then(|n_bytes| n_bytes.checked_add(self.pos))
            .ok_or(ReadError::OutOfBounds)?;
        let temp = self.data.read_array(self.pos..end);
        self.pos = end;
        temp
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        self.read_array::<u8>(len).map(|_| ())?;
        let end = self.pos;
        Ok(&self.data.bytes[end - len..end])
    }

    /// return the current position, or an error if we are out of bounds
    pub fn position(&self) -> Result<usize, ReadError> {
        self.data.check_in_bounds(self.pos).map(|_| self.pos)
    }

    /// The bytes after the current position.
    pub fn remaining(&self) -> Option<FontData<'a>> {
        self.data.split_off(self.pos)
    }

    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl<'a> FontData<'a> {
    fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

impl<'a> From<&'a Vec<u8>> for FontData<'a> {
    fn from(src: &'a Vec<u8>) -> FontData<'a> {
        FontData::new(src.as_slice())
    }
}
