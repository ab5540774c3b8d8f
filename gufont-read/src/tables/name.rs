//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use types::{NameId, Scalar, Tag};

use crate::{array::BeArray, FontData, FontRead, ReadError, TopLevelTable};

/// The Windows platform.
pub const PLATFORM_WINDOWS: u16 = 3;
/// Unicode BMP encoding on the Windows platform.
pub const ENCODING_UNICODE_BMP: u16 = 1;
/// The en-US language id.
pub const LANGUAGE_EN_US: u16 = 0x0409;

/// A record in the name table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    /// String length (in bytes).
    pub length: u16,
    /// String offset from start of storage area (in bytes).
    pub string_offset: u16,
}

impl NameRecord {
    /// `true` for Windows, Unicode BMP, en-US records.
    pub fn is_windows_english(&self) -> bool {
        self.platform_id == PLATFORM_WINDOWS
            && self.encoding_id == ENCODING_UNICODE_BMP
            && self.language_id == LANGUAGE_EN_US
    }
}

impl Scalar for NameRecord {
    type Raw = [u8; 12];

    fn from_raw(raw: Self::Raw) -> Self {
        let word = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
        NameRecord {
            platform_id: word(0),
            encoding_id: word(2),
            language_id: word(4),
            name_id: NameId::new(word(6)),
            length: word(8),
            string_offset: word(10),
        }
    }

    fn to_raw(self) -> Self::Raw {
        let mut raw = [0u8; 12];
        let fields = [
            self.platform_id,
            self.encoding_id,
            self.language_id,
            self.name_id.to_u16(),
            self.length,
            self.string_offset,
        ];
        for (chunk, field) in raw.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        raw
    }
}

/// The name table.
#[derive(Clone, Debug)]
pub struct Name<'a> {
    data: FontData<'a>,
    storage_offset: u16,
    name_records: BeArray<'a, NameRecord>,
}

impl TopLevelTable for Name<'_> {
    const TAG: Tag = Tag::new(b"name");
}

impl<'a> Name<'a> {
    pub fn name_records(&self) -> BeArray<'a, NameRecord> {
        self.name_records
    }

    /// The raw bytes of the string for a record.
    pub fn string_data(&self, record: &NameRecord) -> Result<&'a [u8], ReadError> {
        let start = self.storage_offset as usize + record.string_offset as usize;
        let end = start + record.length as usize;
        self.data
            .slice(start..end)
            .map(|data| data.as_bytes())
            .ok_or(ReadError::OutOfBounds)
    }

    /// The first Windows, Unicode BMP, en-US string for `name_id`.
    ///
    /// Returns [`ReadError::MalformedNameTable`] if there is no such record.
    pub fn windows_english(&self, name_id: NameId) -> Result<String, ReadError> {
        let record = self
            .name_records
            .iter()
            .find(|record| record.name_id == name_id && record.is_windows_english())
            .ok_or(ReadError::MalformedNameTable(name_id))?;
        let bytes = self.string_data(&record)?;
        Ok(decode_utf16be(bytes))
    }
}

/// Decode UTF-16BE, replacing unpaired surrogates.
///
/// A trailing odd byte is ignored.
pub fn decode_utf16be(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

impl<'a> FontRead<'a> for Name<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _version: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let storage_offset: u16 = cursor.read()?;
        let name_records = cursor.read_array(count as usize)?;
        Ok(Name {
            data,
            storage_offset,
            name_records,
        })
    }
}
