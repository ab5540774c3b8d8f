//! The table directory and in-memory fonts

use types::{Scalar, Tag};

use crate::{array::BeArray, FontData, FontRead, ReadError, TableProvider};

/// A record in the [table directory].
///
/// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: Tag,
    /// Checksum for the table.
    pub checksum: u32,
    /// Offset from the beginning of the font data.
    pub offset: u32,
    /// Length of the table.
    pub length: u32,
}

impl Scalar for TableRecord {
    type Raw = [u8; 16];

    fn from_raw(raw: Self::Raw) -> Self {
        let word = |i: usize| [raw[i], raw[i + 1], raw[i + 2], raw[i + 3]];
        TableRecord {
            tag: Tag::from_be_bytes(word(0)),
            checksum: u32::from_be_bytes(word(4)),
            offset: u32::from_be_bytes(word(8)),
            length: u32::from_be_bytes(word(12)),
        }
    }

    fn to_raw(self) -> Self::Raw {
        let mut raw = [0u8; 16];
        raw[..4].copy_from_slice(&self.tag.to_be_bytes());
        raw[4..8].copy_from_slice(&self.checksum.to_be_bytes());
        raw[8..12].copy_from_slice(&self.offset.to_be_bytes());
        raw[12..].copy_from_slice(&self.length.to_be_bytes());
        raw
    }
}

/// The [table directory] at the start of an sfnt.
///
/// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Clone, Debug)]
pub struct TableDirectory<'a> {
    sfnt_version: u32,
    table_records: BeArray<'a, TableRecord>,
}

impl<'a> TableDirectory<'a> {
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn num_tables(&self) -> u16 {
        self.table_records.len() as u16
    }

    pub fn table_records(&self) -> BeArray<'a, TableRecord> {
        self.table_records
    }

    fn is_sorted(&self) -> bool {
        let mut last_tag = Tag::new(&[0u8; 4]);
        for tag in self.table_records.iter().map(|rec| rec.tag) {
            if tag <= last_tag {
                return false;
            }
            last_tag = tag;
        }
        true
    }
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version: u32 = cursor.read()?;
        if sfnt_version != types::TT_SFNT_VERSION && sfnt_version != types::TRUE_SFNT_VERSION {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        let num_tables: u16 = cursor.read()?;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            table_records,
        })
    }
}

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    table_directory: TableDirectory<'a>,
    // Fonts are required to have a sorted table directory, but certain fonts
    // don't follow that requirement; those are searched linearly.
    table_directory_sorted: bool,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must begin with a TrueType [table directory] to be considered
    /// valid.
    ///
    /// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let table_directory = TableDirectory::read(data)?;
        let table_directory_sorted = table_directory.is_sorted();
        Ok(FontRef {
            data,
            table_directory,
            table_directory_sorted,
        })
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// Returns the data for the table with the specified tag, if present.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let records = self.table_directory.table_records();
        let entry = if self.table_directory_sorted {
            let (mut lo, mut hi) = (0, records.len());
            let mut found = None;
            while lo < hi {
                let mid = (lo + hi) / 2;
                let record = records.get(mid)?;
                match record.tag.cmp(&tag) {
                    std::cmp::Ordering::Less => lo = mid + 1,
                    std::cmp::Ordering::Greater => hi = mid,
                    std::cmp::Ordering::Equal => {
                        found = Some(record);
                        break;
                    }
                }
            }
            found
        } else {
            records.iter().find(|record| record.tag == tag)
        }?;
        let start = entry.offset as usize;
        self.data
            .slice(start..start.checked_add(entry.length as usize)?)
    }

    /// Returns the tags of all tables in the directory.
    pub fn table_tags(&self) -> impl Iterator<Item = Tag> + 'a {
        self.table_directory.table_records().iter().map(|rec| rec.tag)
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }
}
