//! The [cmap (Character to Glyph Index Mapping)](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table
//!
//! Only format 4 subtables are read.

use std::collections::BTreeMap;

use types::{GlyphId, Scalar, Tag};

use crate::{array::BeArray, FontData, FontRead, ReadError, TopLevelTable};

/// An encoding record selecting a subtable for a platform and encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Byte offset from the beginning of the table to the subtable.
    pub subtable_offset: u32,
}

impl Scalar for EncodingRecord {
    type Raw = [u8; 8];

    fn from_raw(raw: Self::Raw) -> Self {
        EncodingRecord {
            platform_id: u16::from_be_bytes([raw[0], raw[1]]),
            encoding_id: u16::from_be_bytes([raw[2], raw[3]]),
            subtable_offset: u32::from_be_bytes([raw[4], raw[5], raw[6], raw[7]]),
        }
    }

    fn to_raw(self) -> Self::Raw {
        let mut raw = [0u8; 8];
        raw[..2].copy_from_slice(&self.platform_id.to_be_bytes());
        raw[2..4].copy_from_slice(&self.encoding_id.to_be_bytes());
        raw[4..].copy_from_slice(&self.subtable_offset.to_be_bytes());
        raw
    }
}

/// The cmap table.
#[derive(Clone, Debug)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    encoding_records: BeArray<'a, EncodingRecord>,
}

impl TopLevelTable for Cmap<'_> {
    const TAG: Tag = Tag::new(b"cmap");
}

impl<'a> Cmap<'a> {
    pub fn encoding_records(&self) -> BeArray<'a, EncodingRecord> {
        self.encoding_records
    }

    /// The format of the subtable for a record.
    pub fn subtable_format(&self, record: &EncodingRecord) -> Result<u16, ReadError> {
        self.data.read_at(record.subtable_offset as usize)
    }

    /// The first Windows Unicode BMP (platform 3, encoding 1) subtable.
    ///
    /// Fails with [`ReadError::MissingUnicodeCmap`] if there is none, or with
    /// [`ReadError::UnsupportedCmapFormat`] if it isn't format 4.
    pub fn windows_unicode(&self) -> Result<Cmap4<'a>, ReadError> {
        let record = self
            .encoding_records
            .iter()
            .find(|record| record.platform_id == 3 && record.encoding_id == 1)
            .ok_or(ReadError::MissingUnicodeCmap)?;
        let format = self.subtable_format(&record)?;
        if format != 4 {
            return Err(ReadError::UnsupportedCmapFormat(format));
        }
        self.data
            .split_off(record.subtable_offset as usize)
            .ok_or(ReadError::OutOfBounds)
            .and_then(Cmap4::read)
    }
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _version: u16 = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let encoding_records = cursor.read_array(num_tables as usize)?;
        Ok(Cmap {
            data,
            encoding_records,
        })
    }
}

/// A [format 4] subtable: segment mapping to delta values.
///
/// [format 4]: https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
#[derive(Clone, Debug)]
pub struct Cmap4<'a> {
    end_code: BeArray<'a, u16>,
    start_code: BeArray<'a, u16>,
    id_delta: BeArray<'a, i16>,
    id_range_offsets: BeArray<'a, u16>,
    glyph_id_array: BeArray<'a, u16>,
}

impl<'a> Cmap4<'a> {
    /// The number of segments.
    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        if codepoint > 0xFFFF {
            return None;
        }
        let codepoint = codepoint as u16;
        let mut lo = 0;
        let mut hi = self.seg_count();
        while lo < hi {
            let i = (lo + hi) / 2;
            let start_code = self.start_code.get(i)?;
            if codepoint < start_code {
                hi = i;
            } else if codepoint > self.end_code.get(i)? {
                lo = i + 1;
            } else {
                return self.lookup_glyph_id(codepoint, i, start_code);
            }
        }
        None
    }

    /// Decode every segment into a character to glyph map.
    ///
    /// The 0xFFFF terminator segment is skipped, as are characters that map
    /// to glyph 0 through the glyph id array. Later segments never override
    /// an earlier mapping.
    pub fn char_map(&self) -> BTreeMap<u16, GlyphId> {
        let mut map = BTreeMap::new();
        for i in 0..self.seg_count() {
            let (Some(start), Some(end)) = (self.start_code.get(i), self.end_code.get(i)) else {
                break;
            };
            if start == 0xFFFF && end == 0xFFFF {
                continue;
            }
            if end < start {
                log::warn!("cmap segment {i} ends ({end}) before it starts ({start})");
                continue;
            }
            for codepoint in start..=end {
                if let Some(gid) = self.lookup_glyph_id(codepoint, i, start) {
                    map.entry(codepoint).or_insert(gid);
                }
            }
        }
        map
    }

    /// Does the final phase of glyph id lookup.
    ///
    /// Shared between [`map_codepoint`](Self::map_codepoint) and
    /// [`char_map`](Self::char_map).
    fn lookup_glyph_id(&self, codepoint: u16, index: usize, start_code: u16) -> Option<GlyphId> {
        let delta = self.id_delta.get(index)? as i32;
        let range_offset = self.id_range_offsets.get(index)? as usize;
        if range_offset == 0 {
            return Some(GlyphId::new((codepoint as i32 + delta) as u16));
        }
        let offset = (range_offset / 2 + (codepoint - start_code) as usize + index)
            .checked_sub(self.seg_count())?;
        let gid = self.glyph_id_array.get(offset)?;
        (gid != 0).then_some(GlyphId::new((gid as i32 + delta) as u16))
    }
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != 4 {
            return Err(ReadError::UnsupportedCmapFormat(format));
        }
        let length: u16 = cursor.read()?;
        let _language: u16 = cursor.read()?;
        let seg_count_x2: u16 = cursor.read()?;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let seg_count = seg_count_x2 as usize / 2;
        let end_code = cursor.read_array(seg_count)?;
        let _reserved_pad: u16 = cursor.read()?;
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets = cursor.read_array(seg_count)?;
        // the glyph id array runs to the end of the subtable; some fonts
        // have a bogus length, so fall back to the end of the data
        let pos = cursor.position()?;
        let end = (length as usize).clamp(pos, data.len());
        let glyph_id_array = data.read_array(pos..end - (end - pos) % 2)?;
        Ok(Cmap4 {
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            glyph_id_array,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gufont_test_data::cmap;
    use pretty_assertions::assert_eq;

    fn read_cmap(buf: &[u8]) -> Result<Cmap4<'_>, ReadError> {
        Cmap::read(FontData::new(buf))?.windows_unicode()
    }

    #[test]
    fn single_segment_with_negative_delta() {
        let buf = cmap::uppercase_cmap4();
        let subtable = read_cmap(&buf).unwrap();
        let map = subtable.char_map();
        assert_eq!(map.len(), 26);
        assert_eq!(map.get(&(b'A' as u16)), Some(&GlyphId::new(1)));
        assert_eq!(map.get(&(b'Z' as u16)), Some(&GlyphId::new(26)));
        assert_eq!(subtable.map_codepoint('M'), Some(GlyphId::new(13)));
        assert_eq!(subtable.map_codepoint('a'), None);
    }

    #[test]
    fn indirect_lookup_skips_zero() {
        let buf = cmap::indirect_cmap4();
        let subtable = read_cmap(&buf).unwrap();
        let map: Vec<_> = subtable
            .char_map()
            .into_iter()
            .map(|(c, gid)| (c, gid.to_u16()))
            .collect();
        assert_eq!(map, vec![(97, 7), (99, 9)]);
        assert_eq!(subtable.map_codepoint('b'), None);
    }

    #[test]
    fn delta_wraps_modulo_65536() {
        let sub = cmap::cmap4(
            &[
                cmap::Segment::new(0xFFF0, 0xFFF1, 0x20, 0),
                cmap::Segment::TERMINATOR,
            ],
            &[],
        );
        let buf = cmap::cmap_table(&[(3, 1, sub.as_slice())]);
        let map = read_cmap(&buf).unwrap().char_map();
        assert_eq!(map.get(&0xFFF0), Some(&GlyphId::new(0x10)));
        assert_eq!(map.get(&0xFFF1), Some(&GlyphId::new(0x11)));
        assert!(!map.contains_key(&0xFFFF));
    }

    #[test]
    fn no_windows_unicode_subtable() {
        let buf = cmap::mac_only_cmap();
        assert_eq!(read_cmap(&buf).err(), Some(ReadError::MissingUnicodeCmap));
    }

    #[test]
    fn unsupported_format() {
        let buf = cmap::format12_cmap();
        assert_eq!(
            read_cmap(&buf).err(),
            Some(ReadError::UnsupportedCmapFormat(12))
        );
    }
}
