//! cmap test data for scenarios not readily produced from a glyph map

use crate::{be_buffer, bebuffer::BeBuffer};

/// One segment of a format 4 subtable.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub start: u16,
    pub end: u16,
    pub delta: i16,
    pub range_offset: u16,
}

impl Segment {
    pub const fn new(start: u16, end: u16, delta: i16, range_offset: u16) -> Self {
        Segment {
            start,
            end,
            delta,
            range_offset,
        }
    }

    /// The terminating segment every well formed subtable ends with.
    pub const TERMINATOR: Segment = Segment::new(0xFFFF, 0xFFFF, 1, 0);
}

/// Encode a format 4 subtable.
pub fn cmap4(segments: &[Segment], glyph_ids: &[u16]) -> BeBuffer {
    let seg_count = segments.len() as u16;
    let length = 16 + 8 * segments.len() + 2 * glyph_ids.len();
    be_buffer! {
        4_u16,                      // format
        length as u16,              // length
        0_u16,                      // language
        seg_count * 2,              // segCountX2
        0_u16,                      // searchRange, unused
        0_u16,                      // entrySelector, unused
        0_u16                       // rangeShift, unused
    }
    .extend(segments.iter().map(|seg| seg.end))
    .push(0_u16) // reservedPad
    .extend(segments.iter().map(|seg| seg.start))
    .extend(segments.iter().map(|seg| seg.delta))
    .extend(segments.iter().map(|seg| seg.range_offset))
    .extend(glyph_ids.iter().copied())
}

/// Wrap subtables in a cmap header; each entry is (platform, encoding, subtable).
pub fn cmap_table(subtables: &[(u16, u16, &[u8])]) -> BeBuffer {
    let header_len = 4 + 8 * subtables.len();
    let mut buf = be_buffer! { 0_u16, subtables.len() as u16 };
    let mut offset = header_len;
    for (platform, encoding, data) in subtables {
        buf = buf.push(*platform).push(*encoding).push(offset as u32);
        offset += data.len();
    }
    for (_, _, data) in subtables {
        buf = buf.extend_bytes(data);
    }
    buf
}

/// A single segment mapping 'A'..='Z' to glyphs 1..=26 with a negative
/// delta and no terminator segment.
pub fn uppercase_cmap4() -> BeBuffer {
    let subtable = cmap4(&[Segment::new(65, 90, -64, 0)], &[]);
    cmap_table(&[(3, 1, subtable.as_slice())])
}

/// Maps 'a'..='c' through the glyph id array, with 'b' left unmapped.
pub fn indirect_cmap4() -> BeBuffer {
    // idRangeOffset[0] is 4 bytes before the glyph array: itself plus
    // the terminator's entry.
    let subtable = cmap4(
        &[Segment::new(97, 99, 0, 4), Segment::TERMINATOR],
        &[7, 0, 9],
    );
    cmap_table(&[(3, 1, subtable.as_slice())])
}

/// A font with only a Macintosh Roman subtable.
pub fn mac_only_cmap() -> BeBuffer {
    let subtable = cmap4(&[Segment::new(65, 90, -64, 0)], &[]);
    cmap_table(&[(1, 0, subtable.as_slice())])
}

/// A Windows Unicode subtable in format 12, which is not supported.
pub fn format12_cmap() -> BeBuffer {
    let subtable = be_buffer! {
        12_u16,     // format
        0_u16,      // reserved
        28_u32,     // length
        0_u32,      // language
        1_u32,      // numGroups
        65_u32,     // startCharCode
        90_u32,     // endCharCode
        1_u32       // startGlyphID
    };
    cmap_table(&[(3, 1, subtable.as_slice())])
}
