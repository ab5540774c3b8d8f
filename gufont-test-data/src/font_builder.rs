//! Assembling synthetic TrueType fonts.

use std::collections::BTreeMap;

use gufont_types::Tag;

use crate::{be_buffer, bebuffer::BeBuffer, cmap, glyphs::Point};

/// Collects table data and writes an sfnt with a sorted table directory.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl FontBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add (or replace) a table.
    pub fn add_table(&mut self, tag: Tag, data: impl Into<Vec<u8>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Remove a table, returning its data.
    pub fn remove_table(&mut self, tag: Tag) -> Option<Vec<u8>> {
        self.tables.remove(&tag)
    }

    pub fn build(&self) -> Vec<u8> {
        let num_tables = self.tables.len() as u16;
        let entry_selector = (num_tables as f32).log2().floor() as u16;
        let search_range = 2u16.pow(entry_selector as u32) * 16;
        let range_shift = (num_tables * 16).saturating_sub(search_range);

        let mut header = be_buffer! {
            gufont_types::TT_SFNT_VERSION,
            num_tables,
            search_range,
            entry_selector,
            range_shift
        };
        let mut body = BeBuffer::new();
        let body_start = 12 + 16 * self.tables.len();
        for (tag, data) in &self.tables {
            let offset = body_start + body.len();
            header = header
                .push(*tag)
                .push(checksum(data))
                .push(offset as u32)
                .push(data.len() as u32);
            body = body.extend_bytes(data).align_to(4);
        }
        header.extend_bytes(body.as_slice()).into_vec()
    }
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// A glyph description for [`TestFont`].
#[derive(Debug, Clone, PartialEq)]
pub enum TestGlyph {
    /// No outline data.
    Empty,
    /// Contours of `(x, y, on_curve)` points.
    Simple(Vec<Vec<Point>>),
    /// Components as `(glyph id, dx, dy)` offsets.
    Compound(Vec<(u16, i16, i16)>),
}

/// A description of a small font that can be encoded as sfnt bytes.
///
/// Each glyph gets an advance of 500 plus 10 per glyph id and a left side
/// bearing equal to its glyph id unless overridden with
/// [`TestFont::metrics`].
#[derive(Debug, Clone)]
pub struct TestFont {
    pub family: String,
    pub subfamily: String,
    pub full_name: String,
    pub units_per_em: u16,
    pub mac_style: u16,
    pub head_flags: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub long_loca: bool,
    /// When set, only this many long metrics are written to hmtx.
    pub number_of_h_metrics: Option<u16>,
    pub glyphs: Vec<(TestGlyph, u16, i16)>,
    pub char_map: BTreeMap<u16, u16>,
}

impl Default for TestFont {
    fn default() -> Self {
        TestFont {
            family: "Test Sans".into(),
            subfamily: "Regular".into(),
            full_name: "Test Sans Regular".into(),
            units_per_em: 1000,
            mac_style: 0,
            head_flags: 0x0003,
            ascender: 800,
            descender: -200,
            line_gap: 90,
            long_loca: false,
            number_of_h_metrics: None,
            glyphs: vec![(TestGlyph::Empty, 500, 0)],
            char_map: BTreeMap::new(),
        }
    }
}

impl TestFont {
    pub fn new(family: &str) -> Self {
        TestFont {
            family: family.into(),
            full_name: format!("{family} Regular"),
            ..Default::default()
        }
    }

    /// Append a glyph with default metrics, returning its glyph id.
    pub fn push_glyph(&mut self, glyph: TestGlyph) -> u16 {
        let gid = self.glyphs.len() as u16;
        self.glyphs.push((glyph, 500 + 10 * gid, gid as i16));
        gid
    }

    /// Append a glyph and map `ch` to it.
    pub fn push_char(&mut self, ch: char, glyph: TestGlyph) -> u16 {
        let gid = self.push_glyph(glyph);
        self.char_map.insert(ch as u16, gid);
        gid
    }

    /// Override the metrics of a glyph.
    pub fn metrics(&mut self, gid: u16, advance: u16, lsb: i16) -> &mut Self {
        let entry = &mut self.glyphs[gid as usize];
        entry.1 = advance;
        entry.2 = lsb;
        self
    }

    /// The table set for this font.
    pub fn builder(&self) -> FontBuilder {
        let (glyf, loca) = self.glyf_and_loca();
        let mut builder = FontBuilder::new();
        builder
            .add_table(Tag::new(b"head"), self.head())
            .add_table(Tag::new(b"hhea"), self.hhea())
            .add_table(Tag::new(b"maxp"), self.maxp())
            .add_table(Tag::new(b"hmtx"), self.hmtx())
            .add_table(Tag::new(b"name"), self.name())
            .add_table(Tag::new(b"cmap"), self.cmap())
            .add_table(Tag::new(b"loca"), loca)
            .add_table(Tag::new(b"glyf"), glyf);
        builder
    }

    pub fn build(&self) -> Vec<u8> {
        self.builder().build()
    }

    fn head(&self) -> Vec<u8> {
        be_buffer! {
            1_u16, 0_u16,               // version
            1_u16, 0_u16,               // fontRevision
            0_u32,                      // checksumAdjustment
            0x5F0F3CF5_u32,             // magicNumber
            self.head_flags,            // flags
            self.units_per_em,          // unitsPerEm
            0_i64,                      // created
            0_i64,                      // modified
            0_i16, 0_i16, 0_i16, 0_i16, // bbox
            self.mac_style,             // macStyle
            8_u16,                      // lowestRecPPEM
            2_i16,                      // fontDirectionHint
            self.long_loca as i16,      // indexToLocFormat
            0_i16                       // glyphDataFormat
        }
        .into_vec()
    }

    fn hhea(&self) -> Vec<u8> {
        let max_advance = self.glyphs.iter().map(|g| g.1).max().unwrap_or_default();
        be_buffer! {
            1_u16, 0_u16,               // version
            self.ascender,
            self.descender,
            self.line_gap,
            max_advance,                // advanceWidthMax
            0_i16, 0_i16, 0_i16,        // minLsb, minRsb, xMaxExtent
            1_i16, 0_i16, 0_i16,        // caret
            [0_i16, 0, 0, 0],           // reserved
            0_i16,                      // metricDataFormat
            self.h_metric_count()
        }
        .into_vec()
    }

    fn h_metric_count(&self) -> u16 {
        self.number_of_h_metrics
            .unwrap_or(self.glyphs.len() as u16)
    }

    fn maxp(&self) -> Vec<u8> {
        be_buffer! { 0x00005000_u32, self.glyphs.len() as u16 }.into_vec()
    }

    fn hmtx(&self) -> Vec<u8> {
        let long = self.h_metric_count() as usize;
        let mut buf = BeBuffer::new();
        for (i, (_, advance, lsb)) in self.glyphs.iter().enumerate() {
            if i < long {
                buf = buf.push(*advance);
            }
            buf = buf.push(*lsb);
        }
        buf.into_vec()
    }

    fn name(&self) -> Vec<u8> {
        // a Macintosh record first, to make sure readers skip it
        let mac_family = b"Mac Family".to_vec();
        let windows = [
            (1_u16, encode_utf16be(&self.family)),
            (2, encode_utf16be(&self.subfamily)),
            (4, encode_utf16be(&self.full_name)),
        ];
        let count = 1 + windows.len();
        let mut buf = be_buffer! { 0_u16, count as u16, (6 + 12 * count) as u16 };
        let mut storage = mac_family.clone();
        buf = buf.extend([1_u16, 0, 0, 1, mac_family.len() as u16, 0]);
        for (name_id, data) in &windows {
            buf = buf.extend([
                3_u16,
                1,
                0x409,
                *name_id,
                data.len() as u16,
                storage.len() as u16,
            ]);
            storage.extend_from_slice(data);
        }
        buf.extend_bytes(&storage).into_vec()
    }

    fn cmap(&self) -> Vec<u8> {
        // one segment per character keeps this trivially correct
        let mut segments: Vec<_> = self
            .char_map
            .iter()
            .filter(|(ch, _)| **ch != 0xFFFF)
            .map(|(ch, gid)| cmap::Segment::new(*ch, *ch, gid.wrapping_sub(*ch) as i16, 0))
            .collect();
        segments.push(cmap::Segment::TERMINATOR);
        let subtable = cmap::cmap4(&segments, &[]);
        cmap::cmap_table(&[(3, 1, subtable.as_slice())]).into_vec()
    }

    fn glyf_and_loca(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = BeBuffer::new();
        let mut offsets = vec![0usize];
        for (glyph, _, _) in &self.glyphs {
            glyf = match glyph {
                TestGlyph::Empty => glyf,
                TestGlyph::Simple(contours) => encode_simple(glyf, contours),
                TestGlyph::Compound(components) => encode_compound(glyf, components),
            }
            .align_to(4);
            offsets.push(glyf.len());
        }
        let loca = if self.long_loca {
            BeBuffer::new().extend(offsets.iter().map(|off| *off as u32))
        } else {
            BeBuffer::new().extend(offsets.iter().map(|off| (*off / 2) as u16))
        };
        (glyf.into_vec(), loca.into_vec())
    }
}

fn encode_utf16be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

fn encode_simple(buf: BeBuffer, contours: &[Vec<Point>]) -> BeBuffer {
    let points: Vec<_> = contours.iter().flatten().copied().collect();
    let (mut x_min, mut y_min, mut x_max, mut y_max) = (0i16, 0i16, 0i16, 0i16);
    if let Some(first) = points.first() {
        (x_min, y_min, x_max, y_max) = (first.0, first.1, first.0, first.1);
    }
    for (x, y, _) in &points {
        x_min = x_min.min(*x);
        y_min = y_min.min(*y);
        x_max = x_max.max(*x);
        y_max = y_max.max(*y);
    }
    let mut buf = buf
        .push(contours.len() as i16)
        .extend([x_min, y_min, x_max, y_max]);
    let mut end = 0usize;
    for contour in contours {
        end += contour.len();
        buf = buf.push((end - 1) as u16);
    }
    buf = buf.push(0_u16); // instructionLength

    let mut flags = Vec::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let (mut last_x, mut last_y) = (0i16, 0i16);
    for (x, y, on_curve) in &points {
        let mut flag = if *on_curve { ON_CURVE } else { 0 };
        flag |= encode_delta(x - last_x, X_SHORT, X_SAME_OR_POSITIVE, &mut xs);
        flag |= encode_delta(y - last_y, Y_SHORT, Y_SAME_OR_POSITIVE, &mut ys);
        flags.push(flag);
        (last_x, last_y) = (*x, *y);
    }
    buf.extend(flags).extend_bytes(&xs).extend_bytes(&ys)
}

fn encode_delta(delta: i16, short: u8, same_or_positive: u8, out: &mut Vec<u8>) -> u8 {
    if delta == 0 {
        same_or_positive
    } else if delta.unsigned_abs() <= 255 {
        out.push(delta.unsigned_abs() as u8);
        if delta > 0 {
            short | same_or_positive
        } else {
            short
        }
    } else {
        out.extend(delta.to_be_bytes());
        0
    }
}

fn encode_compound(buf: BeBuffer, components: &[(u16, i16, i16)]) -> BeBuffer {
    const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
    const ARGS_ARE_XY_VALUES: u16 = 0x0002;
    const MORE_COMPONENTS: u16 = 0x0020;

    let mut buf = buf.push(-1_i16).extend([0_i16, 0, 0, 0]);
    for (i, (gid, dx, dy)) in components.iter().enumerate() {
        let mut flags = ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES;
        if i + 1 < components.len() {
            flags |= MORE_COMPONENTS;
        }
        buf = buf.push(flags).push(*gid).push(*dx).push(*dy);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_directory_is_sorted_and_aligned() {
        let mut builder = FontBuilder::new();
        builder
            .add_table(Tag::new(b"zzzz"), vec![1, 2, 3])
            .add_table(Tag::new(b"aaaa"), vec![4]);
        let data = builder.build();
        assert_eq!(&data[..4], &[0, 1, 0, 0]);
        assert_eq!(&data[4..6], &[0, 2]);
        assert_eq!(&data[12..16], b"aaaa");
        assert_eq!(&data[28..32], b"zzzz");
        // header + 2 records + 4 padded + 3 padded
        assert_eq!(data.len(), 12 + 32 + 4 + 4);
    }

    #[test]
    fn short_deltas() {
        let mut out = Vec::new();
        assert_eq!(encode_delta(0, X_SHORT, X_SAME_OR_POSITIVE, &mut out), 0x10);
        assert_eq!(encode_delta(-5, X_SHORT, X_SAME_OR_POSITIVE, &mut out), 0x02);
        assert_eq!(encode_delta(300, X_SHORT, X_SAME_OR_POSITIVE, &mut out), 0);
        assert_eq!(out, vec![5, 0x01, 0x2c]);
    }
}
