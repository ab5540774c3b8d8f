//! Decoding a whole font for conversion

use std::collections::BTreeMap;

use types::{FontStyle, GlyphId, HeadFlags, NameId, Tag};

use crate::{
    tables::{glyf::Glyph, hmtx::LongMetric},
    FontRef, ReadError, TableProvider,
};

/// The tables a font must have to be converted, in the order they are
/// checked.
pub const REQUIRED_TABLES: [Tag; 8] = [
    Tag::new(b"head"),
    Tag::new(b"name"),
    Tag::new(b"cmap"),
    Tag::new(b"hhea"),
    Tag::new(b"hmtx"),
    Tag::new(b"maxp"),
    Tag::new(b"loca"),
    Tag::new(b"glyf"),
];

/// Everything the mesh converter needs from a TrueType font, decoded up
/// front.
///
/// Parsing is all or nothing: any malformed table fails the whole font.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrueTypeFont {
    pub family_name: String,
    pub subfamily_name: String,
    pub full_name: String,
    pub style: FontStyle,
    pub flags: HeadFlags,
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    /// UTF-16 code unit to glyph, from the Windows Unicode cmap subtable.
    pub char_map: BTreeMap<u16, GlyphId>,
    /// One entry per glyph.
    pub metrics: Vec<LongMetric>,
    /// One entry per glyph.
    pub glyphs: Vec<Glyph>,
}

impl TrueTypeFont {
    /// Parse a font from the bytes of a `.ttf` file.
    pub fn read(data: &[u8]) -> Result<Self, ReadError> {
        FontRef::new(data).and_then(|font| Self::from_font_ref(&font))
    }

    pub fn from_font_ref(font: &FontRef) -> Result<Self, ReadError> {
        if let Some(missing) = REQUIRED_TABLES
            .iter()
            .find(|tag| font.data_for_tag(**tag).is_none())
        {
            return Err(ReadError::TableIsMissing(*missing));
        }

        let head = font.head()?;
        let name = font.name()?;
        let family_name = name.windows_english(NameId::FAMILY_NAME)?;
        let subfamily_name = name.windows_english(NameId::SUBFAMILY_NAME)?;
        let full_name = name.windows_english(NameId::FULL_NAME)?;
        let char_map = font.cmap()?.windows_unicode()?.char_map();
        let hhea = font.hhea()?;
        let hmtx = font.hmtx()?;
        let num_glyphs = font.maxp()?.num_glyphs();
        let loca = font.loca(head.index_to_loc_format() != 0)?;
        let glyf = font.glyf()?;

        if loca.len() < num_glyphs as usize {
            return Err(ReadError::MalformedData(
                "loca has fewer entries than maxp.numGlyphs",
            ));
        }

        let mut metrics = Vec::with_capacity(num_glyphs as usize);
        let mut glyphs = Vec::with_capacity(num_glyphs as usize);
        for gid in (0..num_glyphs).map(GlyphId::new) {
            let metric = hmtx
                .metric(gid)
                .ok_or(ReadError::MalformedData("hmtx has no metric for a glyph"))?;
            metrics.push(metric);
            glyphs.push(glyf.glyph(&loca, gid)?);
        }
        log::debug!(
            "read '{family_name}' ({subfamily_name}): {} glyphs, {} mapped characters",
            glyphs.len(),
            char_map.len()
        );

        Ok(TrueTypeFont {
            family_name,
            subfamily_name,
            full_name,
            style: head.mac_style(),
            flags: head.flags(),
            units_per_em: head.units_per_em(),
            ascender: hhea.ascender(),
            descender: hhea.descender(),
            line_gap: hhea.line_gap(),
            char_map,
            metrics,
            glyphs,
        })
    }

    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// The glyph mapped to a character, or `None`.
    pub fn glyph_for_char(&self, ch: char) -> Option<GlyphId> {
        let ch = u16::try_from(ch as u32).ok()?;
        self.char_map.get(&ch).copied()
    }
}
