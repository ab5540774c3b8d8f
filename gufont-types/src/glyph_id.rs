//! Glyph ids

/// The index of a glyph in `loca`, `glyf` and `hmtx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphId(u16);

impl GlyphId {
    /// Glyph 0, drawn for characters the font doesn't map.
    pub const NOTDEF: GlyphId = GlyphId(0);

    pub const fn new(raw: u16) -> Self {
        GlyphId(raw)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "glyph {}", self.0)
    }
}

impl From<GlyphId> for usize {
    fn from(value: GlyphId) -> Self {
        value.0 as usize
    }
}

crate::newtype_scalar!(GlyphId, [u8; 2]);
