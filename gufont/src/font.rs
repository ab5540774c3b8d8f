//! The in-memory form of a gufont file

use std::{collections::BTreeMap, path::Path};

use crate::{
    mesh::Mesh,
    types::{FontStyle, GlyphId},
    Error,
};

/// A font whose glyphs are triangle meshes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    /// The family name.
    pub name: String,
    pub style: FontStyle,
    pub units_per_em: i32,
    pub ascender: i32,
    pub descender: i32,
    pub line_gap: i32,
    /// UTF-16 code unit to glyph.
    pub glyph_map: BTreeMap<u16, GlyphId>,
    /// Meshes indexed by glyph id.
    pub glyphs: Vec<Mesh>,
}

impl Font {
    /// The glyph for a character; unmapped characters, including those
    /// outside the Basic Multilingual Plane, map to glyph 0.
    pub fn glyph_for_char(&self, ch: char) -> GlyphId {
        u16::try_from(ch as u32)
            .ok()
            .and_then(|unit| self.glyph_map.get(&unit).copied())
            .unwrap_or(GlyphId::NOTDEF)
    }

    /// The mesh drawn for a character.
    ///
    /// Returns `None` only if the glyph the character maps to doesn't exist.
    pub fn mesh_for_char(&self, ch: char) -> Option<&Mesh> {
        self.glyphs.get(usize::from(self.glyph_for_char(ch)))
    }

    /// Load a gufont file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = std::fs::read(path)?;
        crate::load(&data)
    }

    /// Write this font to a gufont file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let data = crate::dump(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Check that this font can be written and read back.
    pub fn validate(&self) -> Result<(), Error> {
        let fits = |len: usize| i32::try_from(len).is_ok();
        if !fits(self.name.len()) || !fits(self.glyph_map.len()) || !fits(self.glyphs.len()) {
            return Err(Error::Validation("too many entries"));
        }
        for mesh in &self.glyphs {
            if !fits(mesh.indices.len()) || !fits(mesh.vertices.len()) {
                return Err(Error::Validation("too many entries"));
            }
            if mesh
                .indices
                .iter()
                .any(|ix| *ix as usize >= mesh.vertices.len())
            {
                return Err(Error::Validation("index out of range"));
            }
        }
        Ok(())
    }

    /// Aggregate numbers describing this font.
    pub fn summary(&self) -> FontSummary {
        FontSummary {
            name: self.name.clone(),
            style: self.style,
            units_per_em: self.units_per_em,
            ascender: self.ascender,
            descender: self.descender,
            line_gap: self.line_gap,
            mapped_chars: self.glyph_map.len(),
            glyphs: self.glyphs.len(),
            empty_glyphs: self.glyphs.iter().filter(|mesh| mesh.is_empty()).count(),
            vertices: self.glyphs.iter().map(|mesh| mesh.vertices.len()).sum(),
            indices: self.glyphs.iter().map(|mesh| mesh.indices.len()).sum(),
        }
    }
}

/// An overview of a [`Font`], as printed by the inspector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSummary {
    pub name: String,
    pub style: FontStyle,
    pub units_per_em: i32,
    pub ascender: i32,
    pub descender: i32,
    pub line_gap: i32,
    pub mapped_chars: usize,
    pub glyphs: usize,
    pub empty_glyphs: usize,
    pub vertices: usize,
    pub indices: usize,
}
