//! Writing the container

use crate::{
    mesh::{Mesh, Vertex},
    types::GlyphId,
    Error, Font, MAGIC,
};

/// A type that can be written out as part of a gufont file.
pub trait ContainerWrite {
    /// Write our little-endian bytes into this [`ContainerWriter`].
    fn write_into(&self, writer: &mut ContainerWriter);
}

/// Accumulates the bytes of a gufont file.
#[derive(Debug, Default)]
pub struct ContainerWriter {
    bytes: Vec<u8>,
}

impl ContainerWriter {
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes)
    }

    /// Write a collection length as an `i32`.
    ///
    /// Lengths are checked by [`Font::validate`] before writing.
    pub fn write_len(&mut self, len: usize) {
        (len as i32).write_into(self)
    }

    pub fn into_data(self) -> Vec<u8> {
        self.bytes
    }
}

/// Serialize a font.
///
/// Fails if the font is inconsistent, see [`Font::validate`].
pub fn dump(font: &Font) -> Result<Vec<u8>, Error> {
    font.validate()?;
    let mut writer = ContainerWriter::default();
    font.write_into(&mut writer);
    Ok(writer.into_data())
}

macro_rules! write_le_bytes {
    ($ty:ty) => {
        impl ContainerWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut ContainerWriter) {
                writer.write_slice(&self.to_le_bytes())
            }
        }
    };
}

write_le_bytes!(u8);
write_le_bytes!(u16);
write_le_bytes!(i32);
write_le_bytes!(u32);
write_le_bytes!(f32);

impl<T: ContainerWrite> ContainerWrite for [T] {
    fn write_into(&self, writer: &mut ContainerWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl ContainerWrite for str {
    fn write_into(&self, writer: &mut ContainerWriter) {
        writer.write_len(self.len());
        writer.write_slice(self.as_bytes());
    }
}

impl ContainerWrite for GlyphId {
    fn write_into(&self, writer: &mut ContainerWriter) {
        (self.to_u16() as i32).write_into(writer)
    }
}

impl ContainerWrite for Vertex {
    fn write_into(&self, writer: &mut ContainerWriter) {
        self.x.write_into(writer);
        self.y.write_into(writer);
        self.kind.flags().write_into(writer);
        if let Some((u, v)) = self.kind.uv() {
            u.write_into(writer);
            v.write_into(writer);
        }
    }
}

impl ContainerWrite for Mesh {
    fn write_into(&self, writer: &mut ContainerWriter) {
        self.advance_width.write_into(writer);
        self.left_side_bearing.write_into(writer);
        writer.write_len(self.indices.len());
        self.indices.write_into(writer);
        writer.write_len(self.vertices.len());
        self.vertices.write_into(writer);
    }
}

impl ContainerWrite for Font {
    fn write_into(&self, writer: &mut ContainerWriter) {
        writer.write_slice(&MAGIC);
        self.name.write_into(writer);
        (self.style.bits() as i32).write_into(writer);
        self.units_per_em.write_into(writer);
        self.ascender.write_into(writer);
        self.descender.write_into(writer);
        self.line_gap.write_into(writer);
        writer.write_len(self.glyph_map.len());
        for (unit, gid) in &self.glyph_map {
            unit.write_into(writer);
            gid.write_into(writer);
        }
        writer.write_len(self.glyphs.len());
        self.glyphs.write_into(writer);
    }
}
