//! Reading the container back

use std::collections::BTreeMap;

use crate::{
    mesh::{Mesh, Vertex, VertexKind},
    types::{FontStyle, GlyphId},
    Error, Font, MAGIC,
};

const TRUNCATED: Error = Error::Validation("unexpected end of data");

/// A little-endian reader over a byte slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.pos.checked_add(len).ok_or(TRUNCATED)?;
        let bytes = self.data.get(self.pos..end).ok_or(TRUNCATED)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        self.read_array::<1>().map(|[byte]| byte)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        self.read_array().map(u16::from_le_bytes)
    }

    fn read_i32(&mut self) -> Result<i32, Error> {
        self.read_array().map(i32::from_le_bytes)
    }

    fn read_f32(&mut self) -> Result<f32, Error> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// A non-negative `i32` count of items at least `item_size` bytes long.
    fn read_count(&mut self, item_size: usize) -> Result<usize, Error> {
        let count = usize::try_from(self.read_i32()?)
            .map_err(|_| Error::Validation("negative count"))?;
        // so that a corrupt count can't request a huge allocation
        if count.saturating_mul(item_size) > self.remaining() {
            return Err(TRUNCATED);
        }
        Ok(count)
    }
}

/// Parse a gufont file.
pub fn load(data: &[u8]) -> Result<Font, Error> {
    let mut reader = Reader::new(data);
    let magic = reader.read_array::<6>()?;
    if magic != MAGIC {
        return Err(Error::BadMagic(magic));
    }

    let name_len = reader.read_count(1)?;
    let name = std::str::from_utf8(reader.read_bytes(name_len)?)
        .map_err(|_| Error::Validation("font name is not valid UTF-8"))?
        .to_owned();
    let style = u16::try_from(reader.read_i32()?)
        .ok()
        .and_then(FontStyle::from_bits)
        .ok_or(Error::Validation("unknown style bits"))?;
    let units_per_em = reader.read_i32()?;
    let ascender = reader.read_i32()?;
    let descender = reader.read_i32()?;
    let line_gap = reader.read_i32()?;

    let map_len = reader.read_count(6)?;
    let mut glyph_map = BTreeMap::new();
    for _ in 0..map_len {
        let unit = reader.read_u16()?;
        let gid = u16::try_from(reader.read_i32()?)
            .map_err(|_| Error::Validation("glyph index out of range"))?;
        glyph_map.insert(unit, GlyphId::new(gid));
    }

    let glyph_count = reader.read_count(16)?;
    let glyphs = (0..glyph_count)
        .map(|_| read_mesh(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("loaded '{name}': {} glyphs", glyphs.len());

    Ok(Font {
        name,
        style,
        units_per_em,
        ascender,
        descender,
        line_gap,
        glyph_map,
        glyphs,
    })
}

fn read_mesh(reader: &mut Reader) -> Result<Mesh, Error> {
    let advance_width = reader.read_i32()?;
    let left_side_bearing = reader.read_i32()?;
    let index_count = reader.read_count(4)?;
    let indices = (0..index_count)
        .map(|_| {
            u32::try_from(reader.read_i32()?).map_err(|_| Error::Validation("negative index"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let vertex_count = reader.read_count(9)?;
    let vertices = (0..vertex_count)
        .map(|_| read_vertex(reader))
        .collect::<Result<Vec<_>, _>>()?;
    if indices.iter().any(|ix| *ix as usize >= vertices.len()) {
        return Err(Error::Validation("index out of range"));
    }
    Ok(Mesh {
        advance_width,
        left_side_bearing,
        indices,
        vertices,
    })
}

fn read_vertex(reader: &mut Reader) -> Result<Vertex, Error> {
    let x = reader.read_f32()?;
    let y = reader.read_f32()?;
    let kind = match reader.read_u8()? {
        0 => VertexKind::Interior,
        flags @ (1 | 2) => VertexKind::Curve {
            u: reader.read_f32()?,
            v: reader.read_f32()?,
            inside: flags == 2,
        },
        _ => return Err(Error::Validation("unknown vertex flags")),
    };
    Ok(Vertex { x, y, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump;
    use pretty_assertions::assert_eq;

    fn font() -> Font {
        let mut mesh = Mesh::empty(520, 12);
        mesh.vertices = vec![
            Vertex::interior(0.0, 0.0),
            Vertex::curve(5.5, 9.25, 0.5, 0.0, false),
            Vertex::curve(10.0, 0.0, 1.0, 1.0, true),
        ];
        mesh.indices = vec![0, 1, 2];
        Font {
            name: "Grüße".into(),
            style: FontStyle::ITALIC,
            units_per_em: 2048,
            ascender: 1900,
            descender: -500,
            line_gap: 0,
            glyph_map: [(0x20, GlyphId::new(0)), (0x61, GlyphId::new(1))]
                .into_iter()
                .collect(),
            glyphs: vec![Mesh::empty(250, 0), mesh],
        }
    }

    #[test]
    fn round_trip() {
        let font = font();
        let bytes = dump(&font).unwrap();
        let loaded = load(&bytes).unwrap();
        assert_eq!(loaded, font);
        assert_eq!(dump(&loaded).unwrap(), bytes);
    }

    #[test]
    fn bad_magic() {
        let mut bytes = dump(&font()).unwrap();
        bytes[0] = b'G';
        assert!(matches!(load(&bytes), Err(Error::BadMagic(m)) if &m == b"Gufont"));
    }

    #[test]
    fn truncated() {
        let bytes = dump(&font()).unwrap();
        for len in [0, 3, 6, 20, bytes.len() - 1] {
            assert!(
                matches!(load(&bytes[..len]), Err(Error::Validation(_))),
                "length {len}"
            );
        }
    }

    #[test]
    fn negative_count() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend((-1i32).to_le_bytes());
        assert!(matches!(
            load(&bytes),
            Err(Error::Validation("negative count"))
        ));
    }

    #[test]
    fn rejects_unknown_flags() {
        let mut bytes = dump(&font()).unwrap();
        // the flag byte of the very first vertex of the last glyph
        let first_vertex = bytes.len() - (9 + 17 + 17) + 8;
        assert_eq!(bytes[first_vertex], 0);
        bytes[first_vertex] = 3;
        assert!(matches!(
            load(&bytes),
            Err(Error::Validation("unknown vertex flags"))
        ));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut bytes = dump(&font()).unwrap();
        // indices of the last glyph: three i32 followed by the vertex count
        // and 43 bytes of vertices
        let last_index = bytes.len() - 43 - 4 - 4;
        bytes[last_index..last_index + 4].copy_from_slice(&7i32.to_le_bytes());
        assert!(matches!(
            load(&bytes),
            Err(Error::Validation("index out of range"))
        ));
    }

    #[test]
    fn rejects_invalid_name() {
        let mut bytes = dump(&font()).unwrap();
        bytes[10] = 0xFF;
        assert!(matches!(load(&bytes), Err(Error::Validation(_))));
    }
}
