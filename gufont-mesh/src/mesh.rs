//! The triangle mesh of one glyph

/// How a vertex takes part in rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexKind {
    /// A vertex of the interior triangulation; always filled.
    Interior,
    /// A vertex of a curve triangle with the texture coordinates of the
    /// implicit curve test.
    ///
    /// `inside` curves render the side of the curve facing the apex, all
    /// others the side facing the chord.
    Curve { u: f32, v: f32, inside: bool },
}

impl VertexKind {
    /// The serialized flag byte: the sum of the "inside" and "curve" bits.
    pub fn flags(self) -> u8 {
        match self {
            VertexKind::Interior => 0,
            VertexKind::Curve { inside: false, .. } => 1,
            VertexKind::Curve { inside: true, .. } => 2,
        }
    }

    /// Texture coordinates, for curve vertices.
    pub fn uv(self) -> Option<(f32, f32)> {
        match self {
            VertexKind::Interior => None,
            VertexKind::Curve { u, v, .. } => Some((u, v)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub kind: VertexKind,
}

impl Vertex {
    pub fn interior(x: f32, y: f32) -> Self {
        Vertex {
            x,
            y,
            kind: VertexKind::Interior,
        }
    }

    pub fn curve(x: f32, y: f32, u: f32, v: f32, inside: bool) -> Self {
        Vertex {
            x,
            y,
            kind: VertexKind::Curve { u, v, inside },
        }
    }
}

/// Interior triangles followed by curve triangles, plus the horizontal
/// metrics of the glyph.
///
/// Every three consecutive indices form a triangle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    pub advance_width: i32,
    pub left_side_bearing: i32,
    pub indices: Vec<u32>,
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    /// A mesh without geometry.
    pub fn empty(advance_width: i32, left_side_bearing: i32) -> Self {
        Mesh {
            advance_width,
            left_side_bearing,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The triangles as vertex triples. A trailing partial triangle is
    /// ignored, as are triangles with out of range indices.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let get = |ix: u32| self.vertices.get(ix as usize).copied();
            Some([get(tri[0])?, get(tri[1])?, get(tri[2])?])
        })
    }

    /// The area a renderer fills with this mesh.
    ///
    /// Interior triangles count fully. A parabola cuts its control triangle
    /// at one third of the area on the apex side, so outside curve
    /// triangles count two thirds and inside ones one third.
    pub fn covered_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let area = (((b.x - a.x) as f64) * ((c.y - a.y) as f64)
                    - ((c.x - a.x) as f64) * ((b.y - a.y) as f64))
                    .abs()
                    / 2.0;
                match a.kind {
                    VertexKind::Interior => area,
                    VertexKind::Curve { inside: true, .. } => area / 3.0,
                    VertexKind::Curve { inside: false, .. } => area * 2.0 / 3.0,
                }
            })
            .sum()
    }

    /// The vertices in a layout that can be uploaded to the GPU as is.
    #[cfg(feature = "bytemuck")]
    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertices.iter().copied().map(GpuVertex::from).collect()
    }
}

/// A vertex as laid out in a GPU vertex buffer.
#[cfg(feature = "bytemuck")]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct GpuVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub flags: u32,
}

#[cfg(feature = "bytemuck")]
impl From<Vertex> for GpuVertex {
    fn from(vertex: Vertex) -> Self {
        let (u, v) = vertex.kind.uv().unwrap_or_default();
        GpuVertex {
            position: [vertex.x, vertex.y],
            uv: [u, v],
            flags: vertex.kind.flags() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert_eq!(VertexKind::Interior.flags(), 0);
        assert_eq!(Vertex::curve(0.0, 0.0, 0.5, 0.0, false).kind.flags(), 1);
        assert_eq!(Vertex::curve(0.0, 0.0, 0.5, 0.0, true).kind.flags(), 2);
        assert_eq!(VertexKind::Interior.uv(), None);
    }

    #[test]
    fn covered_area_weights_curves() {
        let mesh = Mesh {
            indices: vec![0, 1, 2, 3, 4, 5, 6, 7, 8],
            vertices: vec![
                Vertex::interior(0.0, 0.0),
                Vertex::interior(0.0, 6.0),
                Vertex::interior(6.0, 0.0),
                Vertex::curve(0.0, 6.0, 0.5, 0.0, false),
                Vertex::curve(0.0, 0.0, 0.0, 0.0, false),
                Vertex::curve(6.0, 0.0, 1.0, 1.0, false),
                Vertex::curve(0.0, 6.0, 0.5, 0.0, true),
                Vertex::curve(0.0, 0.0, 0.0, 0.0, true),
                Vertex::curve(6.0, 0.0, 1.0, 1.0, true),
            ],
            ..Default::default()
        };
        assert_eq!(mesh.triangles().count(), 3);
        assert!((mesh.covered_area() - (18.0 + 12.0 + 6.0)).abs() < 1e-9);
    }

    #[test]
    fn skips_bad_indices() {
        let mesh = Mesh {
            indices: vec![0, 1, 9, 0],
            vertices: vec![Vertex::interior(0.0, 0.0), Vertex::interior(1.0, 0.0)],
            ..Mesh::empty(500, 10)
        };
        assert_eq!(mesh.triangles().count(), 0);
        assert_eq!(mesh.advance_width, 500);
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn gpu_layout() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 20);
        let mesh = Mesh {
            indices: vec![],
            vertices: vec![
                Vertex::interior(1.0, 2.0),
                Vertex::curve(3.0, 4.0, 0.5, 0.0, true),
            ],
            ..Default::default()
        };
        let gpu = mesh.gpu_vertices();
        assert_eq!(gpu[0].flags, 0);
        assert_eq!(gpu[1].uv, [0.5, 0.0]);
        assert_eq!(gpu[1].flags, 2);
        let bytes: &[u8] = bytemuck::cast_slice(&gpu);
        assert_eq!(bytes.len(), 40);
    }
}
