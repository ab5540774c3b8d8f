//! Running the whole pipeline for one glyph

use log::{debug, warn};
use read::tables::{glyf::Glyph, hmtx::LongMetric};

use crate::{
    mesh::{Mesh, Vertex},
    outline::Outline,
    resolve::resolve_intersections,
    triangulate::{SpadeTriangulator, Triangulator, TriangulationInput},
    union::{IOverlayUnion, PolygonUnion},
    winding::classify,
};

/// Texture coordinates of a curve triangle's apex, first and second base
/// vertex.
const APEX_UV: (f32, f32) = (0.5, 0.0);
const BASE1_UV: (f32, f32) = (0.0, 0.0);
const BASE2_UV: (f32, f32) = (1.0, 1.0);

/// Tuning knobs for meshing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshOptions {
    /// The maximum number of passes splitting overlapping curve triangles.
    pub max_split_passes: usize,
    /// How often the step towards a hole's interior is halved before a
    /// corner is given up on.
    pub hole_search_steps: usize,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            max_split_passes: 4,
            hole_search_steps: 32,
        }
    }
}

/// Converts glyphs into meshes using a polygon union `U` and a
/// triangulator `T`.
#[derive(Clone, Debug, Default)]
pub struct GlyphMesher<U = IOverlayUnion, T = SpadeTriangulator> {
    options: MeshOptions,
    union: U,
    triangulator: T,
}

impl GlyphMesher {
    pub fn new(options: MeshOptions) -> Self {
        GlyphMesher {
            options,
            union: IOverlayUnion,
            triangulator: SpadeTriangulator,
        }
    }
}

impl<U: PolygonUnion, T: Triangulator> GlyphMesher<U, T> {
    /// Mesh with a different union or triangulation implementation.
    pub fn with_services(options: MeshOptions, union: U, triangulator: T) -> Self {
        GlyphMesher {
            options,
            union,
            triangulator,
        }
    }

    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    /// The mesh for `glyph`.
    ///
    /// Empty and compound glyphs produce a mesh with metrics only, as does
    /// a glyph whose polygons enclose no area.
    pub fn mesh(&self, glyph: &Glyph, metric: LongMetric) -> Mesh {
        let mut mesh = Mesh::empty(metric.advance as i32, metric.side_bearing as i32);
        let contours = match glyph {
            Glyph::Empty => return mesh,
            Glyph::Compound(compound) => {
                debug!(
                    "compound glyph with {} components is not flattened",
                    compound.components.len()
                );
                return mesh;
            }
            Glyph::Simple(simple) => &simple.contours,
        };

        let mut outline = Outline::build(contours);
        let passes = resolve_intersections(&mut outline, self.options.max_split_passes);
        classify(&mut outline, contours);

        let forest = self.union.union(&outline.polygon_points());
        let input = TriangulationInput::from_forest(&forest, self.options.hole_search_steps);
        if input.is_empty() {
            return mesh;
        }

        match self.triangulator.triangulate(&input) {
            Ok(mut soup) => {
                soup.retain_covered(&forest);
                let (points, indices) = soup.compact();
                mesh.vertices = points
                    .into_iter()
                    .map(|p| Vertex::interior(p.x as f32, p.y as f32))
                    .collect();
                mesh.indices = indices;
            }
            Err(e) => warn!("triangulation failed, glyph keeps its curves only: {e}"),
        }
        let interior_triangles = mesh.indices.len() / 3;

        for triangle in &outline.triangles {
            let first = mesh.vertices.len() as u32;
            let inside = triangle.is_inside;
            for (point, (u, v)) in [
                (triangle.apex, APEX_UV),
                (triangle.base1, BASE1_UV),
                (triangle.base2, BASE2_UV),
            ] {
                mesh.vertices
                    .push(Vertex::curve(point.x as f32, point.y as f32, u, v, inside));
            }
            mesh.indices.extend([first, first + 1, first + 2]);
        }

        debug!(
            "{} contours: {} interior and {} curve triangles, {} vertices, {passes} split passes",
            contours.len(),
            interior_triangles,
            outline.triangles.len(),
            mesh.vertices.len(),
        );
        mesh
    }
}

/// Mesh a glyph with the default options and services.
pub fn triangulate_glyph(glyph: &Glyph, metric: LongMetric) -> Mesh {
    GlyphMesher::new(MeshOptions::default()).mesh(glyph, metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mesh::VertexKind,
        testing::{outline_area, simple_glyph},
        triangulate::{TriangleSoup, TriangulationError},
        union::PolygonForest,
    };
    use gufont_test_data::glyphs;
    use read::{
        tables::glyf::{Anchor, Component, CompoundGlyph, Transform},
        types::{ControlPoint, GlyphId},
    };

    const METRIC: LongMetric = LongMetric {
        advance: 600,
        side_bearing: 20,
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn shoelace(points: &[glyphs::Point]) -> f64 {
        let polygon = points
            .iter()
            .map(|(x, y, _)| ControlPoint::on(*x as f64, *y as f64))
            .collect::<Vec<_>>();
        crate::union::signed_area(&polygon).abs() / 2.0
    }

    #[test]
    fn straight_outline_preserves_area() {
        init_logging();
        let notched = vec![
            (0, 0, true),
            (0, 700, true),
            (250, 700, true),
            (250, 300, true),
            (450, 300, true),
            (450, 700, true),
            (700, 700, true),
            (700, 0, true),
        ];
        for points in [glyphs::square(0, 0, 500), notched] {
            let mesh = triangulate_glyph(&simple_glyph(&[points.clone()]), METRIC);
            assert!(mesh
                .vertices
                .iter()
                .all(|v| v.kind == VertexKind::Interior));
            assert!((mesh.covered_area() - shoelace(&points)).abs() < 1e-3);
        }
    }

    #[test]
    fn circle_coverage() {
        init_logging();
        let a = 200.0;
        let glyph = simple_glyph(&[glyphs::four_point_circle(0, 0, 200)]);
        let mesh = triangulate_glyph(&glyph, METRIC);
        // the curve runs from distance a to 0.75 * sqrt(2) * a from the centre
        let radius = a * (1.0 + 0.75 * std::f64::consts::SQRT_2) / 2.0;
        let circle = std::f64::consts::PI * radius * radius;
        let covered = mesh.covered_area();
        assert!((covered - circle).abs() / circle < 0.02, "{covered} vs {circle}");
        assert!((covered - outline_area(&glyph)).abs() < 1e-3);
        let curves = mesh.vertices.iter().filter(|v| v.kind.flags() == 1).count();
        assert_eq!(curves, 12);
    }

    #[test]
    fn dent_matches_outline() {
        let glyph = simple_glyph(&[glyphs::square_with_dent(1000, 300)]);
        let mesh = triangulate_glyph(&glyph, METRIC);
        assert!((mesh.covered_area() - outline_area(&glyph)).abs() < 1e-3);
        assert!((mesh.covered_area() - 900_000.0).abs() < 1e-3);
    }

    #[test]
    fn curve_vertices_follow_interior() {
        let glyph = simple_glyph(&[glyphs::square_with_dent(1000, 300)]);
        let mesh = triangulate_glyph(&glyph, METRIC);
        let n = mesh.vertices.len();
        let curve = &mesh.vertices[n - 3..];
        assert_eq!(curve[0], Vertex::curve(500.0, 700.0, 0.5, 0.0, true));
        assert_eq!(curve[1], Vertex::curve(0.0, 1000.0, 0.0, 0.0, true));
        assert_eq!(curve[2], Vertex::curve(1000.0, 1000.0, 1.0, 1.0, true));
        let last = mesh.indices.len();
        assert_eq!(
            &mesh.indices[last - 3..],
            &[n as u32 - 3, n as u32 - 2, n as u32 - 1]
        );
        assert!(mesh.vertices[..n - 3]
            .iter()
            .all(|v| v.kind == VertexKind::Interior));
        assert!(mesh.indices[..last - 3].iter().all(|&ix| (ix as usize) < n - 3));
    }

    #[test]
    fn counter_stays_empty() {
        let glyph = simple_glyph(&glyphs::square_ring(1000, 200));
        let mesh = triangulate_glyph(&glyph, METRIC);
        assert!((mesh.covered_area() - (1_000_000.0 - 360_000.0)).abs() < 1e-3);
        // no triangle has its centre inside the counter
        for [a, b, c] in mesh.triangles() {
            let cx = (a.x + b.x + c.x) / 3.0;
            let cy = (a.y + b.y + c.y) / 3.0;
            assert!(!(cx > 200.0 && cx < 800.0 && cy > 200.0 && cy < 800.0));
        }
    }

    #[test]
    fn triangular_counter_stays_empty() {
        init_logging();
        let glyph = simple_glyph(&glyphs::square_with_triangular_counter(1000, 200));
        let mesh = triangulate_glyph(&glyph, METRIC);
        let expected = outline_area(&glyph);
        assert!((expected - 820_000.0).abs() < 1e-3);
        let covered = mesh.covered_area();
        assert!((covered - expected).abs() < 1e-3, "{covered} vs {expected}");
    }

    #[test]
    fn round_counter_matches_outline() {
        let glyph = simple_glyph(&glyphs::square_with_round_counter(1000, 200));
        let mesh = triangulate_glyph(&glyph, METRIC);
        let expected = outline_area(&glyph);
        let counter = 10.0 * 200.0 * 200.0 / 3.0;
        assert!((expected - (1_000_000.0 - counter)).abs() < 1e-3);
        let covered = mesh.covered_area();
        assert!((covered - expected).abs() < 1e-3, "{covered} vs {expected}");
    }

    #[test]
    fn vertices_are_shared() {
        let mesh = triangulate_glyph(&simple_glyph(&[glyphs::square(0, 0, 100)]), METRIC);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn metrics_only_glyphs() {
        let empty = triangulate_glyph(&Glyph::Empty, METRIC);
        assert!(empty.is_empty());
        assert_eq!((empty.advance_width, empty.left_side_bearing), (600, 20));

        let compound = Glyph::Compound(CompoundGlyph {
            bbox: Default::default(),
            components: vec![Component {
                glyph: GlyphId::new(1),
                flags: Default::default(),
                anchor: Anchor::Offset { x: 0, y: 0 },
                transform: Transform::default(),
            }],
        });
        let mesh = triangulate_glyph(&compound, METRIC);
        assert_eq!(mesh, Mesh::empty(600, 20));

        let degenerate = simple_glyph(&[vec![(0, 0, true), (100, 0, true)]]);
        assert!(triangulate_glyph(&degenerate, METRIC).is_empty());
    }

    struct Failing;

    impl Triangulator for Failing {
        fn triangulate(&self, _: &TriangulationInput) -> Result<TriangleSoup, TriangulationError> {
            Err(TriangulationError::MissingPoint(0))
        }
    }

    struct Nothing;

    impl PolygonUnion for Nothing {
        fn union(&self, _: &[Vec<ControlPoint>]) -> PolygonForest {
            PolygonForest::default()
        }
    }

    #[test]
    fn failed_triangulation_keeps_curves() {
        init_logging();
        let mesher = GlyphMesher::with_services(MeshOptions::default(), IOverlayUnion, Failing);
        let glyph = simple_glyph(&[glyphs::four_point_circle(0, 0, 100)]);
        let mesh = mesher.mesh(&glyph, METRIC);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.indices, (0..12u32).collect::<Vec<_>>());
    }

    #[test]
    fn no_area_means_no_mesh() {
        let mesher = GlyphMesher::with_services(MeshOptions::default(), Nothing, SpadeTriangulator);
        let glyph = simple_glyph(&[glyphs::four_point_circle(0, 0, 100)]);
        assert!(mesher.mesh(&glyph, METRIC).is_empty());
    }
}
