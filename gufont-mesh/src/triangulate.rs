//! Constrained triangulation of a polygon forest

use std::{collections::VecDeque, fmt};

use log::{trace, warn};
use read::types::ControlPoint;
use spade::{ConstrainedDelaunayTriangulation, Point2, PositionInTriangulation, Triangulation};

use crate::union::{find_hole_marker, PolygonForest};

/// Points, closed boundary segments and seed points of the areas to leave
/// empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangulationInput {
    pub points: Vec<ControlPoint>,
    /// Pairs of indices into `points`.
    pub segments: Vec<[usize; 2]>,
    /// One point inside each hole.
    pub holes: Vec<ControlPoint>,
}

impl TriangulationInput {
    /// Collect every boundary of the forest, parents before children, and
    /// locate a marker point in each hole.
    ///
    /// A hole for which no marker is found is still added as a boundary; it
    /// will be filled.
    pub fn from_forest(forest: &PolygonForest, hole_search_steps: usize) -> Self {
        let mut input = TriangulationInput::default();
        for node in forest.iter() {
            input.add_boundary(&node.contour);
            if !node.is_hole {
                continue;
            }
            match find_hole_marker(node, hole_search_steps) {
                Some(marker) => {
                    trace!("hole marker at ({}, {})", marker.x, marker.y);
                    input.holes.push(marker);
                }
                None => warn!(
                    "no marker found for a hole with {} points, it will be filled",
                    node.contour.len()
                ),
            }
        }
        input
    }

    fn add_boundary(&mut self, contour: &[ControlPoint]) {
        if contour.is_empty() {
            return;
        }
        let start = self.points.len();
        self.points.extend_from_slice(contour);
        let end = self.points.len();
        self.segments
            .extend((start..end).map(|i| [i, if i + 1 == end { start } else { i + 1 }]));
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Triangles referring to a point list by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSoup {
    pub points: Vec<ControlPoint>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriangleSoup {
    /// Drop the triangles whose centroid the forest doesn't fill.
    ///
    /// The flood fill of a [`Triangulator`] can't reach exterior pockets
    /// that the boundaries only touch at a single vertex.
    pub fn retain_covered(&mut self, forest: &PolygonForest) {
        let before = self.triangles.len();
        let points = &self.points;
        self.triangles.retain(|triangle| {
            let [a, b, c] = triangle.map(|ix| points[ix]);
            forest.covers((a + b + c) / 3.0)
        });
        if self.triangles.len() != before {
            trace!(
                "dropped {} triangles outside the filled area",
                before - self.triangles.len()
            );
        }
    }

    /// The points referenced by at least one triangle, in order of first
    /// use, and the triangles re-indexed into that list.
    pub fn compact(&self) -> (Vec<ControlPoint>, Vec<u32>) {
        let mut remap = vec![None; self.points.len()];
        let mut points = Vec::new();
        let indices = self
            .triangles
            .iter()
            .flatten()
            .map(|&ix| {
                *remap[ix].get_or_insert_with(|| {
                    points.push(self.points[ix]);
                    (points.len() - 1) as u32
                })
            })
            .collect();
        (points, indices)
    }
}

/// An error from a [`Triangulator`].
#[derive(Clone, Debug, PartialEq)]
pub enum TriangulationError {
    /// A point that cannot be triangulated, such as a NaN or an overly large
    /// coordinate.
    InvalidPoint(ControlPoint),
    /// Two boundary segments cross each other.
    CrossingSegments([usize; 2]),
    /// A segment refers to a point that doesn't exist.
    MissingPoint(usize),
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriangulationError::InvalidPoint(p) => {
                write!(f, "Point ({}, {}) can't be triangulated", p.x, p.y)
            }
            TriangulationError::CrossingSegments([a, b]) => {
                write!(f, "Segment {a}-{b} crosses another boundary segment")
            }
            TriangulationError::MissingPoint(ix) => write!(f, "No point with index {ix}"),
        }
    }
}

impl std::error::Error for TriangulationError {}

/// A constrained triangulation of the area enclosed by a set of boundaries.
///
/// Triangles on the outside of all boundaries, and those reachable from a
/// hole marker without crossing a boundary, are dropped.
pub trait Triangulator {
    fn triangulate(&self, input: &TriangulationInput) -> Result<TriangleSoup, TriangulationError>;
}

/// [`Triangulator`] backed by the constrained Delaunay triangulation of the
/// `spade` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpadeTriangulator;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

impl Triangulator for SpadeTriangulator {
    fn triangulate(&self, input: &TriangulationInput) -> Result<TriangleSoup, TriangulationError> {
        if input.is_empty() {
            return Ok(TriangleSoup::default());
        }
        let mut cdt = Cdt::new();
        let handles = input
            .points
            .iter()
            .map(|&p| {
                cdt.insert(Point2::new(p.x, p.y))
                    .map_err(|_| TriangulationError::InvalidPoint(p))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for &[a, b] in &input.segments {
            let from = *handles.get(a).ok_or(TriangulationError::MissingPoint(a))?;
            let to = *handles.get(b).ok_or(TriangulationError::MissingPoint(b))?;
            if from == to {
                continue;
            }
            if !cdt.can_add_constraint(from, to) {
                return Err(TriangulationError::CrossingSegments([a, b]));
            }
            cdt.add_constraint(from, to);
        }

        let removed = exterior_faces(&cdt, &input.holes);
        let triangles = cdt
            .inner_faces()
            .filter(|face| !removed[face.fix().index()])
            .map(|face| face.vertices().map(|v| v.fix().index()))
            .collect();
        let points = cdt
            .vertices()
            .map(|v| {
                let p = v.position();
                ControlPoint::on(p.x, p.y)
            })
            .collect();
        Ok(TriangleSoup { points, triangles })
    }
}

/// Flood fill from the convex hull and from every hole marker, never
/// crossing a constraint edge. Indexed by face index.
fn exterior_faces(cdt: &Cdt, holes: &[ControlPoint]) -> Vec<bool> {
    let mut removed = vec![false; cdt.num_all_faces()];
    let mut queue = VecDeque::new();

    for face in cdt.inner_faces() {
        let on_hull = face.adjacent_edges().iter().any(|edge| {
            edge.rev().face().is_outer() && !cdt.is_constraint_edge(edge.as_undirected().fix())
        });
        if on_hull {
            queue.push_back(face.fix());
        }
    }
    for hole in holes {
        match cdt.locate(Point2::new(hole.x, hole.y)) {
            PositionInTriangulation::OnFace(face) => queue.push_back(face),
            PositionInTriangulation::OnEdge(edge) => {
                let edge = cdt.directed_edge(edge);
                if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    continue;
                }
                queue.extend(
                    [edge.face(), edge.rev().face()]
                        .into_iter()
                        .filter_map(|face| face.as_inner())
                        .map(|face| face.fix()),
                );
            }
            _ => (),
        }
    }

    while let Some(face) = queue.pop_front() {
        if std::mem::replace(&mut removed[face.index()], true) {
            continue;
        }
        for edge in cdt.face(face).adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbour) = edge.rev().face().as_inner() {
                if !removed[neighbour.fix().index()] {
                    queue.push_back(neighbour.fix());
                }
            }
        }
    }
    removed
}
