//! Splitting contours into inner polygons and curve triangles
//!
//! Every off-curve point of a TrueType contour, together with the on-curve
//! points on either side of it (real or implied), forms a quadratic segment.
//! The builder replaces each segment by its chord in an inner polygon and
//! records the triangle spanned by the segment as a [`CurveTriangle`].
//!
//! Later stages insert vertices into the polygons (split points and apexes),
//! always directly after a triangle's first base vertex. The polygons are
//! therefore kept as index-linked lists in an arena so that insertion keeps
//! existing vertex handles valid.

use read::{tables::glyf::Contour, types::ControlPoint};

use crate::curve::CurveTriangle;

/// A handle to a vertex of a [`LinkedPolygon`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    point: ControlPoint,
    next: Option<usize>,
}

/// A closed polygon whose vertices can be inserted after any existing
/// vertex in constant time.
#[derive(Clone, Debug, Default)]
pub struct LinkedPolygon {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl LinkedPolygon {
    pub fn new() -> Self {
        Default::default()
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.head.map(NodeId)
    }

    pub fn last(&self) -> Option<NodeId> {
        self.tail.map(NodeId)
    }

    pub fn point(&self, node: NodeId) -> ControlPoint {
        self.nodes[node.0].point
    }

    /// Append a vertex at the end.
    pub fn push_back(&mut self, point: ControlPoint) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { point, next: None });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        NodeId(id)
    }

    /// Insert a vertex directly after `node`.
    pub fn insert_after(&mut self, node: NodeId, point: ControlPoint) -> NodeId {
        let id = self.nodes.len();
        let next = self.nodes[node.0].next;
        self.nodes.push(Node { point, next });
        self.nodes[node.0].next = Some(id);
        if self.tail == Some(node.0) {
            self.tail = Some(id);
        }
        NodeId(id)
    }

    /// The vertices in polygon order.
    pub fn points(&self) -> impl Iterator<Item = ControlPoint> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = &self.nodes[cursor?];
            cursor = node.next;
            Some(node.point)
        })
    }
}

/// The result of splitting a glyph's contours.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    /// One polygon per contour with at least two points.
    pub polygons: Vec<LinkedPolygon>,
    /// Curve triangles of all contours, in contour order.
    pub triangles: Vec<CurveTriangle>,
}

impl Outline {
    /// Split every contour with at least two points.
    pub fn build(contours: &[Contour]) -> Self {
        let mut outline = Outline::default();
        for contour in contours.iter().filter(|contour| contour.len() > 1) {
            outline.add_contour(contour.points());
        }
        outline
    }

    fn add_contour(&mut self, points: &[ControlPoint]) {
        let polygon_ix = self.polygons.len();
        let mut polygon = LinkedPolygon::new();
        let n = points.len();
        // the triangle of a leading off-curve point, whose base vertex
        // is only known once the whole contour has been walked
        let mut first_triangle = None;

        for (i, &point) in points.iter().enumerate() {
            if point.on_curve {
                polygon.push_back(point);
                continue;
            }
            let mut before = points[(i + n - 1) % n];
            if !before.on_curve {
                before = before.midpoint(point);
                polygon.push_back(before);
            }
            let mut after = points[(i + 1) % n];
            if !after.on_curve {
                after = after.midpoint(point);
            }
            let base = match polygon.last() {
                Some(node) if i > 0 => node,
                _ => {
                    first_triangle = Some(self.triangles.len());
                    NodeId(0)
                }
            };
            self.triangles.push(CurveTriangle::new(
                point,
                before,
                after,
                polygon_ix,
                base,
            ));
        }

        if let Some(ix) = first_triangle {
            // the first base vertex is the last polygon vertex if the contour
            // closes on an on-curve point, else the implied midpoint pushed
            // first
            let base = if points[n - 1].on_curve {
                polygon.last()
            } else {
                polygon.first()
            };
            if let Some(base) = base {
                self.triangles[ix].base = base;
            }
        }
        self.polygons.push(polygon);
    }

    /// The polygons as point lists.
    pub fn polygon_points(&self) -> Vec<Vec<ControlPoint>> {
        self.polygons
            .iter()
            .map(|polygon| polygon.points().collect())
            .collect()
    }
}
