//! Merging polygons into a nested forest
//!
//! The polygons produced for each contour overlap freely: a curve's apex
//! may push one contour into another, and fonts commonly draw strokes as
//! separate overlapping contours. Before triangulation they are merged with
//! a non-zero union into outer boundaries and holes, nested the way they
//! enclose each other.

use i_overlay::{
    core::{fill_rule::FillRule, overlay_rule::OverlayRule},
    float::single::SingleFloatOverlay,
};
use log::trace;
use read::types::ControlPoint;

use crate::curve::contains;

/// One boundary of a merged region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolyNode {
    /// Outer boundaries wind counter-clockwise, holes clockwise.
    pub contour: Vec<ControlPoint>,
    pub is_hole: bool,
    /// For an outer boundary, its holes. For a hole, the outer boundaries
    /// of islands drawn inside it.
    pub children: Vec<PolyNode>,
}

impl PolyNode {
    /// Whether `point` lies in the area of this boundary not covered by
    /// any child.
    pub fn encloses(&self, point: ControlPoint) -> bool {
        !self
            .children
            .iter()
            .any(|child| contains(&child.contour, point))
            && contains(&self.contour, point)
    }
}

/// The result of a polygon union: top-level outer boundaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonForest {
    pub roots: Vec<PolyNode>,
}

impl PolygonForest {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every node, parents before their children.
    pub fn iter(&self) -> impl Iterator<Item = &PolyNode> {
        let mut stack = self.roots.iter().rev().collect::<Vec<_>>();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Whether `point` lies in the filled area of the forest.
    pub fn covers(&self, point: ControlPoint) -> bool {
        self.roots.iter().any(|root| fills(root, point))
    }
}

/// Inside `outer` and not in one of its holes, unless an island of that
/// hole fills the point again.
fn fills(outer: &PolyNode, point: ControlPoint) -> bool {
    contains(&outer.contour, point)
        && outer.children.iter().all(|hole| {
            !contains(&hole.contour, point)
                || hole.children.iter().any(|island| fills(island, point))
        })
}

/// A boolean union of simple polygons under the non-zero fill rule.
pub trait PolygonUnion {
    fn union(&self, polygons: &[Vec<ControlPoint>]) -> PolygonForest;
}

/// [`PolygonUnion`] backed by the `i_overlay` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct IOverlayUnion;

impl PolygonUnion for IOverlayUnion {
    fn union(&self, polygons: &[Vec<ControlPoint>]) -> PolygonForest {
        let paths = polygons
            .iter()
            .filter(|polygon| polygon.len() > 2)
            .map(|polygon| polygon.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if paths.is_empty() {
            return PolygonForest::default();
        }
        // the union of the set with itself resolves overlaps between
        // polygons as well as self-overlaps
        let shapes = paths.overlay(&paths, OverlayRule::Union, FillRule::NonZero);
        let shapes = shapes
            .into_iter()
            .filter_map(|mut contours| {
                if contours.is_empty() {
                    return None;
                }
                let outer = to_points(contours.remove(0));
                let holes = contours.into_iter().map(to_points).collect();
                Some(Shape::new(outer, holes))
            })
            .collect();
        nest(shapes)
    }
}

fn to_points(path: Vec<[f64; 2]>) -> Vec<ControlPoint> {
    path.into_iter().map(|[x, y]| ControlPoint::on(x, y)).collect()
}

/// Twice the signed area of a polygon; positive when counter-clockwise.
pub fn signed_area(polygon: &[ControlPoint]) -> f64 {
    let Some(&last) = polygon.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut sum = 0.0;
    for &point in polygon {
        sum += prev.cross(point);
        prev = point;
    }
    sum
}

/// An outer boundary with its holes, as returned by the overlay.
struct Shape {
    outer: Vec<ControlPoint>,
    holes: Vec<Vec<ControlPoint>>,
}

impl Shape {
    fn new(mut outer: Vec<ControlPoint>, mut holes: Vec<Vec<ControlPoint>>) -> Self {
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }
        for hole in &mut holes {
            if signed_area(hole) > 0.0 {
                hole.reverse();
            }
        }
        Shape { outer, holes }
    }
}

/// Place every shape under the smallest hole of another shape that
/// encloses it.
fn nest(mut shapes: Vec<Shape>) -> PolygonForest {
    // islands[s][h]: shapes sitting in hole h of shape s
    let mut islands = shapes
        .iter()
        .map(|shape| vec![Vec::new(); shape.holes.len()])
        .collect::<Vec<Vec<Vec<usize>>>>();
    let mut top_level = Vec::new();

    for (i, shape) in shapes.iter().enumerate() {
        let Some(&corner) = shape.outer.first() else {
            continue;
        };
        let own_area = signed_area(&shape.outer).abs();
        let parent = shapes
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .flat_map(|(j, other)| {
                other
                    .holes
                    .iter()
                    .enumerate()
                    .map(move |(h, hole)| (j, h, signed_area(hole).abs(), hole))
            })
            .filter(|(_, _, area, hole)| *area > own_area && contains(hole, corner))
            .min_by(|a, b| a.2.total_cmp(&b.2));
        match parent {
            Some((j, h, ..)) => {
                trace!("island {i} nested in hole {h} of shape {j}");
                islands[j][h].push(i);
            }
            None => top_level.push(i),
        }
    }

    let roots = top_level
        .into_iter()
        .map(|i| build_node(i, &mut shapes, &islands))
        .collect();
    PolygonForest { roots }
}

fn build_node(shape: usize, shapes: &mut [Shape], islands: &[Vec<Vec<usize>>]) -> PolyNode {
    let outer = std::mem::take(&mut shapes[shape].outer);
    let holes = std::mem::take(&mut shapes[shape].holes);
    let children = holes
        .into_iter()
        .zip(&islands[shape])
        .map(|(contour, nested)| PolyNode {
            contour,
            is_hole: true,
            children: nested
                .iter()
                .map(|&island| build_node(island, shapes, islands))
                .collect(),
        })
        .collect();
    PolyNode {
        contour: outer,
        is_hole: false,
        children,
    }
}

/// Find a point strictly inside the empty area of a hole.
///
/// Looks for a convex corner of the (clockwise) hole and walks from the
/// corner towards the midpoint of its two neighbours, halving the step
/// until the candidate lies in the hole, off its boundary and outside every
/// island. Gives up on a corner after `steps` halvings and tries the next
/// one.
pub fn find_hole_marker(hole: &PolyNode, steps: usize) -> Option<ControlPoint> {
    let contour = &hole.contour;
    let n = contour.len();
    if n < 3 {
        return None;
    }
    for i in 0..n {
        let a1 = contour[(i + n - 2) % n];
        let a2 = contour[(i + n - 1) % n];
        let a3 = contour[i];
        if (a2 - a1).cross(a3 - a1) >= 0.0 {
            continue;
        }
        // the midpoint itself is on an edge when the hole is a triangle
        let towards = a1.midpoint(a3) - a2;
        let mut scale = 0.5;
        for _ in 0..steps {
            let candidate = a2 + towards * scale;
            if hole.encloses(candidate) && !touches_boundary(hole, candidate) {
                return Some(candidate.with_on_curve(true));
            }
            scale /= 2.0;
        }
    }
    None
}

/// Whether `point` lies on an edge of the hole or of one of its islands.
fn touches_boundary(hole: &PolyNode, point: ControlPoint) -> bool {
    std::iter::once(&hole.contour)
        .chain(hole.children.iter().map(|child| &child.contour))
        .any(|contour| on_edge(contour, point))
}

/// Whether `point` is within a relative `1e-9` of an edge of `polygon`.
fn on_edge(polygon: &[ControlPoint], point: ControlPoint) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    let mut a = last;
    for &b in polygon {
        let edge = b - a;
        let offset = point - a;
        let len_sq = edge.dot(edge);
        let touches = if len_sq == 0.0 {
            offset.dot(offset) == 0.0
        } else {
            let across = edge.cross(offset);
            let along = offset.dot(edge);
            across * across <= 1e-18 * len_sq * len_sq && (0.0..=len_sq).contains(&along)
        };
        if touches {
            return true;
        }
        a = b;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn square(x: f64, y: f64, size: f64) -> Vec<ControlPoint> {
        vec![
            ControlPoint::on(x, y),
            ControlPoint::on(x, y + size),
            ControlPoint::on(x + size, y + size),
            ControlPoint::on(x + size, y),
        ]
    }

    fn reversed(mut polygon: Vec<ControlPoint>) -> Vec<ControlPoint> {
        polygon.reverse();
        polygon
    }

    #[test]
    fn shoelace() {
        let ccw = reversed(square(0.0, 0.0, 10.0));
        assert_eq!(signed_area(&ccw), 200.0);
        assert_eq!(signed_area(&square(0.0, 0.0, 10.0)), -200.0);
        assert_eq!(signed_area(&[]), 0.0);
    }

    #[test]
    fn overlapping_squares_merge() {
        let forest = IOverlayUnion.union(&[square(0.0, 0.0, 10.0), square(5.0, 5.0, 10.0)]);
        assert_eq!(forest.roots.len(), 1);
        let root = &forest.roots[0];
        assert!(!root.is_hole);
        assert!(root.children.is_empty());
        assert!((signed_area(&root.contour) / 2.0 - 175.0).abs() < 1e-9);
    }

    #[test]
    fn ring_has_clockwise_hole() {
        let forest = IOverlayUnion.union(&[
            square(0.0, 0.0, 100.0),
            reversed(square(20.0, 20.0, 60.0)),
        ]);
        assert_eq!(forest.roots.len(), 1);
        let root = &forest.roots[0];
        assert!(signed_area(&root.contour) > 0.0);
        assert_eq!(root.children.len(), 1);
        let hole = &root.children[0];
        assert!(hole.is_hole);
        assert!(signed_area(&hole.contour) < 0.0);
        assert_eq!(forest.iter().count(), 2);
    }

    #[test]
    fn island_nests_under_hole() {
        let forest = IOverlayUnion.union(&[
            square(0.0, 0.0, 100.0),
            reversed(square(20.0, 20.0, 60.0)),
            square(40.0, 40.0, 20.0),
        ]);
        assert_eq!(forest.roots.len(), 1);
        let hole = &forest.roots[0].children[0];
        assert_eq!(hole.children.len(), 1);
        assert!(!hole.children[0].is_hole);
        let kinds = forest.iter().map(|node| node.is_hole).collect::<Vec<_>>();
        assert_eq!(kinds, vec![false, true, false]);
    }

    #[test]
    fn disjoint_squares_stay_apart() {
        let forest = IOverlayUnion.union(&[square(0.0, 0.0, 10.0), square(50.0, 0.0, 10.0)]);
        assert_eq!(forest.roots.len(), 2);
        assert!(IOverlayUnion.union(&[]).is_empty());
    }

    #[test]
    fn hole_marker_avoids_islands() {
        let island = PolyNode {
            contour: reversed(square(2.0, 2.0, 16.0)),
            ..Default::default()
        };
        let hole = PolyNode {
            contour: square(0.0, 0.0, 20.0),
            is_hole: true,
            children: vec![island],
        };
        let marker = find_hole_marker(&hole, 32).unwrap();
        assert!(contains(&hole.contour, marker));
        assert!(!contains(&hole.children[0].contour, marker));
    }

    #[test]
    fn hole_marker_in_triangular_hole() {
        // clockwise; the midpoint of any two corners lies on the third edge
        let contour = vec![
            ControlPoint::on(0.0, 0.0),
            ControlPoint::on(50.0, 100.0),
            ControlPoint::on(100.0, 0.0),
        ];
        assert!(signed_area(&contour) < 0.0);
        let hole = PolyNode {
            contour,
            is_hole: true,
            children: Vec::new(),
        };
        let marker = find_hole_marker(&hole, 32).unwrap();
        assert!(contains(&hole.contour, marker));
        assert!(!on_edge(&hole.contour, marker));
        assert_ne!(marker, ControlPoint::on(25.0, 50.0));
    }

    #[test]
    fn points_on_edges() {
        let triangle = [
            ControlPoint::on(0.0, 0.0),
            ControlPoint::on(50.0, 100.0),
            ControlPoint::on(100.0, 0.0),
        ];
        assert!(on_edge(&triangle, ControlPoint::on(25.0, 50.0)));
        assert!(on_edge(&triangle, ControlPoint::on(100.0, 0.0)));
        assert!(on_edge(&triangle, ControlPoint::on(60.0, 0.0)));
        assert!(!on_edge(&triangle, ControlPoint::on(50.0, 40.0)));
        assert!(!on_edge(&triangle, ControlPoint::on(150.0, 0.0)));
        assert!(!on_edge(&[], ControlPoint::on(0.0, 0.0)));
    }

    #[test]
    fn forest_covers_fill_only() {
        let forest = IOverlayUnion.union(&[
            square(0.0, 0.0, 100.0),
            reversed(square(20.0, 20.0, 60.0)),
            square(40.0, 40.0, 20.0),
        ]);
        assert!(forest.covers(ControlPoint::on(10.0, 10.0)));
        assert!(!forest.covers(ControlPoint::on(30.0, 30.0)));
        assert!(forest.covers(ControlPoint::on(50.0, 50.0)));
        assert!(!forest.covers(ControlPoint::on(150.0, 50.0)));
        assert!(!PolygonForest::default().covers(ControlPoint::on(0.0, 0.0)));
    }

    #[test]
    fn hole_marker_in_plain_hole() {
        let hole = PolyNode {
            contour: square(0.0, 0.0, 20.0),
            is_hole: true,
            children: Vec::new(),
        };
        let marker = find_hole_marker(&hole, 32).unwrap();
        assert!(marker.x > 0.0 && marker.x < 20.0);
        assert!(marker.y > 0.0 && marker.y < 20.0);
        assert_eq!(find_hole_marker(&PolyNode::default(), 32), None);
    }
}
