//! Splitting overlapping curve triangles
//!
//! Curve triangles of tight curves (serifs, ink traps) can overlap each
//! other, which would cover the same area twice. Each pass splits every
//! triangle that overlaps a non-neighbouring, smaller triangle into its two
//! de Casteljau halves. The effort is bounded: whatever still overlaps after
//! the last pass is left as is.

use log::trace;

use crate::{curve::CurveTriangle, outline::Outline};

/// Returns `true` if `a` and `b` follow each other in the (cyclic)
/// triangle list.
fn are_neighbours(a: usize, b: usize, len: usize) -> bool {
    (a + 1) % len == b || (b + 1) % len == a
}

/// Whether triangle `i` overlaps a smaller triangle that is not its
/// neighbour.
fn needs_split(triangles: &[CurveTriangle], i: usize) -> bool {
    let len = triangles.len();
    let triangle = &triangles[i];
    (0..len)
        .filter(|&j| j != i && !are_neighbours(i, j, len))
        .any(|j| {
            let other = &triangles[j];
            triangle.intersects(other) && triangle.area() > other.area()
        })
}

/// Run up to `max_passes` splitting passes over the outline.
///
/// Stops early once a pass splits nothing. Returns the number of passes that
/// performed at least one split.
pub fn resolve_intersections(outline: &mut Outline, max_passes: usize) -> usize {
    let mut passes = 0;
    for pass in 0..max_passes {
        let triangles = &outline.triangles;
        let to_split = (0..triangles.len())
            .rev()
            .filter(|&i| needs_split(triangles, i))
            .collect::<Vec<_>>();
        if to_split.is_empty() {
            break;
        }
        trace!("split pass {pass}: splitting {} triangle(s)", to_split.len());

        // every decision above was made against the unsplit list, splitting
        // from the back keeps the indices of pending splits stable
        for i in to_split {
            let parent = outline.triangles[i].clone();
            let ([first, mut second], shared) = parent.split();
            second.base = outline.polygons[parent.contour].insert_after(parent.base, shared);
            trace!(
                "split curve ({}, {}) at ({}, {})",
                parent.apex.x,
                parent.apex.y,
                shared.x,
                shared.y
            );
            outline.triangles.splice(i..=i, [first, second]);
        }
        passes += 1;
    }
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{curve::contains, outline::LinkedPolygon};
    use read::types::ControlPoint;

    /// Build an outline holding exactly the given curves, each base vertex
    /// pushed into a single polygon.
    fn outline_of(curves: &[[(f64, f64); 3]]) -> Outline {
        let mut polygon = LinkedPolygon::new();
        let triangles = curves
            .iter()
            .map(|[apex, base1, base2]| {
                let base1 = ControlPoint::on(base1.0, base1.1);
                let base = polygon.push_back(base1);
                CurveTriangle::new(
                    ControlPoint::off(apex.0, apex.1),
                    base1,
                    ControlPoint::on(base2.0, base2.1),
                    0,
                    base,
                )
            })
            .collect();
        Outline {
            polygons: vec![polygon],
            triangles,
        }
    }

    fn fully_contains(outer: &CurveTriangle, inner: &CurveTriangle) -> bool {
        let polygon = [outer.apex, outer.base1, outer.base2];
        [inner.apex, inner.base1, inner.base2]
            .into_iter()
            .all(|p| contains(&polygon, p))
    }

    #[test]
    fn nested_pair_resolves() {
        let mut outline = outline_of(&[
            [(0.0, 100.0), (-100.0, 0.0), (100.0, 0.0)],
            [(1000.0, 100.0), (900.0, 0.0), (1100.0, 0.0)],
            [(0.0, 90.0), (-10.0, 60.0), (10.0, 60.0)],
            [(-1000.0, 100.0), (-1100.0, 0.0), (-900.0, 0.0)],
        ]);
        assert!(fully_contains(&outline.triangles[0], &outline.triangles[2]));

        let passes = resolve_intersections(&mut outline, 4);
        assert!(passes <= 4);
        assert_eq!(passes, 1);
        assert_eq!(outline.triangles.len(), 5);

        let triangles = &outline.triangles;
        for (i, a) in triangles.iter().enumerate() {
            for (j, b) in triangles.iter().enumerate() {
                if i != j {
                    assert!(!fully_contains(a, b), "{i} contains {j}");
                }
            }
        }
    }

    #[test]
    fn split_point_follows_parent_base() {
        let mut outline = outline_of(&[
            [(0.0, 100.0), (-100.0, 0.0), (100.0, 0.0)],
            [(1000.0, 100.0), (900.0, 0.0), (1100.0, 0.0)],
            [(0.0, 90.0), (-10.0, 60.0), (10.0, 60.0)],
            [(-1000.0, 100.0), (-1100.0, 0.0), (-900.0, 0.0)],
        ]);
        resolve_intersections(&mut outline, 4);
        let points = outline.polygons[0]
            .points()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>();
        assert_eq!(
            points,
            vec![(-100.0, 0.0), (0.0, 50.0), (900.0, 0.0), (-10.0, 60.0), (-1100.0, 0.0)]
        );
        let second = &outline.triangles[1];
        assert_eq!(outline.polygons[0].point(second.base), second.base1);
    }

    #[test]
    fn disjoint_curves_are_untouched() {
        let mut outline = outline_of(&[
            [(0.0, 10.0), (-10.0, 0.0), (10.0, 0.0)],
            [(100.0, 10.0), (90.0, 0.0), (110.0, 0.0)],
            [(200.0, 10.0), (190.0, 0.0), (210.0, 0.0)],
            [(300.0, 10.0), (290.0, 0.0), (310.0, 0.0)],
        ]);
        assert_eq!(resolve_intersections(&mut outline, 4), 0);
        assert_eq!(outline.triangles.len(), 4);
    }

    #[test]
    fn zero_passes_does_nothing() {
        let mut outline = outline_of(&[
            [(0.0, 100.0), (-100.0, 0.0), (100.0, 0.0)],
            [(1000.0, 100.0), (900.0, 0.0), (1100.0, 0.0)],
            [(0.0, 90.0), (-10.0, 60.0), (10.0, 60.0)],
            [(-1000.0, 100.0), (-1100.0, 0.0), (-900.0, 0.0)],
        ]);
        assert_eq!(resolve_intersections(&mut outline, 0), 0);
        assert_eq!(outline.triangles.len(), 4);
    }
}
