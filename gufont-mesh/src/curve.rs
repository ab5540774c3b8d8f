//! Curve triangles and the primitive tests on them.

use read::types::ControlPoint;

use crate::outline::NodeId;

/// The triangle spanned by one quadratic segment.
///
/// `apex` is the off-curve control point, `base1` and `base2` are the
/// on-curve points (real or implied) before and after it.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveTriangle {
    pub apex: ControlPoint,
    pub base1: ControlPoint,
    pub base2: ControlPoint,
    /// Index of the polygon holding `base1`.
    pub contour: usize,
    /// The polygon vertex for `base1`; split points and the apex are
    /// inserted directly after it.
    pub base: NodeId,
    /// Set by the winding classifier when the apex extends the interior.
    pub is_inside: bool,
}

impl CurveTriangle {
    pub fn new(
        apex: ControlPoint,
        base1: ControlPoint,
        base2: ControlPoint,
        contour: usize,
        base: NodeId,
    ) -> Self {
        CurveTriangle {
            apex,
            base1,
            base2,
            contour,
            base,
            is_inside: false,
        }
    }

    fn corners(&self) -> [ControlPoint; 3] {
        [self.apex, self.base1, self.base2]
    }

    /// The unsigned area.
    pub fn area(&self) -> f64 {
        ((self.base1 - self.apex).cross(self.base2 - self.apex) / 2.0).abs()
    }

    /// The midpoint of the two base vertices.
    pub fn base_midpoint(&self) -> ControlPoint {
        self.base1.midpoint(self.base2)
    }

    /// Whether this triangle contains a corner of `other` or `other` contains
    /// a corner of this one. Touching edges count.
    pub fn intersects(&self, other: &CurveTriangle) -> bool {
        let ours = self.corners();
        let theirs = other.corners();
        ours.iter().any(|p| contains(&theirs, *p)) || theirs.iter().any(|p| contains(&ours, *p))
    }

    /// Split at the midpoints of the two base-to-apex edges.
    ///
    /// Returns both halves and the new on-curve point they share. The first
    /// half keeps this triangle's base vertex; the second one is left
    /// linked to it too and must be relinked to the new point once that has
    /// been inserted into the polygon.
    pub fn split(&self) -> ([CurveTriangle; 2], ControlPoint) {
        let m1 = self.base1.midpoint(self.apex).with_on_curve(false);
        let m2 = self.base2.midpoint(self.apex).with_on_curve(false);
        let shared = m1.midpoint(m2);
        let first = CurveTriangle::new(m1, self.base1, shared, self.contour, self.base);
        let second = CurveTriangle::new(m2, shared, self.base2, self.contour, self.base);
        ([first, second], shared)
    }
}

fn quadrant(vertex: ControlPoint, point: ControlPoint) -> u8 {
    match (vertex.y <= point.y, vertex.x <= point.x) {
        (true, true) => 0,
        (true, false) => 1,
        (false, false) => 2,
        (false, true) => 3,
    }
}

/// Point in polygon by summing quadrant transitions around `point`.
///
/// A point exactly on an edge crossing is reported as contained.
pub fn contains(polygon: &[ControlPoint], point: ControlPoint) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    let mut alpha = 0i32;
    let mut v1 = last;
    let mut q1 = quadrant(v1, point);
    for &v2 in polygon {
        let q2 = quadrant(v2, point);
        match q2.wrapping_sub(q1) & 3 {
            0 => (),
            1 => alpha += 1,
            3 => alpha -= 1,
            _ => {
                // diagonal move: v1 and v2 lie on opposite sides of point.y
                let zx = (v2.x - v1.x) * (point.y - v1.y) / (v2.y - v1.y) + v1.x;
                if point.x == zx {
                    return true;
                }
                if (point.x > zx) == (v2.y > v1.y) {
                    alpha -= 2;
                } else {
                    alpha += 2;
                }
            }
        }
        v1 = v2;
        q1 = q2;
    }
    alpha.abs() == 4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(apex: (f64, f64), base1: (f64, f64), base2: (f64, f64)) -> CurveTriangle {
        CurveTriangle::new(
            ControlPoint::off(apex.0, apex.1),
            ControlPoint::on(base1.0, base1.1),
            ControlPoint::on(base2.0, base2.1),
            0,
            NodeId::default(),
        )
    }

    #[test]
    fn quadrant_containment() {
        let square = [
            ControlPoint::on(0.0, 0.0),
            ControlPoint::on(0.0, 10.0),
            ControlPoint::on(10.0, 10.0),
            ControlPoint::on(10.0, 0.0),
        ];
        assert!(contains(&square, ControlPoint::on(5.0, 5.0)));
        assert!(!contains(&square, ControlPoint::on(15.0, 5.0)));
        assert!(!contains(&square, ControlPoint::on(-1.0, 11.0)));
        // reversed winding is still inside
        let mut reversed = square;
        reversed.reverse();
        assert!(contains(&reversed, ControlPoint::on(2.0, 8.0)));
        assert!(!contains(&[], ControlPoint::on(0.0, 0.0)));
    }

    #[test]
    fn area_is_unsigned() {
        let t = triangle((0.0, 10.0), (0.0, 0.0), (10.0, 0.0));
        assert_eq!(t.area(), 50.0);
        let flipped = triangle((0.0, 10.0), (10.0, 0.0), (0.0, 0.0));
        assert_eq!(flipped.area(), 50.0);
    }

    #[test]
    fn nested_triangles_intersect() {
        let big = triangle((0.0, 100.0), (-100.0, 0.0), (100.0, 0.0));
        let small = triangle((0.0, 50.0), (-10.0, 10.0), (10.0, 10.0));
        let apart = triangle((0.0, 300.0), (-10.0, 200.0), (10.0, 200.0));
        assert!(big.intersects(&small));
        assert!(small.intersects(&big));
        assert!(!big.intersects(&apart));
    }

    #[test]
    fn split_halves() {
        let t = triangle((0.0, 100.0), (-100.0, 0.0), (100.0, 0.0));
        let ([a, b], shared) = t.split();
        assert_eq!(a.apex, ControlPoint::off(-50.0, 50.0));
        assert_eq!(b.apex, ControlPoint::off(50.0, 50.0));
        assert_eq!(shared, ControlPoint::on(0.0, 50.0));
        assert!(shared.on_curve);
        assert!(!a.apex.on_curve);
        assert_eq!((a.base1, a.base2), (t.base1, shared));
        assert_eq!((b.base1, b.base2), (shared, t.base2));
        assert_eq!(a.area(), t.area() / 8.0);
        assert_eq!(b.area(), t.area() / 8.0);
    }
}
