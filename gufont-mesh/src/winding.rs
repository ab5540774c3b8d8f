//! Classifying curve triangles against the raw contours
//!
//! The midpoint of a curve's two base vertices lies outside the control
//! polygon exactly when the curve bends into the glyph. Those curves
//! (winding number zero) are marked inside and their apex is added to the
//! filled polygon; the rendered curve then only restores the sliver between
//! the apex and the curve. All others keep the chord as the polygon edge and
//! render the area between chord and curve.

use read::{tables::glyf::Contour, types::ControlPoint};

use crate::outline::Outline;

/// Length of the ray used for the exact crossing test.
const RAY_LENGTH: f64 = 1000.0;

/// The signed number of times `contours` wind around `point`.
///
/// Edges run between consecutive raw points, off-curve points included.
/// Edges touching the horizontal through `point` at an end point are
/// ignored.
pub fn winding_number(point: ControlPoint, contours: &[Contour]) -> i32 {
    contours
        .iter()
        .flat_map(Contour::edges)
        .map(|(a, b)| crossing(point, a, b))
        .sum()
}

/// The contribution of the edge `a -> b` to the winding number at `p`:
/// `+1` for a downward crossing right of `p`, `-1` for an upward one.
fn crossing(p: ControlPoint, a: ControlPoint, b: ControlPoint) -> i32 {
    let direction = if a.y > p.y && b.y < p.y {
        1
    } else if a.y < p.y && b.y > p.y {
        -1
    } else {
        return 0;
    };
    if a.x > p.x && b.x > p.x {
        return direction;
    }
    let straddles = (a.x > p.x && b.x < p.x) || (a.x < p.x && b.x > p.x);
    if straddles && ray_hits(p, a, b) {
        direction
    } else {
        0
    }
}

/// Whether the ray from `p` towards +x meets the segment `a -> b`.
fn ray_hits(p: ControlPoint, a: ControlPoint, b: ControlPoint) -> bool {
    let r = ControlPoint::off(RAY_LENGTH, 0.0);
    let s = b - a;
    let t = (a - p).cross(s) / r.cross(s);
    let u = (p - a).cross(r) / s.cross(r);
    t >= 0.0 && (0.0..=1.0).contains(&u)
}

/// Set [`is_inside`] on every curve triangle and insert the apex of each
/// inside triangle after its base vertex.
///
/// [`is_inside`]: crate::curve::CurveTriangle::is_inside
pub fn classify(outline: &mut Outline, contours: &[Contour]) {
    let Outline {
        polygons,
        triangles,
    } = outline;
    for triangle in triangles.iter_mut() {
        triangle.is_inside = winding_number(triangle.base_midpoint(), contours) == 0;
        if triangle.is_inside {
            polygons[triangle.contour].insert_after(triangle.base, triangle.apex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{contour, contours};
    use gufont_test_data::glyphs;

    #[test]
    fn winding_of_nested_squares() {
        let ring = contours(&glyphs::square_ring(100, 20));
        // the outer square is clockwise, the hole counter-clockwise
        assert_eq!(winding_number(ControlPoint::on(10.0, 50.0), &ring), 1);
        assert_eq!(winding_number(ControlPoint::on(50.0, 50.0), &ring), 0);
        assert_eq!(winding_number(ControlPoint::on(150.0, 50.0), &ring), 0);
    }

    #[test]
    fn slanted_edge_uses_exact_crossing() {
        let triangle = contour(&[(0, 0, true), (40, 100, true), (100, 0, true)]);
        let contours = [triangle];
        // both inside, left and right of the slanted edge's lower x
        assert_ne!(winding_number(ControlPoint::on(50.0, 50.0), &contours), 0);
        assert_ne!(winding_number(ControlPoint::on(30.0, 20.0), &contours), 0);
        assert_eq!(winding_number(ControlPoint::on(90.0, 60.0), &contours), 0);
    }

    #[test]
    fn level_vertices_are_not_crossings() {
        let diamond = [contour(&[
            (0, 50, true),
            (50, 100, true),
            (100, 50, true),
            (50, 0, true),
        ])];
        // every edge ends on the horizontal through the side corners
        assert_eq!(winding_number(ControlPoint::on(45.0, 50.0), &diamond), 0);
        assert_ne!(winding_number(ControlPoint::on(45.0, 40.0), &diamond), 0);
    }

    #[test]
    fn circle_curves_are_outside() {
        let contours = [contour(&glyphs::four_point_circle(0, 0, 100))];
        let mut outline = Outline::build(&contours);
        classify(&mut outline, &contours);
        assert!(outline.triangles.iter().all(|t| !t.is_inside));
        assert_eq!(outline.polygons[0].len(), 4);
    }

    #[test]
    fn dent_apex_joins_polygon() {
        let contours = [contour(&glyphs::square_with_dent(100, 30))];
        let mut outline = Outline::build(&contours);
        classify(&mut outline, &contours);
        assert!(outline.triangles[0].is_inside);
        let points = outline.polygons[0]
            .points()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>();
        assert_eq!(
            points,
            vec![(0.0, 0.0), (0.0, 100.0), (50.0, 70.0), (100.0, 100.0), (100.0, 0.0)]
        );
    }
}
