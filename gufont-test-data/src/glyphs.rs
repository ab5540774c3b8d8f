//! Canned glyph outlines in font units.
//!
//! Points are `(x, y, on_curve)`.

pub type Point = (i16, i16, bool);

/// An axis aligned square made of on-curve points, wound clockwise as
/// TrueType outer contours are.
pub fn square(x: i16, y: i16, size: i16) -> Vec<Point> {
    vec![
        (x, y, true),
        (x, y + size, true),
        (x + size, y + size, true),
        (x + size, y, true),
    ]
}

/// A square around the origin wound counter-clockwise, the orientation
/// of a counter (hole) contour.
pub fn square_hole(x: i16, y: i16, size: i16) -> Vec<Point> {
    vec![
        (x, y, true),
        (x + size, y, true),
        (x + size, y + size, true),
        (x, y + size, true),
    ]
}

/// A circle drawn with four off-curve points at the corners of a square
/// of half-width `a`; the implied on-curve points lie at distance `a` from
/// `(cx, cy)`.
pub fn four_point_circle(cx: i16, cy: i16, a: i16) -> Vec<Point> {
    vec![
        (cx + a, cy + a, false),
        (cx + a, cy - a, false),
        (cx - a, cy - a, false),
        (cx - a, cy + a, false),
    ]
}

/// A square whose top edge bows inward through a single control point.
pub fn square_with_dent(size: i16, depth: i16) -> Vec<Point> {
    vec![
        (0, 0, true),
        (0, size, true),
        (size / 2, size - depth, false),
        (size, size, true),
        (size, 0, true),
    ]
}

/// A square whose right edge bulges outward through a single control point.
pub fn square_with_bulge(size: i16, height: i16) -> Vec<Point> {
    vec![
        (0, 0, true),
        (0, size, true),
        (size, size, true),
        (size + height, size / 2, false),
        (size, 0, true),
    ]
}

/// The letter 'O' drawn as an outer and an inner square.
pub fn square_ring(size: i16, inset: i16) -> Vec<Vec<Point>> {
    vec![
        square(0, 0, size),
        square_hole(inset, inset, size - 2 * inset),
    ]
}

/// A square with a triangular counter: the base of the counter runs
/// `inset` above the bottom edge, its tip `inset` below the top edge.
pub fn square_with_triangular_counter(size: i16, inset: i16) -> Vec<Vec<Point>> {
    vec![
        square(0, 0, size),
        vec![
            (inset, inset, true),
            (size - inset, inset, true),
            (size / 2, size - inset, true),
        ],
    ]
}

/// A square with a round counter of half-width `a` at its centre.
pub fn square_with_round_counter(size: i16, a: i16) -> Vec<Vec<Point>> {
    let mut counter = four_point_circle(size / 2, size / 2, a);
    counter.reverse();
    vec![square(0, 0, size), counter]
}
