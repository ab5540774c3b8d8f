/// Receives the segments of an outline.
///
/// Only lines and quadratic curves occur in TrueType outlines.
pub trait Pen {
    /// Start a new contour at `(x, y)`.
    fn move_to(&mut self, x: f32, y: f32);

    /// A straight segment to `(x, y)`.
    fn line_to(&mut self, x: f32, y: f32);

    /// A quadratic segment controlled by `(cx0, cy0)`, ending at `(x, y)`.
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32);

    /// Close the current contour.
    fn close(&mut self);
}
