//! Shared helpers for unit tests.

use gufont_test_data::glyphs::Point;
use read::{
    tables::glyf::{Contour, Glyph, SimpleGlyph},
    types::{ControlPoint, Pen},
};

pub(crate) fn contour(points: &[Point]) -> Contour {
    points
        .iter()
        .map(|(x, y, on)| ControlPoint::new(*x as f64, *y as f64, *on))
        .collect::<Vec<_>>()
        .into()
}

pub(crate) fn contours(glyph: &[Vec<Point>]) -> Vec<Contour> {
    glyph.iter().map(|points| contour(points)).collect()
}

pub(crate) fn simple_glyph(glyph: &[Vec<Point>]) -> Glyph {
    Glyph::Simple(SimpleGlyph {
        contours: contours(glyph),
        ..Default::default()
    })
}

/// Collects a glyph outline for computing reference areas.
#[derive(Default)]
pub(crate) struct KurboPen(pub kurbo::BezPath);

impl Pen for KurboPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0.quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}

/// The filled area of a glyph's exact outline.
pub(crate) fn outline_area(glyph: &Glyph) -> f64 {
    use kurbo::Shape;
    let mut pen = KurboPen::default();
    glyph.draw(&mut pen);
    pen.0.area().abs()
}
