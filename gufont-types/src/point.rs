//! Outline points

use core::ops::{Add, Div, Mul, Neg, Sub};

/// A point in an outline, tagged with whether it lies on the curve.
///
/// Arithmetic treats points as vectors; the result of any arithmetic
/// operation is always off-curve. Equality only considers the coordinates.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    pub on_curve: bool,
}

impl ControlPoint {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Creates a new on-curve point.
    pub const fn on(x: f64, y: f64) -> Self {
        Self::new(x, y, true)
    }

    /// Creates a new off-curve point.
    pub const fn off(x: f64, y: f64) -> Self {
        Self::new(x, y, false)
    }

    /// The z component of the cross product of `self` and `other`, treated
    /// as vectors.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The dot product of `self` and `other`, treated as vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length of the vector from the origin.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// The on-curve point halfway between `self` and `other`.
    ///
    /// This is the point implied between two consecutive off-curve points.
    pub fn midpoint(self, other: Self) -> Self {
        Self::on((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Returns this point with a different curve flag.
    pub fn with_on_curve(self, on_curve: bool) -> Self {
        Self { on_curve, ..self }
    }
}

impl PartialEq for ControlPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Add for ControlPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::off(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ControlPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::off(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for ControlPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::off(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for ControlPoint {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::off(self.x / rhs, self.y / rhs)
    }
}

impl Neg for ControlPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::off(-self.x, -self.y)
    }
}
