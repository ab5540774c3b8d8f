/// An axis aligned rectangle given by its corners, as stored in `head` and
/// in every glyph header.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    pub x_min: T,
    /// The bottom edge; font coordinates grow upwards.
    pub y_min: T,
    pub x_max: T,
    pub y_max: T,
}

impl<T: PartialOrd + Copy> BoundingBox<T> {
    /// Returns `true` if `(x, y)` lies inside or on the edge of the box.
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}
