use crate::core::types::{Colour, Point3};

/// A point light with no attenuation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub pos: Point3,
    pub colour: Colour,
}

impl Light {
    pub fn new(pos: impl Into<Point3>, colour: impl Into<Colour>) -> Self {
        Self {
            pos: pos.into(),
            colour: colour.into(),
        }
    }
}

/// A white light at the origin
impl Default for Light {
    fn default() -> Self { Self::new(Point3::ZERO, Colour::WHITE) }
}
