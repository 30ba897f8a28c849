use crate::core::consts::{EPSILON, RAY_MAG};
use crate::core::types::{Number, Point3, Vector3};
use crate::shared::interval::Interval;
use crate::shared::validate;
use getset::CopyGetters;

/// A finite ray segment, spanning from [pos](fn@Self::pos) to `pos + dir`.
///
/// Intersection parameters are fractions of the stored direction, so a parameter of `1.0`
/// is the end of the segment. The direction is *not* normalised.
#[derive(CopyGetters, Copy, Clone, PartialEq, Debug)]
#[getset(get_copy = "pub")]
pub struct Ray {
    /// World-space coordinate of the ray
    pos: Point3,
    /// Direction vector of the ray, including its length
    dir: Vector3,
    /// Component-wise reciprocal of [dir](fn@Self::dir), for the slab test
    inv_dir: Vector3,
}

impl Ray {
    /// The ray parameters that count as a hit: `EPSILON..=1`.
    ///
    /// The lower bound stops a ray from hitting the surface it was cast from
    pub const SEGMENT: Interval<Number> = Interval {
        start: Some(EPSILON),
        end: Some(1.0),
    };

    /// Creates a new ray spanning exactly `pos..pos+dir`
    pub fn new(pos: Point3, dir: Vector3) -> Self {
        validate::point3(pos);
        validate::vector3(dir);
        Self {
            pos,
            dir,
            inv_dir: dir.recip(),
        }
    }

    /// Creates a new ray whose direction is rescaled to [RAY_MAG]
    pub fn new_scaled(pos: Point3, dir: Vector3) -> Self { Self::new(pos, dir.normalize() * RAY_MAG) }

    /// Gets the position at a given parameter along the ray
    ///
    /// `pos + (t * dir)`
    pub fn at(&self, t: Number) -> Point3 { self.pos + (self.dir * t) }
}
