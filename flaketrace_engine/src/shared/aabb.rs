use std::borrow::Borrow;

use getset::*;

use crate::core::consts::RAY_MAG;
use crate::core::types::{Number, Point3, Vector3};
use crate::shared::ray::Ray;

/// An **Axis-Aligned Bounding Box** (AABB)
///
/// The box spans between the two corners `min` and `max`'
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq, Default)]
#[getset(get_copy = "pub")]
pub struct Aabb {
    /// The lower corner of the [Aabb]; the corner with the smallest coordinates
    min: Point3,
    /// The upper corner of the [Aabb]; the corner with the largest coordinates
    max: Point3,
    /// The difference between [min](fn@Self::min) and [max](fn@Self::max); how large the [Aabb] is
    size: Vector3,
    /// Surface area, used as the cost estimate when splitting the BVH
    area: Number,
}

// region Constructors

impl Aabb {
    /// Creates a new [Aabb] from two points, which do *not* have to be sorted by min/max
    pub fn new(a: impl Into<Point3>, b: impl Into<Point3>) -> Self {
        let (a, b) = (a.into(), b.into());
        let min = Point3::min(a, b);
        let max = Point3::max(a, b);
        let size = max - min;
        let area = ((size.x * size.y) + (size.y * size.z) + (size.z * size.x)) * 2.;
        Self { min, max, size, area }
    }

    /// Creates a box around `centre`, extending `half_extent` along every axis in both directions
    pub fn new_centred(centre: impl Into<Point3>, half_extent: Number) -> Self {
        let centre = centre.into();
        let half = Vector3::splat(half_extent);
        Self::new(centre - half, centre + half)
    }

    /// The box used for unbounded geometry, and for the root of the BVH: `±RAY_MAG` on every axis
    pub fn new_unbounded() -> Self { Self::new_centred(Point3::ZERO, RAY_MAG) }

    /// Returns an [Aabb] that surrounds the two given boxes
    pub fn encompass(a: impl Borrow<Self>, b: impl Borrow<Self>) -> Self {
        let (a, b) = (a.borrow(), b.borrow());
        let min = Point3::min(a.min, b.min);
        let max = Point3::max(a.max, b.max);
        Self::new(min, max)
    }

    /// [Self::encompass] but for an arbitrary number of boxes.
    ///
    /// An empty iterator gives the [default](Self::default) box, a point at the origin
    pub fn encompass_iter<B: Borrow<Self>>(iter: impl IntoIterator<Item = B>) -> Self {
        iter.into_iter()
            .map(|b| *b.borrow())
            .reduce(Self::encompass)
            .unwrap_or_default()
    }
}

// endregion Constructors

// region Helper

impl Aabb {
    pub fn centre(&self) -> Point3 { self.min + self.size / 2. }

    /// Whether the point is strictly inside the box, on every axis
    pub fn contains_strict(&self, p: Point3) -> bool { p.cmpgt(self.min).all() && p.cmplt(self.max).all() }
}

// endregion Helper

// region Impl

impl Aabb {
    /// Checks whether the given ray segment passes through the box.
    ///
    /// A ray starting strictly inside the box always hits. Otherwise the ray's slab intervals
    /// are intersected, and the hit must overlap the segment `t < 1 && t > 0`
    pub fn hit(&self, ray: &Ray) -> bool {
        let pos = ray.pos();
        if self.contains_strict(pos) {
            return true;
        }

        let inv_dir = ray.inv_dir();
        let (mut tmin, mut tmax) = (Number::NEG_INFINITY, Number::INFINITY);

        for axis in 0..3 {
            // Pick the face the ray enters through first.
            // Zero components give signed infinities, which still compare correctly
            let (near, far) = if inv_dir[axis] >= 0. {
                (self.min[axis], self.max[axis])
            } else {
                (self.max[axis], self.min[axis])
            };

            let t0 = (near - pos[axis]) * inv_dir[axis];
            let t1 = (far - pos[axis]) * inv_dir[axis];

            // Disjoint with the intervals found so far
            if tmin > t1 || t0 > tmax {
                return false;
            }
            tmin = Number::max(tmin, t0);
            tmax = Number::min(tmax, t1);
        }

        tmin < 1. && tmax > 0.
    }
}

// endregion Impl
