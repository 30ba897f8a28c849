use getset::CopyGetters;

use crate::core::consts::EPSILON;
use crate::core::types::{Number, Point3, Vector3};
use crate::mesh::Mesh;
use crate::shared::aabb::Aabb;
use crate::shared::intersect::MeshIntersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::shared::validate;

/// An infinite plane, the set of points `p` where `p·normal == distance`
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct InfinitePlaneMesh {
    /// Unit normal of the plane. Reported for every hit, regardless of which side the ray came from
    normal: Vector3,
    /// Signed distance of the plane from the origin, along the normal
    distance: Number,
    #[getset(skip)]
    aabb: Aabb,
}

// region Constructors

impl InfinitePlaneMesh {
    /// Creates a new plane. The normal does not have to be normalised
    pub fn new(normal: impl Into<Vector3>, distance: Number) -> Self {
        let mut plane = Self {
            normal: normal.into().normalize(),
            distance,
            aabb: Aabb::default(),
        };
        plane.aabb = plane.calc_aabb();
        plane
    }
}

// endregion Constructors

impl InfinitePlaneMesh {
    /// A point on the plane, closest to the origin
    pub fn origin(&self) -> Point3 { self.normal * self.distance }

    fn solve(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Number> {
        let n_dot_dir = Vector3::dot(ray.dir(), self.normal);

        // Parallel with the plane
        if n_dot_dir.abs() < EPSILON {
            return None;
        }

        let t = Vector3::dot(self.origin() - ray.pos(), self.normal) / n_dot_dir;
        interval.contains(&t).then_some(t)
    }
}

impl Mesh for InfinitePlaneMesh {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<MeshIntersection> {
        let t = self.solve(ray, interval)?;
        let intersect = MeshIntersection {
            t,
            pos: ray.at(t),
            normal: self.normal,
        };
        validate::intersection(&intersect, interval);
        Some(intersect)
    }

    fn occludes(&self, ray: &Ray, interval: &Interval<Number>) -> bool { self.solve(ray, interval).is_some() }

    fn aabb(&self) -> &Aabb { &self.aabb }

    fn calc_aabb(&self) -> Aabb { Aabb::new_unbounded() }

    fn is_bounded(&self) -> bool { false }
}
