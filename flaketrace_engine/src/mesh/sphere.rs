use crate::core::types::{Number, Point3, Vector3};
use crate::mesh::Mesh;
use crate::shared::aabb::Aabb;
use crate::shared::intersect::MeshIntersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::shared::validate;
use getset::CopyGetters;

/// A sphere mesh.
/// Has precomputed values and therefore cannot be mutated
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct SphereMesh {
    centre: Point3,
    radius: Number,
    radius_sqr: Number,
    #[getset(skip)]
    aabb: Aabb,
}

impl SphereMesh {
    pub fn new(centre: impl Into<Point3>, radius: Number) -> Self {
        let centre = centre.into();
        let mut sphere = Self {
            centre,
            radius,
            radius_sqr: radius * radius,
            aabb: Aabb::default(),
        };
        sphere.aabb = sphere.calc_aabb();
        sphere
    }

    /// Finds the ray parameter of the nearest valid root, if any
    fn solve(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Number> {
        // Degenerate, and would give a NaN normal
        if self.radius == 0. {
            return None;
        }

        #[cfg(feature = "aabb_cull")]
        if !self.aabb.hit(ray) {
            return None;
        }

        let (pos, dir) = (ray.pos(), ray.dir());

        // Quadratic formula variables
        let a = dir.length_squared();
        let b = 2. * Vector3::dot(dir, pos - self.centre);
        let c = self.centre.length_squared() + pos.length_squared() - 2. * Vector3::dot(self.centre, pos) - self.radius_sqr;
        let discriminant = (b * b) - (4. * a * c);

        // Ray misses the sphere entirely
        if discriminant < 0. {
            return None;
        }

        let sqrt_d = discriminant.sqrt();

        // Prefer the nearer root, falling back to the further one if the ray starts inside the sphere
        let mut root = (-b - sqrt_d) / (2. * a);
        if !interval.contains(&root) {
            root = (-b + sqrt_d) / (2. * a);
            if !interval.contains(&root) {
                return None;
            }
        }
        Some(root)
    }
}

impl Mesh for SphereMesh {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<MeshIntersection> {
        let t = self.solve(ray, interval)?;
        let pos = ray.at(t);
        let intersect = MeshIntersection {
            t,
            pos,
            normal: (pos - self.centre) / self.radius,
        };
        validate::intersection(&intersect, interval);
        Some(intersect)
    }

    fn occludes(&self, ray: &Ray, interval: &Interval<Number>) -> bool { self.solve(ray, interval).is_some() }

    fn aabb(&self) -> &Aabb { &self.aabb }

    fn calc_aabb(&self) -> Aabb { Aabb::new_centred(self.centre, self.radius) }
}
