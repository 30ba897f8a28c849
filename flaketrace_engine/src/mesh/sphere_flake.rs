//! A recursive fractal made of spheres.
//!
//! Every flake is a central sphere with up to six smaller flakes attached around it, one along
//! each of `±x`, `±y` and `±z`. Child flakes have half the radius and one less level of recursion.

use crate::core::types::{Number, Point3, Vector3};
use crate::mesh::sphere::SphereMesh;
use crate::mesh::Mesh;
use crate::shared::aabb::Aabb;
use crate::shared::intersect::MeshIntersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use getset::{CopyGetters, Getters};

/// Directions that child flakes are placed along, in order
const CHILD_OFFSETS: [Vector3; 6] = [
    Vector3::X,
    Vector3::NEG_X,
    Vector3::Y,
    Vector3::NEG_Y,
    Vector3::Z,
    Vector3::NEG_Z,
];

/// Distance from a flake's centre to its children's centres, as a multiple of the radius
const CHILD_DISTANCE: Number = 1.5;

/// Half-extent of a flake's bounding box, as a multiple of the radius.
/// Encloses every descendant, however deep
const BOUNDS_EXTENT: Number = 3.0;

#[derive(Clone, Debug, CopyGetters, Getters)]
pub struct SphereFlakeMesh {
    #[get_copy = "pub"]
    centre: Point3,
    #[get_copy = "pub"]
    radius: Number,
    /// Levels of recursion, including this flake. A flake without children has `1` level
    #[get_copy = "pub"]
    levels: usize,
    #[get = "pub"]
    sphere: SphereMesh,
    #[get = "pub"]
    children: Vec<SphereFlakeMesh>,
    aabb: Aabb,
}

// region Constructors

impl SphereFlakeMesh {
    /// Recursively generates a flake with the given number of levels.
    ///
    /// Zero levels is an empty flake, which gives [None]
    pub fn new(centre: impl Into<Point3>, radius: Number, levels: usize) -> Option<Self> {
        if levels == 0 {
            return None;
        }

        let centre = centre.into();
        let children = CHILD_OFFSETS
            .iter()
            .filter_map(|&offset| Self::new(centre + offset * (radius * CHILD_DISTANCE), radius / 2., levels - 1))
            .collect();

        let mut flake = Self {
            centre,
            radius,
            levels,
            sphere: SphereMesh::new(centre, radius),
            children,
            aabb: Aabb::default(),
        };
        flake.aabb = flake.calc_aabb();
        Some(flake)
    }
}

// endregion Constructors

// region Helpers

impl SphereFlakeMesh {
    /// How many flakes make up this flake, including itself.
    ///
    /// Each flake holds exactly one sphere, so this is also the sphere count
    pub fn flake_count(&self) -> usize { 1 + self.children.iter().map(Self::flake_count).sum::<usize>() }

    /// The number of flakes that a flake with `levels` levels has: `Σ_{k<levels} 6^k`
    pub fn flake_count_for_levels(levels: usize) -> usize { (0..levels).map(|k| 6usize.pow(k as u32)).sum() }
}

// endregion Helpers

impl Mesh for SphereFlakeMesh {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<MeshIntersection> {
        #[cfg(feature = "aabb_cull")]
        if !self.aabb.hit(ray) {
            return None;
        }

        let mut closest = self.sphere.intersect(ray, interval);
        for child in &self.children {
            let Some(hit) = child.intersect(ray, interval) else { continue };
            // Strict comparison, so the first of two equal hits wins
            if closest.map_or(true, |c| hit.t < c.t) {
                closest = Some(hit);
            }
        }
        closest
    }

    fn occludes(&self, ray: &Ray, interval: &Interval<Number>) -> bool {
        #[cfg(feature = "aabb_cull")]
        if !self.aabb.hit(ray) {
            return false;
        }

        self.sphere.occludes(ray, interval) || self.children.iter().any(|c| c.occludes(ray, interval))
    }

    fn aabb(&self) -> &Aabb { &self.aabb }

    fn calc_aabb(&self) -> Aabb { Aabb::new_centred(self.centre, self.radius * BOUNDS_EXTENT) }
}
