//! # Module [crate::object]
//!
//! A [Primitive] is a mesh with a material attached; the unit that a [scene](crate::scene::Scene) stores

use crate::core::types::Number;
use crate::material::Material;
use crate::mesh::{Mesh, MeshInstance};
use crate::shared::aabb::Aabb;
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use getset::{CopyGetters, Getters};

#[derive(Getters, CopyGetters, Clone, Debug)]
pub struct Primitive {
    #[get = "pub"]
    mesh: MeshInstance,
    #[get_copy = "pub"]
    material: Material,
}

impl Primitive {
    pub fn new(mesh: impl Into<MeshInstance>, material: Material) -> Self {
        Self {
            mesh: mesh.into(),
            material,
        }
    }

    /// Intersects the mesh, reporting this primitive as the object that was hit.
    ///
    /// For composite meshes like sphere flakes, the hit is reported against the whole flake
    pub fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection<'_>> {
        self.mesh.intersect(ray, interval).map(|i| i.with_primitive(self))
    }

    pub fn occludes(&self, ray: &Ray, interval: &Interval<Number>) -> bool { self.mesh.occludes(ray, interval) }

    pub fn aabb(&self) -> &Aabb { self.mesh.aabb() }

    pub fn is_bounded(&self) -> bool { self.mesh.is_bounded() }
}
