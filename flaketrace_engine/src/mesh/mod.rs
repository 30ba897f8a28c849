//! # Module [crate::mesh]
//!
//! This module contains the submodules for the different mesh (see [Mesh] and [MeshInstance]) types.
//! Meshes are pure geometry: they know how to intersect rays and how large they are, but have
//! no material. See [crate::object::Primitive] for the type that combines the two.
//!
//! ## Related
//! - [Mesh]
//! - [MeshInstance]
//! - [sphere], [infinite_plane], [sphere_flake]
//!
//! # DEV: Code Structure
//!
//! Each mesh lives in its own named submodule. Meshes are immutable once constructed, and compute
//! anything they cache (such as the [Aabb]) inside their constructor. Adding a new mesh means adding a
//! variant to [MeshInstance], which gives static dispatch over the closed set of meshes.

use crate::core::types::Number;
use crate::shared::aabb::Aabb;
use crate::shared::intersect::MeshIntersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use enum_dispatch::enum_dispatch;
use std::fmt::Debug;
// noinspection ALL - Used by enum_dispatch macro
#[allow(unused_imports)]
use self::{infinite_plane::InfinitePlaneMesh, sphere::SphereMesh, sphere_flake::SphereFlakeMesh};

pub mod infinite_plane;
pub mod sphere;
pub mod sphere_flake;

// region Mesh traits

#[enum_dispatch]
pub trait Mesh: Debug + Send + Sync {
    /// Attempts to perform an intersection between the given ray and the target mesh
    ///
    /// # Return Value
    /// This should return the *first* intersection whose ray parameter is within the given interval, else [None]
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<MeshIntersection>;

    /// Whether the ray hits the mesh anywhere within the interval.
    ///
    /// Used for shadow rays; meshes can override this to skip calculating the hit position and normal
    fn occludes(&self, ray: &Ray, interval: &Interval<Number>) -> bool { self.intersect(ray, interval).is_some() }

    /// The bounding box of the mesh, cached on construction
    fn aabb(&self) -> &Aabb;

    /// Computes the bounding box of the mesh from scratch
    fn calc_aabb(&self) -> Aabb;

    /// Whether the mesh has finite extents.
    ///
    /// Unbounded meshes report a box of `±RAY_MAG`, which is useless for spatial subdivision
    fn is_bounded(&self) -> bool { true }
}

/// The closed set of meshes, with static dispatch of [Mesh]
#[enum_dispatch(Mesh)]
#[derive(Clone, Debug)]
pub enum MeshInstance {
    SphereMesh,
    InfinitePlaneMesh,
    SphereFlakeMesh,
}

// endregion Mesh traits
