//! # Module [crate::scene]
//!
//! The [Scene] holds everything that gets rendered: primitives, lights, the camera and the ambient light.
//!
//! The acceleration tree over the primitives is built lazily, the first time the scene is queried.
//! From then on the set of primitives is frozen, and trying to change it gives [SceneError::TreeAlreadyBuilt].

use crate::accel::bvh::{Bvh, BvhMode};
use crate::core::targets::SCENE;
use crate::core::types::Colour;
use crate::object::Primitive;
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use getset::{CopyGetters, Getters};
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::debug;
use valuable::Valuable;

pub mod camera;
pub mod light;
pub mod loader;

use self::camera::Camera;
use self::light::Light;

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Valuable)]
pub enum SceneError {
    /// The acceleration tree has been built, so the primitives (or how they are arranged) can't change any more
    #[error("the scene's acceleration tree has already been built")]
    TreeAlreadyBuilt,
}

#[derive(Getters, CopyGetters, Clone, Debug, Default)]
pub struct Scene {
    #[get = "pub"]
    primitives: Vec<Primitive>,
    #[get = "pub"]
    lights: Vec<Light>,
    #[get_copy = "pub"]
    camera: Camera,
    /// Ambient light, scaled by each surface's diffuse colour
    #[get_copy = "pub"]
    ambient: Colour,
    #[get_copy = "pub"]
    bvh_mode: BvhMode,
    bvh: OnceCell<Bvh>,
}

// region Building

impl Scene {
    pub fn new() -> Self { Self::default() }

    pub fn add_primitive(&mut self, primitive: Primitive) -> Result<(), SceneError> {
        self.ensure_not_built()?;
        self.primitives.push(primitive);
        Ok(())
    }

    /// Changes how the acceleration tree will be built
    pub fn set_bvh_mode(&mut self, mode: BvhMode) -> Result<(), SceneError> {
        self.ensure_not_built()?;
        self.bvh_mode = mode;
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) { self.lights.push(light); }

    pub fn set_camera(&mut self, camera: Camera) { self.camera = camera; }

    pub fn set_ambient(&mut self, ambient: impl Into<Colour>) { self.ambient = ambient.into(); }

    fn ensure_not_built(&self) -> Result<(), SceneError> {
        match self.bvh.get() {
            Some(_) => Err(SceneError::TreeAlreadyBuilt),
            None => Ok(()),
        }
    }
}

// endregion Building

// region Queries

impl Scene {
    /// Whether the acceleration tree has been built yet
    pub fn is_built(&self) -> bool { self.bvh.get().is_some() }

    /// Gets the acceleration tree, building it if this is the first call
    pub fn bvh(&self) -> &Bvh {
        self.bvh.get_or_init(|| {
            puffin::profile_scope!("build_bvh");

            let bvh = Bvh::build(self.bvh_mode, &self.primitives);
            debug!(
                target: SCENE,
                mode = %self.bvh_mode,
                primitives = self.primitives.len(),
                nodes = bvh.node_count(),
                objects = bvh.object_count(),
                "built bvh"
            );
            bvh
        })
    }

    /// Finds the nearest intersection along the ray
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.bvh().intersect(ray, &Ray::SEGMENT, &self.primitives)
    }

    /// Whether anything blocks the ray. Used for shadow rays, so no intersection details are calculated
    pub fn occluded(&self, ray: &Ray) -> bool { self.bvh().any_hit(ray, &Ray::SEGMENT, &self.primitives) }
}

// endregion Queries
