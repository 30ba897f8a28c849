use crate::core::types::{Number, Point3, Vector3};
use crate::shared::ray::Ray;
use crate::shared::validate;
use puffin::profile_function;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};
use thiserror::Error;
use valuable::Valuable;

/// A pinhole camera. World up is always `+Y`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Position the camera is located at
    pub pos: Point3,
    /// Point the camera is looking towards
    pub target: Point3,
    /// Vertical FOV, in radians
    pub v_fov: Number,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Point3::ZERO,
            target: Point3::Z,
            v_fov: FRAC_PI_4,
        }
    }
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Valuable)]
pub enum CamInvalidError {
    /// The look direction was parallel to the world up vector, so the camera's right vector couldn't be found
    #[error("the look direction is parallel to the `up` vector")]
    UpVectorInvalid,
    /// The calculated look direction (forward vector) was not valid. Check the target isn't the camera position
    #[error("the look direction couldn't be normalised (target too close to position)")]
    ForwardVectorInvalid,
    /// The field-of-view was not in the range `0..PI`
    #[error("the provided FOV was not valid")]
    FovInvalid,
}

impl Camera {
    pub fn new(pos: impl Into<Point3>, target: impl Into<Point3>, v_fov: Number) -> Self {
        Self {
            pos: pos.into(),
            target: target.into(),
            v_fov,
        }
    }

    /// A method for calculating the viewport from a camera
    ///
    /// # Errors
    /// This will return a [`CamInvalidError`] if any of the settings of the camera are not valid, and so
    /// the viewport couldn't be calculated.
    pub fn calculate_viewport(&self) -> Result<Viewport, CamInvalidError> {
        profile_function!();

        if !(self.v_fov > 0. && self.v_fov < PI) {
            return Err(CamInvalidError::FovInvalid);
        }

        // Calculate the i,j,k unit basis vectors for the camera coordinate frame.
        let k = (self.target - self.pos)
            .try_normalize()
            .ok_or(CamInvalidError::ForwardVectorInvalid)?;
        let i = Vector3::cross(Vector3::Y, k)
            .try_normalize()
            .ok_or(CamInvalidError::UpVectorInvalid)?;
        let j = Vector3::cross(k, i);

        let focal_length = 1. / (self.v_fov / 2.).tan();

        validate::point3(self.pos);
        validate::vector3(i);
        validate::vector3(j);
        validate::vector3(k);
        validate::number(focal_length);

        Ok(Viewport {
            pos: self.pos,
            i,
            j,
            k,
            focal_length,
        })
    }
}

/// The precomputed camera frame, used to generate primary rays
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pos: Point3,
    /// Right
    pub i: Vector3,
    /// Up
    pub j: Vector3,
    /// Forward
    pub k: Vector3,
    /// Distance to the image plane, which spans `-1..1` vertically
    pub focal_length: Number,
}

impl Viewport {
    /// Calculates the view ray for a given pixel at the coords `(px, py)`
    /// (screen-space, top-left to bot-right), for an image of size `w * h`.
    ///
    /// Both image axes are mapped onto `-1..1`, so non-square images are stretched.
    /// The ray direction is scaled to [RAY_MAG](crate::core::consts::RAY_MAG)
    pub fn calc_ray(&self, px: Number, py: Number, w: Number, h: Number) -> Ray {
        let x = (2. * px / w) - 1.;
        let y = 1. - (2. * py / h);

        let dir = (self.i * x) + (self.j * y) + (self.k * self.focal_length);
        Ray::new_scaled(self.pos, dir)
    }
}
