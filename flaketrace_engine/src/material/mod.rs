//! # Module [crate::material]
//!
//! Phong surface properties, used by [crate::render::trace::shade]

use crate::core::types::{Channel, Colour, Number, Vector3};
use crate::shared::math::reflect;
use getset::CopyGetters;

/// The reflectance properties of a surface
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Material {
    /// Diffuse reflectance. Also scales the ambient light
    kd: Colour,
    /// Specular reflectance. Also tints mirror reflections
    ks: Colour,
    /// Phong exponent of the specular highlight
    shininess: Number,
    /// How much of the mirror reflection is added; `0` disables reflection rays
    kr: Number,
}

impl Material {
    pub fn new(kd: impl Into<Colour>, ks: impl Into<Colour>, shininess: Number, kr: Number) -> Self {
        Self {
            kd: kd.into(),
            ks: ks.into(),
            shininess,
            kr,
        }
    }

    /// Whether a reflection ray should be traced for this material
    pub fn is_reflective(&self) -> bool { self.kr > 0. }

    /// The Phong reflectance towards the viewer, for a single unit-intensity light
    ///
    /// # Arguments
    /// * `normal`: Unit surface normal
    /// * `to_light`: Unit vector from the surface towards the light
    /// * `to_viewer`: Unit vector from the surface towards the ray origin
    pub fn phong(&self, normal: Vector3, to_light: Vector3, to_viewer: Vector3) -> Colour {
        let diffuse = Number::max(0., normal.dot(to_light));
        // Mirror of the light direction about the normal
        let r = reflect(-to_light, normal);
        let specular = Number::max(0., r.dot(to_viewer)).powf(self.shininess);

        self.kd * (diffuse as Channel) + self.ks * (specular as Channel)
    }
}

impl Default for Material {
    fn default() -> Self { Self::new(Colour::WHITE, Colour::BLACK, 1., 0.) }
}
