//! The recursive Whitted shading algorithm.
//!
//! Every hit is lit by the scene's ambient light and by each point light that isn't shadowed,
//! using the Phong model. Reflective surfaces recurse with a mirrored ray, until the depth runs out.

use crate::core::types::{Channel, Colour};
use crate::shared::intersect::Intersection;
use crate::shared::math::reflect;
use crate::shared::ray::Ray;
use crate::scene::Scene;

/// Finds the colour seen along the ray.
///
/// A miss is black. `depth` is the number of shading steps still allowed, so a depth of `0` is always black
pub fn trace(scene: &Scene, ray: &Ray, depth: usize) -> Colour {
    match scene.intersect(ray) {
        Some(hit) => shade(scene, ray, &hit, depth),
        None => Colour::BLACK,
    }
}

/// Calculates the colour at an intersection.
///
/// Colours are not clamped; that is left for when the image is output
pub fn shade(scene: &Scene, ray: &Ray, hit: &Intersection, depth: usize) -> Colour {
    if depth == 0 {
        return Colour::BLACK;
    }

    let material = hit.primitive.material();
    let (n, p) = (hit.normal, hit.pos);
    let to_viewer = (ray.pos() - p).normalize_or_zero();

    let mut colour = scene.ambient() * material.kd();

    for light in scene.lights() {
        // Unscaled, so the segment ends exactly at the light
        let shadow_ray = Ray::new(p, light.pos - p);
        if scene.occluded(&shadow_ray) {
            continue;
        }

        let to_light = shadow_ray.dir().normalize_or_zero();
        colour += material.phong(n, to_light, to_viewer) * light.colour;
    }

    if material.is_reflective() {
        let reflected = Ray::new(p, reflect(ray.dir(), n));
        let reflection = trace(scene, &reflected, depth - 1);
        colour += reflection * material.ks() * (material.kr() as Channel);
    }

    colour
}
