#![allow(dead_code)]

use flaketrace_engine::core::consts::RAY_MAG;
use flaketrace_engine::core::types::*;
use flaketrace_engine::material::Material;
use flaketrace_engine::shared::ray::Ray;
use rand::{Rng, SeedableRng};

pub type TestRng = rand::rngs::SmallRng;

/// Seeded so failures can be reproduced
pub fn rng() -> TestRng { TestRng::seed_from_u64(0x5EED_F1A4E) }

/// A matte material, with no highlights or reflections
pub fn matte(kd: Colour) -> Material { Material::new(kd, Colour::BLACK, 1., 0.) }

/// A perfect mirror, with no diffuse component
pub fn mirror(kr: Number) -> Material { Material::new(Colour::BLACK, Colour::WHITE, 1., kr) }

pub fn random_point(rng: &mut impl Rng, range: Number) -> Point3 {
    Point3::new(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

/// A random ray starting near the origin, in a random direction, scaled to [RAY_MAG]
pub fn random_ray(rng: &mut impl Rng) -> Ray {
    let pos = random_point(rng, 2.);
    let dir = loop {
        let d = random_point(rng, 1.);
        if d.length_squared() > 0.01 {
            break d;
        }
    };
    let ray = Ray::new_scaled(pos, dir);
    debug_assert!((ray.dir().length() - RAY_MAG).abs() < 1e-6);
    ray
}

/// Checks each channel is within `thresh` of the target
pub fn colours_eq(a: Colour, b: Colour, thresh: Channel) -> bool { (a - b).abs().into_iter().all(|c| c <= thresh) }
