use approx::assert_relative_eq;
use flaketrace_engine::core::types::*;
use flaketrace_engine::material::Material;
use flaketrace_engine::mesh::infinite_plane::InfinitePlaneMesh;
use flaketrace_engine::mesh::sphere::SphereMesh;
use flaketrace_engine::mesh::sphere_flake::SphereFlakeMesh;
use flaketrace_engine::object::Primitive;
use flaketrace_engine::render::trace::{shade, trace};
use flaketrace_engine::scene::light::Light;
use flaketrace_engine::scene::Scene;
use flaketrace_engine::shared::ray::Ray;
use rand::Rng;

mod common;

/// A white ground plane at `y = 0`, lit from straight above, optionally with a sphere blocking the light
fn ground_scene(light_colour: Colour, occluded: bool) -> Scene {
    let mut scene = Scene::new();
    scene
        .add_primitive(Primitive::new(InfinitePlaneMesh::new(Vector3::Y, 0.), common::matte(Colour::WHITE)))
        .expect("tree not built yet");
    if occluded {
        scene
            .add_primitive(Primitive::new(SphereMesh::new([0., 5., 0.], 1.), common::matte(Colour::WHITE)))
            .expect("tree not built yet");
    }
    scene.add_light(Light::new([0., 10., 0.], light_colour));
    scene
}

/// Looking at the origin, from the side
fn ground_ray() -> Ray { Ray::new_scaled(Point3::new(0., 1., -5.), Vector3::new(0., -1., 5.)) }

#[test]
fn miss_is_black() {
    let scene = ground_scene(Colour::WHITE, false);
    let ray = Ray::new_scaled(Point3::new(0., 1., 0.), Vector3::Y);
    assert_eq!(trace(&scene, &ray, 5), Colour::BLACK);
}

#[test]
fn zero_depth_is_black() {
    let mut scene = ground_scene(Colour::WHITE, false);
    scene.set_ambient(Colour::WHITE);
    let ray = ground_ray();

    assert_eq!(trace(&scene, &ray, 0), Colour::BLACK);
    let hit = scene.intersect(&ray).expect("ray should hit ground");
    assert_eq!(shade(&scene, &ray, &hit, 0), Colour::BLACK);
    assert_ne!(trace(&scene, &ray, 1), Colour::BLACK);
}

/// The lit point straight below the light gets `N.L == 1`, so exactly the light's colour
#[test]
fn unoccluded_light() {
    let light = Colour::rgb(0.5, 0.25, 1.);
    let scene = ground_scene(light, false);

    let colour = trace(&scene, &ground_ray(), 5);
    for (c, l) in colour.into_iter().zip(light) {
        assert_relative_eq!(c, l, epsilon = 1e-6);
    }
}

/// A light fully behind an occluder contributes exactly zero
#[test]
fn shadowed_light_contributes_nothing() {
    let scene = ground_scene(Colour::WHITE, true);
    assert_eq!(trace(&scene, &ground_ray(), 5), Colour::BLACK);

    let mut scene = ground_scene(Colour::WHITE, true);
    let ambient = Colour::rgb(0.2, 0.3, 0.4);
    scene.set_ambient(ambient);
    assert_eq!(trace(&scene, &ground_ray(), 5), ambient);
}

/// Light hitting the back of a surface adds no diffuse light
#[test]
fn light_behind_surface() {
    let mut scene = ground_scene(Colour::WHITE, false);
    scene.add_light(Light::new([0., -10., 0.], Colour::WHITE));

    let colour = trace(&scene, &ground_ray(), 5);
    assert_relative_eq!(colour[0], 1., epsilon = 1e-6);
}

#[test]
fn specular_highlight() {
    let mut scene = Scene::new();
    scene
        .add_primitive(Primitive::new(
            InfinitePlaneMesh::new(Vector3::Y, 0.),
            Material::new(Colour::BLACK, Colour::WHITE, 8., 0.),
        ))
        .expect("tree not built yet");
    // Mirror image of the camera position, so the reflected light points straight at the camera
    scene.add_light(Light::new([0., 1., 5.], Colour::WHITE));

    let colour = trace(&scene, &ground_ray(), 1);
    assert_relative_eq!(colour[0], 1., epsilon = 1e-5);

    // Off-angle, the highlight is much weaker
    let off_axis = Ray::new_scaled(Point3::new(0., 1., -5.), Vector3::new(2., -1., 5.));
    assert!(trace(&scene, &off_axis, 1)[0] < 0.5);
}

/// Two facing mirrors: every bounce adds `ambient * kd`, scaled by `(kr * ks)` for each previous bounce.
///
/// With `kr * ks == 0.5` and `depth` steps, the total is `2 * (1 - 0.5^depth)`
#[test]
fn facing_mirrors_respect_depth() {
    let mut scene = Scene::new();
    let material = Material::new(Colour::WHITE, Colour::WHITE, 1., 0.5);
    scene
        .add_primitive(Primitive::new(InfinitePlaneMesh::new(Vector3::NEG_Z, -1.), material))
        .expect("tree not built yet");
    scene
        .add_primitive(Primitive::new(InfinitePlaneMesh::new(Vector3::Z, -1.), material))
        .expect("tree not built yet");
    scene.set_ambient(Colour::WHITE);

    let ray = Ray::new_scaled(Point3::ZERO, Vector3::Z);
    for depth in 0..=8 {
        let expected = 2. * (1. - 0.5_f32.powi(depth as i32));
        let colour = trace(&scene, &ray, depth);
        println!("depth {depth}: {colour:?}");
        for c in colour {
            assert_relative_eq!(c, expected, epsilon = 1e-5);
        }
    }
}

/// Whatever part of a flake is hit, its top-level material is used
#[test]
fn flake_uses_top_level_material() {
    let mut scene = Scene::new();
    let flake = SphereFlakeMesh::new(Point3::ZERO, 1., 3).expect("flake should exist");
    scene
        .add_primitive(Primitive::new(flake, common::matte(Colour::GREEN)))
        .expect("tree not built yet");
    scene.set_ambient(Colour::WHITE);

    // Outermost flake along -x
    let ray = Ray::new_scaled(Point3::new(-10., 0., 0.), Vector3::X);
    assert_eq!(trace(&scene, &ray, 1), Colour::GREEN);
}

/// Tracing the same rays through the same scene gives bit-identical colours
#[test]
fn tracing_is_repeatable() {
    let mut rng = common::rng();
    let mut scene = Scene::new();
    scene
        .add_primitive(Primitive::new(InfinitePlaneMesh::new(Vector3::Y, -2.), common::mirror(0.6)))
        .expect("tree not built yet");
    for _ in 0..30 {
        let material = Material::new(
            Colour::rgb(rng.gen(), rng.gen(), rng.gen()),
            Colour::rgb(rng.gen(), rng.gen(), rng.gen()),
            rng.gen_range(1. ..50.),
            rng.gen_range(0. ..1.),
        );
        let primitive = Primitive::new(SphereMesh::new(common::random_point(&mut rng, 5.), rng.gen_range(0.2..1.)), material);
        scene.add_primitive(primitive).expect("tree not built yet");
    }
    for _ in 0..3 {
        scene.add_light(Light::new(common::random_point(&mut rng, 10.), Colour::rgb(rng.gen(), rng.gen(), rng.gen())));
    }
    scene.set_ambient(Colour::rgb(0.1, 0.1, 0.1));

    let rays = std::iter::repeat_with(|| common::random_ray(&mut rng)).take(500).collect::<Vec<_>>();
    let first = rays.iter().map(|r| trace(&scene, r, 5)).collect::<Vec<_>>();
    let second = rays.iter().map(|r| trace(&scene, r, 5)).collect::<Vec<_>>();

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.0.map(f32::to_bits), b.0.map(f32::to_bits));
    }
    assert!(first.iter().any(|c| !c.is_black()), "every ray missed, test is meaningless");
}
