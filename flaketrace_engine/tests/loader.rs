use approx::assert_relative_eq;
use flaketrace_engine::core::types::*;
use flaketrace_engine::mesh::MeshInstance;
use flaketrace_engine::scene::camera::Camera;
use flaketrace_engine::scene::loader::{load_file, load_files, load_str, parse_line, LoadError, ParseError, Record, SceneLoader};
use std::io::Write;

const MATERIAL: &str = "kd(0.5 0.5 0.5) ks(1 1 1) s(20) kr(0.25)";

fn parse(line: &str) -> Record {
    parse_line(line)
        .expect("line should parse")
        .expect("line should hold a record")
}

#[test]
fn sphere_record() {
    let Record::Primitive(prim) = parse(&format!("s c(1 2 3) r(0.5) {MATERIAL}")) else {
        panic!("expected primitive")
    };
    let MeshInstance::SphereMesh(sphere) = prim.mesh() else {
        panic!("expected sphere, found {:?}", prim.mesh())
    };
    assert_eq!(sphere.centre(), Point3::new(1., 2., 3.));
    assert_eq!(sphere.radius(), 0.5);

    let material = prim.material();
    assert_eq!(material.kd(), Colour::rgb(0.5, 0.5, 0.5));
    assert_eq!(material.ks(), Colour::WHITE);
    assert_eq!(material.shininess(), 20.);
    assert_eq!(material.kr(), 0.25);
}

#[test]
fn plane_record() {
    let Record::Primitive(prim) = parse(&format!("p n(0 2 0) d(-1) {MATERIAL}")) else {
        panic!("expected primitive")
    };
    let MeshInstance::InfinitePlaneMesh(plane) = prim.mesh() else {
        panic!("expected plane, found {:?}", prim.mesh())
    };
    // Normal is normalised on construction
    assert_relative_eq!(plane.normal(), Vector3::Y);
    assert_eq!(plane.distance(), -1.);
}

#[test]
fn flake_record() {
    let Record::Primitive(prim) = parse(&format!("f c(0 0 0) r(1) i(3) {MATERIAL}")) else {
        panic!("expected primitive")
    };
    let MeshInstance::SphereFlakeMesh(flake) = prim.mesh() else {
        panic!("expected flake, found {:?}", prim.mesh())
    };
    assert_eq!(flake.levels(), 3);
    assert_eq!(flake.flake_count(), 1 + 6 + 36);

    assert_eq!(parse_line(&format!("f c(0 0 0) r(1) i(0) {MATERIAL}")).err(), Some(ParseError::EmptySphereFlake));
}

#[test]
fn light_camera_ambient_records() {
    let Record::Light(light) = parse("l p(0 10 0) c(1 0.5 0)") else {
        panic!("expected light")
    };
    assert_eq!(light.pos, Point3::new(0., 10., 0.));
    assert_eq!(light.colour, Colour::rgb(1., 0.5, 0.));

    // FOV is given in degrees
    let Record::Camera(camera) = parse("c p(0 1 -5) t(0 0 0) fov(90)") else {
        panic!("expected camera")
    };
    assert_eq!(camera.pos, Point3::new(0., 1., -5.));
    assert_eq!(camera.target, Point3::ZERO);
    assert_relative_eq!(camera.v_fov, std::f64::consts::FRAC_PI_2);

    let Record::Ambient(ambient) = parse("a c(0.1 0.2 0.3)") else {
        panic!("expected ambient")
    };
    assert_eq!(ambient, Colour::rgb(0.1, 0.2, 0.3));
}

#[test]
fn fields_in_any_order_with_extra_whitespace() {
    let Record::Primitive(prim) = parse("  s   kr(0.25) s(20)   r( 0.5 )  c(1  2 3) ks(1 1 1) kd(0.5 0.5 0.5)  ") else {
        panic!("expected primitive")
    };
    assert!(matches!(prim.mesh(), MeshInstance::SphereMesh(s) if s.radius() == 0.5));
    assert_eq!(prim.material().kr(), 0.25);
}

#[test]
fn non_records() {
    for line in ["", "   ", "# a comment", "   # indented comment", "\t"] {
        assert!(parse_line(line).expect("should not be an error").is_none(), "line {line:?}");
    }
}

#[test]
fn record_errors() {
    assert_eq!(parse_line("x c(1 2 3)").err(), Some(ParseError::UnknownRecord("x".into())));
    assert_eq!(parse_line(&format!("s c(1 2 3) {MATERIAL}")).err(), Some(ParseError::MissingField("r")));
    assert_eq!(parse_line("s c(1 2 3) r(1)").err(), Some(ParseError::MissingField("kd")));
    assert_eq!(
        parse_line(&format!("s c(1 2) r(1) {MATERIAL}")).err(),
        Some(ParseError::WrongArity {
            field: "c",
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        parse_line("l p(0 zero 0) c(1 1 1)").err(),
        Some(ParseError::InvalidNumber {
            field: "p",
            value: "zero".into()
        })
    );
    assert!(matches!(parse_line("l p(0 0 0 c(1 1 1)"), Err(ParseError::MalformedField(_))));
}

#[test]
fn whole_scene() {
    let src = format!(
        "
        # A sphere above the ground
        s c(0 1 0) r(1) {MATERIAL}
        p n(0 1 0) d(0) {MATERIAL}
        f c(3 1 0) r(0.5) i(2) {MATERIAL}

        l p(0 10 0) c(1 1 1)
        l p(5 10 0) c(0.5 0.5 0.5)
        c p(0 2 -8) t(0 1 0) fov(60)
        a c(0.1 0.1 0.1)
        "
    );
    let scene = load_str(&src).expect("scene should load");

    assert_eq!(scene.primitives().len(), 3);
    assert_eq!(scene.lights().len(), 2);
    assert_eq!(scene.camera().pos, Point3::new(0., 2., -8.));
    assert_eq!(scene.ambient(), Colour::rgb(0.1, 0.1, 0.1));
    assert!(!scene.is_built());
}

#[test]
fn malformed_lines_are_skipped() {
    let src = format!(
        "s c(0 0 5) r(1) {MATERIAL}
        s c(0 0 5) r(oops) {MATERIAL}
        q nonsense
        l p(0 10 0) c(1 1 1)"
    );

    let mut loader = SceneLoader::new();
    loader.add_str(&src, "test").expect("bad lines are not fatal");
    assert_eq!(loader.skipped_lines(), 2);

    let scene = loader.finish().expect("scene should load");
    assert_eq!(scene.primitives().len(), 1);
    assert_eq!(scene.lights().len(), 1);
}

#[test]
fn missing_camera_uses_default() {
    let scene = load_str(&format!("s c(0 0 5) r(1) {MATERIAL}")).expect("scene should load");
    assert_eq!(scene.camera(), Camera::default());
    assert_eq!(scene.ambient(), Colour::BLACK);
}

#[test]
fn no_geometry() {
    assert!(matches!(load_str(""), Err(LoadError::NoGeometry)));
    assert!(matches!(
        load_str("l p(0 10 0) c(1 1 1)\nc p(0 0 0) t(0 0 1) fov(45)"),
        Err(LoadError::NoGeometry)
    ));
    // Only broken geometry
    assert!(matches!(load_str("s c(0 0 5)"), Err(LoadError::NoGeometry)));
}

#[test]
fn from_files() {
    let dir = tempfile::tempdir().expect("couldn't create temp dir");

    let geometry = dir.path().join("geometry.txt");
    std::fs::write(&geometry, format!("s c(0 0 5) r(1) {MATERIAL}\n")).expect("couldn't write scene file");

    let mut setup = tempfile::NamedTempFile::new_in(dir.path()).expect("couldn't create temp file");
    writeln!(setup, "c p(0 0 -3) t(0 0 0) fov(45)").expect("couldn't write scene file");
    writeln!(setup, "l p(0 5 0) c(1 1 1)").expect("couldn't write scene file");
    writeln!(setup, "s c(2 0 5) r(1) {MATERIAL}").expect("couldn't write scene file");

    let scene = load_file(&geometry).expect("scene should load");
    assert_eq!(scene.primitives().len(), 1);

    // Merged in order
    let scene = load_files([geometry.as_path(), setup.path()]).expect("scene should load");
    assert_eq!(scene.primitives().len(), 2);
    assert_eq!(scene.lights().len(), 1);
    assert_eq!(scene.camera().pos, Point3::new(0., 0., -3.));
    assert!(matches!(scene.primitives()[1].mesh(), MeshInstance::SphereMesh(s) if s.centre().x == 2.));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().expect("couldn't create temp dir");
    let path = dir.path().join("does_not_exist.txt");

    match load_file(&path) {
        Err(LoadError::Io { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, found {other:?}"),
    }
}
