//! Loads scenes from a line-oriented text format.
//!
//! Each line holds one record: a single-letter tag, followed by fields written as `name(values...)`.
//! Fields may appear in any order. Blank lines, and lines starting with `#`, are skipped.
//!
//! ```text
//! s c(x y z) r(radius) kd(r g b) ks(r g b) s(shininess) kr(reflectivity)
//! p n(x y z) d(distance) kd(r g b) ks(r g b) s(shininess) kr(reflectivity)
//! f c(x y z) r(radius) i(levels) kd(r g b) ks(r g b) s(shininess) kr(reflectivity)
//! l p(x y z) c(r g b)
//! c p(x y z) t(x y z) fov(degrees)
//! a c(r g b)
//! ```
//!
//! Lines that fail to parse are logged and skipped, the rest of the file still loads.

use crate::core::targets::LOADER;
use crate::core::types::{Channel, Colour, Number, Point3};
use crate::material::Material;
use crate::mesh::infinite_plane::InfinitePlaneMesh;
use crate::mesh::sphere::SphereMesh;
use crate::mesh::sphere_flake::SphereFlakeMesh;
use crate::object::Primitive;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::{Scene, SceneError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// A single successfully parsed line
#[derive(Clone, Debug)]
pub enum Record {
    Primitive(Primitive),
    Light(Light),
    Camera(Camera),
    Ambient(Colour),
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown record type `{0}`")]
    UnknownRecord(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` should have {expected} values, found {found}")]
    WrongArity {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("field `{field}` has invalid number `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("malformed field syntax near `{0}`")]
    MalformedField(String),
    #[error("sphere flake must have at least one level")]
    EmptySphereFlake,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("couldn't read scene file `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("the scene contains no geometry")]
    NoGeometry,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

// region Line parsing

/// The `name(values...)` fields of a record, in the order they were written
#[derive(Debug)]
struct Fields<'a>(Vec<(&'a str, Vec<&'a str>)>);

impl<'a> Fields<'a> {
    fn parse(mut s: &'a str) -> Result<Self, ParseError> {
        let mut fields = Vec::new();
        loop {
            s = s.trim_start();
            if s.is_empty() {
                return Ok(Self(fields));
            }

            let (name, rest) = s.split_once('(').ok_or_else(|| ParseError::MalformedField(s.to_string()))?;
            let (values, rest) = rest.split_once(')').ok_or_else(|| ParseError::MalformedField(s.to_string()))?;
            let name = name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) || values.contains('(') {
                return Err(ParseError::MalformedField(s.to_string()));
            }

            fields.push((name, values.split_whitespace().collect()));
            s = rest;
        }
    }

    /// Values of the first field with the given name
    fn get(&self, name: &'static str) -> Result<&[&'a str], ParseError> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, values)| values.as_slice())
            .ok_or(ParseError::MissingField(name))
    }

    fn numbers<const N: usize>(&self, name: &'static str) -> Result<[Number; N], ParseError> {
        let values = self.get(name)?;
        if values.len() != N {
            return Err(ParseError::WrongArity {
                field: name,
                expected: N,
                found: values.len(),
            });
        }

        let mut out = [0.; N];
        for (o, v) in out.iter_mut().zip(values) {
            *o = v.parse().map_err(|_| ParseError::InvalidNumber {
                field: name,
                value: v.to_string(),
            })?;
        }
        Ok(out)
    }

    fn number(&self, name: &'static str) -> Result<Number, ParseError> { self.numbers::<1>(name).map(|[n]| n) }

    fn point(&self, name: &'static str) -> Result<Point3, ParseError> { self.numbers::<3>(name).map(Point3::from) }

    fn colour(&self, name: &'static str) -> Result<Colour, ParseError> {
        self.numbers::<3>(name).map(|c| Colour::new(c.map(|c| c as Channel)))
    }

    fn count(&self, name: &'static str) -> Result<usize, ParseError> {
        match self.get(name)? {
            [v] => v.parse().map_err(|_| ParseError::InvalidNumber {
                field: name,
                value: v.to_string(),
            }),
            values => Err(ParseError::WrongArity {
                field: name,
                expected: 1,
                found: values.len(),
            }),
        }
    }

    fn material(&self) -> Result<Material, ParseError> {
        Ok(Material::new(
            self.colour("kd")?,
            self.colour("ks")?,
            self.number("s")?,
            self.number("kr")?,
        ))
    }
}

/// Parses a single line of a scene file.
///
/// Returns `Ok(None)` for lines that hold no record (blank lines and comments)
pub fn parse_line(line: &str) -> Result<Option<Record>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (tag, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let fields = Fields::parse(rest)?;

    let record = match tag {
        "s" => {
            let mesh = SphereMesh::new(fields.point("c")?, fields.number("r")?);
            Record::Primitive(Primitive::new(mesh, fields.material()?))
        }
        "p" => {
            let mesh = InfinitePlaneMesh::new(fields.point("n")?, fields.number("d")?);
            Record::Primitive(Primitive::new(mesh, fields.material()?))
        }
        "f" => {
            let (centre, radius, levels) = (fields.point("c")?, fields.number("r")?, fields.count("i")?);
            let material = fields.material()?;
            let mesh = SphereFlakeMesh::new(centre, radius, levels).ok_or(ParseError::EmptySphereFlake)?;
            Record::Primitive(Primitive::new(mesh, material))
        }
        "l" => Record::Light(Light::new(fields.point("p")?, fields.colour("c")?)),
        "c" => Record::Camera(Camera::new(
            fields.point("p")?,
            fields.point("t")?,
            fields.number("fov")?.to_radians(),
        )),
        "a" => Record::Ambient(fields.colour("c")?),
        other => return Err(ParseError::UnknownRecord(other.to_string())),
    };
    Ok(Some(record))
}

// endregion Line parsing

// region Loading

/// Builds a single [Scene] out of one or more scene sources, applied in order.
///
/// Later cameras and ambient colours replace earlier ones; primitives and lights accumulate
#[derive(Debug, Default)]
pub struct SceneLoader {
    scene: Scene,
    has_camera: bool,
    skipped_lines: usize,
}

impl SceneLoader {
    pub fn new() -> Self { Self::default() }

    /// Number of lines so far that failed to parse
    pub fn skipped_lines(&self) -> usize { self.skipped_lines }

    /// Loads every record in `src`. `source` names the input in log messages
    pub fn add_str(&mut self, src: &str, source: &str) -> Result<(), LoadError> {
        for (idx, line) in src.lines().enumerate() {
            match parse_line(line) {
                Ok(Some(record)) => self.apply(record)?,
                Ok(None) => {}
                Err(err) => {
                    warn!(target: LOADER, source, line_num = idx + 1, line, %err, "malformed line, ignoring");
                    self.skipped_lines += 1;
                }
            }
        }
        Ok(())
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(target: LOADER, path = %path.display(), "loading scene file");
        self.add_str(&src, &path.display().to_string())
    }

    fn apply(&mut self, record: Record) -> Result<(), SceneError> {
        match record {
            Record::Primitive(p) => self.scene.add_primitive(p)?,
            Record::Light(l) => self.scene.add_light(l),
            Record::Camera(c) => {
                self.scene.set_camera(c);
                self.has_camera = true;
            }
            Record::Ambient(a) => self.scene.set_ambient(a),
        }
        Ok(())
    }

    /// Completes the scene.
    ///
    /// # Errors
    /// Fails with [LoadError::NoGeometry] if no primitives were loaded
    pub fn finish(self) -> Result<Scene, LoadError> {
        if self.scene.primitives().is_empty() {
            return Err(LoadError::NoGeometry);
        }
        if !self.has_camera {
            warn!(target: LOADER, camera = ?self.scene.camera(), "no camera in scene, using default");
        }

        debug!(
            target: LOADER,
            primitives = self.scene.primitives().len(),
            lights = self.scene.lights().len(),
            skipped_lines = self.skipped_lines,
            "scene loaded"
        );
        Ok(self.scene)
    }
}

/// Loads a scene from a string
pub fn load_str(src: &str) -> Result<Scene, LoadError> {
    let mut loader = SceneLoader::new();
    loader.add_str(src, "<str>")?;
    loader.finish()
}

/// Loads a scene from a file
pub fn load_file(path: impl AsRef<Path>) -> Result<Scene, LoadError> { load_files([path]) }

/// Loads several files, merged into one scene in order
pub fn load_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Scene, LoadError> {
    let mut loader = SceneLoader::new();
    for path in paths {
        loader.add_file(path)?;
    }
    loader.finish()
}

// endregion Loading
