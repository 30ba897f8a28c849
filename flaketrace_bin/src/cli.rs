use clap::{Parser, ValueEnum};
use flaketrace_engine::accel::bvh::BvhMode;
use flaketrace_engine::core::consts::MAX_DEPTH;
use flaketrace_engine::render::render_opts::RenderOpts;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Log levels that can be chosen from the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Image dimensions, written as `WIDTHxHEIGHT`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: NonZeroUsize,
    pub height: NonZeroUsize,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("size should be written as `WIDTHxHEIGHT`")]
    MissingSeparator,
    #[error("`{0}` is not a valid non-zero dimension")]
    InvalidDimension(String),
}

impl FromStr for Size {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or(SizeParseError::MissingSeparator)?;
        let dim = |d: &str| {
            d.trim()
                .parse::<NonZeroUsize>()
                .map_err(|_| SizeParseError::InvalidDimension(d.to_string()))
        };
        Ok(Self {
            width: dim(w)?,
            height: dim(h)?,
        })
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}x{}", self.width, self.height) }
}

/// Renders sphere-flake scenes with a Whitted ray tracer
#[derive(Parser, Debug)]
#[command(name = "flaketrace", version)]
pub struct Args {
    /// Scene files to load. Several files are merged into one scene, in order
    #[arg(required = true)]
    pub scenes: Vec<PathBuf>,

    /// Image size, as `WIDTHxHEIGHT`
    #[arg(short, long, default_value = "512x512")]
    pub size: Size,

    /// Maximum number of shading steps per primary ray
    #[arg(short, long, default_value_t = MAX_DEPTH)]
    pub depth: usize,

    /// How the scene's acceleration tree is built
    #[arg(long, default_value_t = BvhMode::Flat)]
    pub bvh: BvhMode,

    /// Output image. The format comes from the extension: `.ppm` or `.png`
    #[arg(short, long, default_value = "out.ppm")]
    pub output: PathBuf,

    /// Log level. `RUST_LOG` takes precedence when set
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            width: self.size.width,
            height: self.size.height,
            ray_depth: self.depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_valid() { Args::command().debug_assert(); }

    #[test]
    fn parse_size() {
        let size = Size::from_str("640x480").unwrap();
        assert_eq!((size.width.get(), size.height.get()), (640, 480));
        assert_eq!(size.to_string(), "640x480");
        assert!(Size::from_str("16X9").is_ok());

        assert_eq!(Size::from_str("640"), Err(SizeParseError::MissingSeparator));
        assert_eq!(Size::from_str("0x480"), Err(SizeParseError::InvalidDimension("0".into())));
        assert_eq!(Size::from_str("640x-1"), Err(SizeParseError::InvalidDimension("-1".into())));
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["flaketrace", "scene.txt"]).unwrap();
        assert_eq!(args.scenes, vec![PathBuf::from("scene.txt")]);
        assert_eq!(args.render_opts(), RenderOpts::default());
        assert_eq!(args.bvh, BvhMode::Flat);
        assert_eq!(args.output, PathBuf::from("out.ppm"));
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "flaketrace",
            "a.txt",
            "b.txt",
            "--size",
            "320x200",
            "--depth",
            "2",
            "--bvh",
            "sah",
            "-o",
            "img.png",
            "--log-level",
            "trace",
        ])
        .unwrap();

        assert_eq!(args.scenes.len(), 2);
        let opts = args.render_opts();
        assert_eq!(opts.dims(), [320, 200]);
        assert_eq!(opts.ray_depth, 2);
        assert_eq!(args.bvh, BvhMode::Sah);
        assert_eq!(args.output, PathBuf::from("img.png"));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::TRACE);
    }

    #[test]
    fn scene_required() { assert!(Args::try_parse_from(["flaketrace"]).is_err()); }
}
