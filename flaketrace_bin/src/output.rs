//! Writes rendered images to disk.
//!
//! Colours are clamped to `0..=1` and quantised to 8 bits per channel. The format is chosen from the
//! file extension: `.ppm` gives a binary (P6) PPM, `.png` is encoded with the [image] crate.

use crate::targets::OUTPUT;
use flaketrace_engine::core::types::{Channel, Colour, Image};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Format {
    Ppm,
    Png,
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("unsupported output format for `{0}` (expected `.ppm` or `.png`)")]
    UnsupportedFormat(PathBuf),
    #[error("image of {width}x{height} is too large to encode")]
    TooLarge { width: usize, height: usize },
    #[error("couldn't write image to `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't encode image")]
    Encode(#[from] image::ImageError),
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| OutputError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Clamps a channel into `0..=1`, then scales it to `0..=255`, truncating
pub fn quantise_channel(c: Channel) -> u8 { (num_traits::clamp(c, 0., 1.) * 255.) as u8 }

pub fn quantise(colour: Colour) -> [u8; 3] { colour.0.map(quantise_channel) }

/// The image as tightly packed, row-major RGB bytes
pub fn to_rgb_bytes(img: &Image) -> Vec<u8> { img.iter().copied().flat_map(quantise).collect() }

/// Writes the image, in the format matching the path's extension
pub fn save(img: &Image, path: &Path) -> Result<Format, OutputError> {
    let format = Format::from_path(path)?;
    debug!(target: OUTPUT, path = %path.display(), %format, width = img.width(), height = img.height(), "saving image");

    match format {
        Format::Ppm => write_ppm(img, path)?,
        Format::Png => write_png(img, path)?,
    }
    Ok(format)
}

fn write_ppm(img: &Image, path: &Path) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_ppm_to(img, &mut writer).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Binary PPM: a `P6` header, then raw RGB bytes
pub fn write_ppm_to(img: &Image, writer: &mut impl Write) -> std::io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", img.width(), img.height())?;
    writer.write_all(&to_rgb_bytes(img))
}

fn write_png(img: &Image, path: &Path) -> Result<(), OutputError> {
    let too_large = || OutputError::TooLarge {
        width: img.width(),
        height: img.height(),
    };
    let width = u32::try_from(img.width()).map_err(|_| too_large())?;
    let height = u32::try_from(img.height()).map_err(|_| too_large())?;

    let buf = image::RgbImage::from_raw(width, height, to_rgb_bytes(img)).ok_or_else(too_large)?;
    buf.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
