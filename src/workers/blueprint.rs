//! Blueprint styling for uploaded floorplans.
//!
//! The pipeline is fixed: luminance, contrast stretch, downscale into an
//! 800×800 box, two-tone gradient, solid frame, PNG.

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageError, ImageFormat, ImageReader, Luma, Rgb, RgbImage};
use thiserror::Error;
use tracing::{error, info};

use crate::modules::job::model::ErrorKind;

pub const MAX_SIDE: u32 = 800;
pub const BORDER: u32 = 20;

/// Gradient end for pixel value 0.
pub const INK: Rgb<u8> = Rgb([0x05, 0x08, 0x11]);
/// Gradient end for pixel value 255.
pub const LINE: Rgb<u8> = Rgb([0x7d, 0xd3, 0xfc]);
pub const FRAME: Rgb<u8> = Rgb([0x02, 0x06, 0x17]);

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{0}")]
    Decode(#[source] ImageError),
    #[error("{0}")]
    Encode(#[source] ImageError),
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::Decode(_) => ErrorKind::DecodeError,
            TransformError::Encode(_) => ErrorKind::EncodeError,
            TransformError::Io(_) => ErrorKind::IoError,
        }
    }
}

/// Renders `source` into a blueprint PNG at `target` on the blocking pool.
/// Returns the dimensions of the written image.
pub async fn render_preview(source: PathBuf, target: PathBuf) -> Result<(u32, u32), TransformError> {
    tokio::task::spawn_blocking(move || render_preview_blocking(&source, &target))
        .await
        .map_err(|e| TransformError::Io(io::Error::other(e)))?
}

pub fn render_preview_blocking(source: &Path, target: &Path) -> Result<(u32, u32), TransformError> {
    let decoded = ImageReader::open(source)?
        .with_guessed_format()?
        .decode()
        .map_err(TransformError::Decode)?;

    info!(
        "Decoded {} ({}x{})",
        source.display(),
        decoded.width(),
        decoded.height()
    );

    let styled = stylize(&decoded);
    let dimensions = styled.dimensions();

    let mut encoded = Cursor::new(Vec::new());
    styled
        .write_to(&mut encoded, ImageFormat::Png)
        .map_err(TransformError::Encode)?;

    if let Err(e) = std::fs::write(target, encoded.into_inner()) {
        error!("Failed to write preview {}: {}", target.display(), e);
        match std::fs::remove_file(target) {
            Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                error!("Failed to remove partial preview {}: {}", target.display(), cleanup);
            }
            _ => {}
        }
        return Err(e.into());
    }

    Ok(dimensions)
}

pub fn stylize(source: &DynamicImage) -> RgbImage {
    let gray = autocontrast(luminance(source));

    let (width, height) = fit_within(gray.width(), gray.height(), MAX_SIDE);
    let gray = if (width, height) == gray.dimensions() {
        gray
    } else {
        imageops::resize(&gray, width, height, FilterType::CatmullRom)
    };

    with_border(&colorize(&gray, INK, LINE), BORDER, FRAME)
}

/// Single channel luma with the ITU-R 601-2 weights (299/587/114), in 16.16
/// fixed point with rounding. Alpha is dropped.
pub fn luminance(source: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = source {
        return gray.clone();
    }

    let rgb = source.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma_601(r, g, b)])
    })
}

fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Stretches the observed range of values onto 0..=255. Flat images are
/// returned untouched.
pub fn autocontrast(mut gray: GrayImage) -> GrayImage {
    let mut histogram = [0usize; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let (Some(lo), Some(hi)) = (
        histogram.iter().position(|&n| n > 0),
        histogram.iter().rposition(|&n| n > 0),
    ) else {
        return gray;
    };
    if hi <= lo {
        return gray;
    }

    let span = hi - lo;
    let lut: [u8; 256] = std::array::from_fn(|v| (v.saturating_sub(lo) * 255 / span).min(255) as u8);

    for pixel in gray.pixels_mut() {
        pixel.0[0] = lut[pixel.0[0] as usize];
    }
    gray
}

/// Size that fits `width`×`height` inside a `max_side` square with the aspect
/// ratio kept. Never upscales.
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_side && height <= max_side) {
        return (width, height);
    }

    let bound = max_side as f64;
    let aspect = width as f64 / height as f64;

    if aspect <= 1.0 {
        let w = round_aspect(bound * aspect, |n| (aspect - n / bound).abs());
        (w, max_side)
    } else {
        let h = round_aspect(bound / aspect, |n| {
            if n == 0.0 { 0.0 } else { (aspect - bound / n).abs() }
        });
        (max_side, h)
    }
}

// Picks floor or ceil, whichever distorts the aspect less; floor on ties.
fn round_aspect(value: f64, distortion: impl Fn(f64) -> f64) -> u32 {
    let (down, up) = (value.floor(), value.ceil());
    let best = if distortion(down) <= distortion(up) { down } else { up };
    (best as u32).max(1)
}

pub fn colorize(gray: &GrayImage, dark: Rgb<u8>, light: Rgb<u8>) -> RgbImage {
    let lut: [Rgb<u8>; 256] = std::array::from_fn(|v| gradient(dark, light, v as u8));
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        lut[gray.get_pixel(x, y).0[0] as usize]
    })
}

fn gradient(dark: Rgb<u8>, light: Rgb<u8>, value: u8) -> Rgb<u8> {
    Rgb(std::array::from_fn(|c| {
        let (d, l) = (dark.0[c] as i32, light.0[c] as i32);
        (d + (value as i32 * (l - d)).div_euclid(255)) as u8
    }))
}

pub fn with_border(inner: &RgbImage, border: u32, fill: Rgb<u8>) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(
        inner.width() + 2 * border,
        inner.height() + 2 * border,
        fill,
    );
    imageops::replace(&mut canvas, inner, border as i64, border as i64);
    canvas
}
