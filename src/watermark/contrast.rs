//! Contrast sampling: choose a black or white mark for the region it covers.

use fast_image_resize::{FilterType, ResizeAlg};
use image::{imageops, RgbaImage};

use super::error::WatermarkError;
use crate::image::resize::resize_rgba;
use crate::image::{Color, Rect};

/// Tone of a watermark asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Black,
    White,
}

/// Average color of `region` in `image`, obtained by downscaling the
/// cropped region to a single pixel.
///
/// The region is clipped to the image bounds.
pub fn sample_color(image: &RgbaImage, region: Rect) -> Result<Color, WatermarkError> {
    let x = region.x.min(image.width());
    let y = region.y.min(image.height());
    let width = region.width.min(image.width() - x);
    let height = region.height.min(image.height() - y);

    if width == 0 || height == 0 {
        return Err(WatermarkError::Sample(format!(
            "region {}x{} at ({}, {}) is outside a {}x{} image",
            region.width,
            region.height,
            region.x,
            region.y,
            image.width(),
            image.height()
        )));
    }

    let crop = imageops::crop_imm(image, x, y, width, height).to_image();
    let pixel = resize_rgba(&crop, 1, 1, ResizeAlg::Convolution(FilterType::Box))
        .map_err(|e| WatermarkError::Sample(e.to_string()))?;

    Ok(Color::from_rgba(*pixel.get_pixel(0, 0)))
}

/// Black iff every channel of `sample` strictly exceeds `threshold`.
pub fn pick_tone(sample: Color, threshold: Color) -> Tone {
    if sample.exceeds(&threshold) {
        Tone::Black
    } else {
        Tone::White
    }
}
