//! Resize engine: bestfit (center crop, then scale) and contain (scale, then pad).

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::{imageops, DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use super::color::Color;
use super::error::ImageError;
use super::geometry::{Rect, Size};

/// Sampling algorithm used to scale content in contain mode.
///
/// Bestfit always uses Lanczos3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    #[default]
    Nearest,
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_alg(self) -> ResizeAlg {
        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Scaled content size and its offset on a contain canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainPlan {
    pub scaled: Size,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Compute the aspect-preserving size of `src` inside `target` and the
/// centering offsets.
pub fn contain_geometry(src: Size, target: Size) -> ContainPlan {
    let old_ratio = src.ratio();
    let new_ratio = target.ratio();

    let (width, height) = if old_ratio > new_ratio {
        (target.width, (target.width as f64 / old_ratio) as u32)
    } else {
        ((target.height as f64 * old_ratio) as u32, target.height)
    };

    let scaled = Size::new(
        width.clamp(1, target.width.max(1)),
        height.clamp(1, target.height.max(1)),
    );

    ContainPlan {
        scaled,
        offset_x: target.width.saturating_sub(scaled.width) / 2,
        offset_y: target.height.saturating_sub(scaled.height) / 2,
    }
}

/// Largest centered region of `src` with the aspect ratio of `target`.
pub fn bestfit_crop(src: Size, target: Size) -> Rect {
    let scale = f64::max(
        target.width as f64 / src.width as f64,
        target.height as f64 / src.height as f64,
    );

    let crop_w = ((target.width as f64 / scale).round() as u32).clamp(1, src.width.max(1));
    let crop_h = ((target.height as f64 / scale).round() as u32).clamp(1, src.height.max(1));

    Rect::new(
        (src.width - crop_w) / 2,
        (src.height - crop_h) / 2,
        crop_w,
        crop_h,
    )
}

/// Scale an RGBA buffer to exactly `width x height`.
pub(crate) fn resize_rgba(
    src: &RgbaImage,
    width: u32,
    height: u32,
    alg: ResizeAlg,
) -> Result<RgbaImage, ImageError> {
    let (src_w, src_h) = src.dimensions();

    let src_width =
        NonZeroU32::new(src_w).ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height =
        NonZeroU32::new(src_h).ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(width).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(height).ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let src_image = Image::from_vec_u8(src_width, src_height, src.as_raw().clone(), PixelType::U8x4)
        .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    Resizer::new(alg)
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))
}

/// Applies the two resize modes with a fixed background and contain filter.
#[derive(Debug, Clone, Copy)]
pub struct ResizeEngine {
    pub background: Color,
    pub contain_filter: ResizeFilter,
    /// Targets above this on either axis are refused before any buffer is allocated
    pub max_size: Size,
}

impl ResizeEngine {
    pub fn new(background: Color, contain_filter: ResizeFilter, max_size: Size) -> Self {
        Self {
            background,
            contain_filter,
            max_size,
        }
    }

    /// Resize `image` to the `target` box. Output is always exactly `target`.
    pub fn resize(
        &self,
        image: DynamicImage,
        target: Size,
        bestfit: bool,
    ) -> Result<DynamicImage, ImageError> {
        if target.width == 0 || target.height == 0 {
            return Err(ImageError::invalid_dimensions(
                target.width,
                target.height,
                "target dimensions must be positive",
            ));
        }
        if target.width > self.max_size.width || target.height > self.max_size.height {
            return Err(ImageError::invalid_dimensions(
                target.width,
                target.height,
                format!(
                    "target exceeds maximum {}x{}",
                    self.max_size.width, self.max_size.height
                ),
            ));
        }

        let source = image.into_rgba8();
        if source.width() == 0 || source.height() == 0 {
            return Err(ImageError::resize_failed("Source image is empty"));
        }

        let resized = if bestfit {
            self.bestfit(&source, target)?
        } else {
            self.contain(&source, target)?
        };

        Ok(DynamicImage::ImageRgba8(resized))
    }

    fn bestfit(&self, source: &RgbaImage, target: Size) -> Result<RgbaImage, ImageError> {
        let (width, height) = source.dimensions();
        let crop = bestfit_crop(Size::new(width, height), target);

        let cropped = imageops::crop_imm(source, crop.x, crop.y, crop.width, crop.height).to_image();

        resize_rgba(
            &cropped,
            target.width,
            target.height,
            ResizeAlg::Convolution(FilterType::Lanczos3),
        )
    }

    fn contain(&self, source: &RgbaImage, target: Size) -> Result<RgbaImage, ImageError> {
        let (width, height) = source.dimensions();
        let plan = contain_geometry(Size::new(width, height), target);
        let scaled = resize_rgba(
            source,
            plan.scaled.width,
            plan.scaled.height,
            self.contain_filter.to_alg(),
        )?;

        let mut canvas = RgbaImage::from_pixel(target.width, target.height, self.background.to_rgba());
        imageops::replace(
            &mut canvas,
            &scaled,
            plan.offset_x as i64,
            plan.offset_y as i64,
        );

        Ok(canvas)
    }
}
