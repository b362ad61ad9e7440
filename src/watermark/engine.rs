//! Watermark engine: size variant, corner, tone, then composite.

use image::DynamicImage;
use rand::Rng;

use super::assets::{Variant, WatermarkAssets};
use super::compositor::overlay;
use super::contrast::{pick_tone, sample_color, Tone};
use super::error::WatermarkError;
use super::position::{placement, Corner};
use crate::image::{Rect, Size};

/// What happened to a watermark request.
#[derive(Debug)]
pub enum WatermarkOutcome {
    Applied {
        filename: String,
        rect: Rect,
        tone: Tone,
    },
    /// The image passed through unmodified.
    Skipped(WatermarkError),
}

impl WatermarkOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, WatermarkOutcome::Applied { .. })
    }
}

/// Applies corner watermarks from a loaded asset store.
#[derive(Debug)]
pub struct Watermarker {
    assets: WatermarkAssets,
}

impl Watermarker {
    pub fn new(assets: WatermarkAssets) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &WatermarkAssets {
        &self.assets
    }

    /// Small variant when the image is under the threshold on either axis.
    pub fn variant_for(&self, image: Size) -> Variant {
        if image.is_smaller_than(&self.assets.config().size_threshold) {
            Variant::Small
        } else {
            Variant::Big
        }
    }

    /// Watermark `image` in a corner drawn from `rng`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        image: DynamicImage,
        rng: &mut R,
    ) -> (DynamicImage, WatermarkOutcome) {
        let corner = Corner::random(rng);
        self.apply_at(image, corner)
    }

    /// Watermark `image` in the given corner.
    pub fn apply_at(&self, image: DynamicImage, corner: Corner) -> (DynamicImage, WatermarkOutcome) {
        let mut canvas = image.into_rgba8();
        let image_size = Size::new(canvas.width(), canvas.height());

        let variant = self.variant_for(image_size);
        let config = self.assets.config();
        let rect = placement(
            corner,
            image_size,
            self.assets.size(variant),
            config.margin,
        );

        let tone = match sample_color(&canvas, rect) {
            Ok(sample) => pick_tone(sample, config.color_threshold),
            Err(e) => {
                tracing::warn!(error = %e, size = %image_size, "Watermark skipped");
                return (DynamicImage::ImageRgba8(canvas), WatermarkOutcome::Skipped(e));
            }
        };

        let filename = self.assets.filename(tone, variant);
        let outcome = match self.assets.get(filename) {
            Some(mark) => {
                overlay(&mut canvas, mark, rect.x, rect.y);
                WatermarkOutcome::Applied {
                    filename: filename.to_string(),
                    rect,
                    tone,
                }
            }
            None => {
                tracing::warn!(filename = %filename, "File not found in watermarks set");
                WatermarkOutcome::Skipped(WatermarkError::MissingAsset {
                    filename: filename.to_string(),
                })
            }
        };

        (DynamicImage::ImageRgba8(canvas), outcome)
    }
}
