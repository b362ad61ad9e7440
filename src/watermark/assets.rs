//! Decoded watermark assets, loaded once at startup and read-only afterwards.

use image::RgbaImage;
use std::collections::HashMap;

use super::contrast::Tone;
use super::error::WatermarkError;
use crate::config::WatermarkConfig;
use crate::image::Size;

/// Size variant of a watermark asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Big,
    Small,
}

/// Watermark images keyed by configured filename, plus the reference sizes
/// taken from the black big/small assets.
#[derive(Debug)]
pub struct WatermarkAssets {
    config: WatermarkConfig,
    images: HashMap<String, RgbaImage>,
    big: Size,
    small: Size,
}

impl WatermarkAssets {
    /// Read and decode all four configured files from `config.path`.
    ///
    /// Any failure is returned; the service must not start without its assets.
    pub fn load(config: WatermarkConfig) -> Result<Self, WatermarkError> {
        let mut images = HashMap::new();

        for filename in config.filenames() {
            if images.contains_key(filename) {
                continue;
            }

            let path = config.path.join(filename);
            let image = image::open(&path)
                .map_err(|e| WatermarkError::Load {
                    path: path.clone(),
                    message: e.to_string(),
                })?
                .into_rgba8();

            tracing::debug!(
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                "Loaded watermark asset"
            );
            images.insert(filename.to_string(), image);
        }

        Self::from_images(config, images)
    }

    /// Build a store from already decoded images.
    ///
    /// Only the black big/small entries are required, they define the
    /// reference sizes.
    pub fn from_images(
        config: WatermarkConfig,
        images: HashMap<String, RgbaImage>,
    ) -> Result<Self, WatermarkError> {
        let dimensions = |filename: &str| {
            images
                .get(filename)
                .map(|image| Size::new(image.width(), image.height()))
                .ok_or_else(|| {
                    WatermarkError::Config(format!("reference asset '{}' is not loaded", filename))
                })
        };

        let big = dimensions(&config.file_black_big)?;
        let small = dimensions(&config.file_black_small)?;

        Ok(Self {
            config,
            images,
            big,
            small,
        })
    }

    pub fn get(&self, filename: &str) -> Option<&RgbaImage> {
        self.images.get(filename)
    }

    /// Configured filename for a tone and size variant.
    pub fn filename(&self, tone: Tone, variant: Variant) -> &str {
        match (tone, variant) {
            (Tone::Black, Variant::Big) => &self.config.file_black_big,
            (Tone::Black, Variant::Small) => &self.config.file_black_small,
            (Tone::White, Variant::Big) => &self.config.file_white_big,
            (Tone::White, Variant::Small) => &self.config.file_white_small,
        }
    }

    pub fn size(&self, variant: Variant) -> Size {
        match variant {
            Variant::Big => self.big,
            Variant::Small => self.small,
        }
    }

    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
