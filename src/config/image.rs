//! Image processing configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BACKGROUND_RGB, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
};
use crate::image::{Color, ResizeFilter, Size};

fn default_background() -> Color {
    let (r, g, b) = DEFAULT_BACKGROUND_RGB;
    Color::new(r, g, b)
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Padding color for contain mode, `"r,g,b"`
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default)]
    pub contain_filter: ResizeFilter,
    /// Largest target width a request may ask for
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Largest target height a request may ask for
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}

impl ImageConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "image.jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(format!(
                "image.max_width and image.max_height must be positive, got {}x{}",
                self.max_width, self.max_height
            ));
        }
        Ok(())
    }

    /// Upper bound on resize targets.
    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            jpeg_quality: default_jpeg_quality(),
            contain_filter: ResizeFilter::default(),
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}
