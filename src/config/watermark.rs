//! Watermark configuration.
//!
//! ```yaml
//! watermark:
//!   path: /etc/imgate/watermarks
//!   file_white_big: white_big.png
//!   file_white_small: white_small.png
//!   file_black_big: black_big.png
//!   file_black_small: black_small.png
//!   margin: 10
//!   size_threshold: 400x300
//!   color_threshold: "200,200,200"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::image::{Color, Size};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// Directory holding the four asset files
    pub path: PathBuf,
    pub file_white_big: String,
    pub file_white_small: String,
    pub file_black_big: String,
    pub file_black_small: String,
    /// Distance in pixels from the image edges
    #[serde(default)]
    pub margin: u32,
    /// Images smaller than this on either axis get the small variant
    pub size_threshold: Size,
    /// Sampled regions brighter than this on every channel get the black variant
    pub color_threshold: Color,
}

impl WatermarkConfig {
    /// All configured asset filenames
    pub fn filenames(&self) -> [&str; 4] {
        [
            &self.file_white_big,
            &self.file_white_small,
            &self.file_black_big,
            &self.file_black_small,
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        let names = [
            ("file_white_big", &self.file_white_big),
            ("file_white_small", &self.file_white_small),
            ("file_black_big", &self.file_black_big),
            ("file_black_small", &self.file_black_small),
        ];
        for (key, value) in names {
            if value.is_empty() {
                return Err(format!("watermark.{} cannot be empty", key));
            }
        }
        Ok(())
    }
}
