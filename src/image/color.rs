//! RGB color values used for canvas fill and contrast thresholds.
//!
//! Colors are written in configuration as `"r,g,b"` with decimal 8-bit
//! channels, e.g. `"255,255,255"`.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use super::error::ImageError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque RGBA pixel of this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Color of an RGBA pixel, alpha dropped.
    pub fn from_rgba(pixel: Rgba<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// True iff every channel is strictly greater than the matching channel
    /// of `threshold`.
    pub fn exceeds(&self, threshold: &Color) -> bool {
        self.r > threshold.r && self.g > threshold.g && self.b > threshold.b
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels: Vec<&str> = s.split(',').map(str::trim).collect();
        if channels.len() != 3 {
            return Err(ImageError::invalid_param(
                "color",
                format!("expected 'r,g,b', got '{}'", s),
            ));
        }

        let parse = |value: &str| {
            value.parse::<u8>().map_err(|e| {
                ImageError::invalid_param("color", format!("invalid channel '{}': {}", value, e))
            })
        };

        Ok(Color::new(
            parse(channels[0])?,
            parse(channels[1])?,
            parse(channels[2])?,
        ))
    }
}

impl TryFrom<String> for Color {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
