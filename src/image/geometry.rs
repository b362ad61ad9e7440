//! Plain geometry types shared by the resize and watermark engines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ImageError;

/// Width and height in pixels. Written in configuration as `"WxH"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either axis is smaller than the matching axis of `other`.
    pub fn is_smaller_than(&self, other: &Size) -> bool {
        self.width < other.width || self.height < other.height
    }

    /// Width divided by height.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s.split_once('x').ok_or_else(|| {
            ImageError::invalid_param("size", format!("expected 'WxH', got '{}'", s))
        })?;

        let parse = |value: &str| {
            value.trim().parse::<u32>().map_err(|e| {
                ImageError::invalid_param("size", format!("invalid value '{}': {}", value, e))
            })
        };

        Ok(Size::new(parse(width)?, parse(height)?))
    }
}

impl TryFrom<String> for Size {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.to_string()
    }
}

/// Axis-aligned rectangle, used for crop boxes and watermark placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True if the rectangle lies entirely within `[0, bounds.width) x [0, bounds.height)`.
    pub fn fits_within(&self, bounds: Size) -> bool {
        self.right() <= bounds.width && self.bottom() <= bounds.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
