//! Transformation parameters parsed from the request path and query string.
//!
//! ```text
//! /photos/cat.png?size=200x100&bestfit=1&watermark=1
//! ```
//!
//! A malformed `size` disables resizing for the request; it never fails it.

use std::collections::HashMap;

use crate::error::GatewayError;
use crate::image::{OutputFormat, Size};

/// Parsed per-request transformation, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub bestfit: bool,
    pub apply_watermark: bool,
    pub source_path: String,
    pub format: OutputFormat,
}

impl TransformRequest {
    pub fn parse(path: &str, query: &HashMap<String, String>) -> Self {
        let (target_width, target_height) = match query.get("size") {
            Some(size) => parse_size(size),
            None => (None, None),
        };

        Self {
            target_width,
            target_height,
            bestfit: query.get("bestfit").is_some_and(|v| v == "1"),
            apply_watermark: query.get("watermark").is_some_and(|v| v == "1"),
            source_path: path.to_string(),
            format: OutputFormat::from_path(path),
        }
    }

    /// True only when both target dimensions were given.
    pub fn wants_resize(&self) -> bool {
        self.target_width.is_some() && self.target_height.is_some()
    }

    /// Final canvas size, if the request asked for one.
    pub fn resize_target(&self) -> Option<Size> {
        match (self.target_width, self.target_height) {
            (Some(width), Some(height)) => Some(Size::new(width, height)),
            _ => None,
        }
    }
}

/// `"WxH"` into positive dimensions. Anything short of two positive
/// integers around a single `x` drops both sides.
fn parse_size(value: &str) -> (Option<u32>, Option<u32>) {
    let side = |s: &str| s.trim().parse::<u32>().ok().filter(|v| *v > 0);

    let parsed = value
        .split_once('x')
        .filter(|(_, rest)| !rest.contains('x'))
        .and_then(|(w, h)| Some((side(w)?, side(h)?)));

    match parsed {
        Some((width, height)) => (Some(width), Some(height)),
        None => {
            let error = GatewayError::MalformedQuery {
                param: "size".to_string(),
                message: "expected WxH with two positive integers".to_string(),
            };
            tracing::warn!(error = %error, size = %value, "Wrong size passed");
            (None, None)
        }
    }
}
