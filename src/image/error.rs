//! Image pipeline error types
//!
//! Structured errors for the codec and geometry layer, with an HTTP status
//! mapping consistent with the gateway error taxonomy.

use std::fmt;

/// Errors that can occur while decoding, transforming or encoding an image
#[derive(Debug, Clone)]
pub enum ImageError {
    // === Decoding Errors ===
    /// Failed to decode image data received from the origin
    DecodeFailed { message: String },

    // === Processing Errors ===
    /// Resize, crop or sampling primitive failed
    ResizeFailed { message: String },
    /// Encoding to output format failed
    EncodeFailed { format: String, message: String },

    // === Parameter Errors ===
    /// Configuration value could not be parsed (`"r,g,b"`, `"WxH"`)
    InvalidParameter { param: String, message: String },
    /// Requested dimensions are invalid
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::DecodeFailed { message } => {
                write!(f, "Failed to decode image: {}", message)
            }
            ImageError::ResizeFailed { message } => {
                write!(f, "Resize failed: {}", message)
            }
            ImageError::EncodeFailed { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            ImageError::InvalidParameter { param, message } => {
                write!(f, "Invalid parameter '{}': {}", param, message)
            }
            ImageError::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    /// Maps image errors to HTTP status codes
    ///
    /// Status mapping:
    /// - DecodeFailed → 502 (the origin sent something that is not an image)
    /// - everything else → 500
    ///
    /// InvalidParameter only comes out of config parsing and never reaches a client.
    pub fn to_http_status(&self) -> u16 {
        match self {
            ImageError::DecodeFailed { .. } => 502,
            ImageError::ResizeFailed { .. }
            | ImageError::EncodeFailed { .. }
            | ImageError::InvalidDimensions { .. }
            | ImageError::InvalidParameter { .. } => 500,
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        ImageError::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        ImageError::ResizeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        ImageError::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
