//! Watermark error types.
//!
//! Defines errors that can occur while loading assets or applying a watermark.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during watermark processing.
#[derive(Debug, Clone)]
pub enum WatermarkError {
    /// Failed to read or decode an asset file at startup
    Load { path: PathBuf, message: String },

    /// Resolved asset filename is not in the store
    MissingAsset { filename: String },

    /// Contrast sampling of the target region failed
    Sample(String),

    /// Invalid configuration
    Config(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path, message } => write!(
                f,
                "Failed to load watermark '{}': {}",
                path.display(),
                message
            ),
            Self::MissingAsset { filename } => {
                write!(f, "File not found in watermarks set: {}", filename)
            }
            Self::Sample(msg) => write!(f, "Failed to sample watermark region: {}", msg),
            Self::Config(msg) => write!(f, "Watermark configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
