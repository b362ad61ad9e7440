// Error types module

use std::fmt;

use crate::image::ImageError;
use crate::watermark::WatermarkError;

/// Centralized error type for the gateway
///
/// Every failure a request can hit is mapped to one of these variants, which
/// fixes the HTTP status the client sees.
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// Configuration errors (invalid YAML, missing env vars, unreadable assets)
    Config(String),

    /// Origin did not answer in time or could not be reached
    UpstreamTimeout { message: String },

    /// Origin answered with a non-200 status, passed through as is
    UpstreamStatus { status: u16, reason: String },

    /// Origin body is not a decodable image
    Decode { message: String },

    /// Resize primitive failed
    Resize { message: String },

    /// Encoding to the output format failed
    Encode { format: String, message: String },

    /// Resolved watermark asset is not loaded (non-fatal)
    AssetMissing { filename: String },

    /// Query parameter could not be used (non-fatal, feature skipped)
    MalformedQuery { param: String, message: String },

    /// Unexpected fault, e.g. a panic caught at the request boundary
    Internal(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GatewayError::UpstreamTimeout { message } => {
                write!(f, "Upstream timeout: {}", message)
            }
            GatewayError::UpstreamStatus { status, reason } => {
                write!(f, "Upstream returned {}: {}", status, reason)
            }
            GatewayError::Decode { message } => write!(f, "Decode error: {}", message),
            GatewayError::Resize { message } => write!(f, "Resize error: {}", message),
            GatewayError::Encode { format, message } => {
                write!(f, "Encode error ({}): {}", format, message)
            }
            GatewayError::AssetMissing { filename } => {
                write!(f, "Watermark asset missing: {}", filename)
            }
            GatewayError::MalformedQuery { param, message } => {
                write!(f, "Malformed query parameter '{}': {}", param, message)
            }
            GatewayError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl GatewayError {
    /// Maps gateway errors to HTTP status codes
    ///
    /// Status mapping:
    /// - UpstreamTimeout → 504
    /// - UpstreamStatus → the origin's status
    /// - Decode → 502
    /// - everything else → 500
    ///
    /// Recoverable errors (AssetMissing, MalformedQuery) are logged and the
    /// feature skipped; they never become a response on their own.
    pub fn to_http_status(&self) -> u16 {
        match self {
            GatewayError::UpstreamTimeout { .. } => 504,
            GatewayError::UpstreamStatus { status, .. } => *status,
            GatewayError::Decode { .. } => 502,
            GatewayError::Config(_)
            | GatewayError::MalformedQuery { .. }
            | GatewayError::Resize { .. }
            | GatewayError::Encode { .. }
            | GatewayError::AssetMissing { .. }
            | GatewayError::Internal(_) => 500,
        }
    }

    /// Non-fatal errors only disable the feature they concern.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GatewayError::AssetMissing { .. } | GatewayError::MalformedQuery { .. }
        )
    }

    /// Plain-text body sent to the client, e.g. `504 Gateway Timeout`.
    ///
    /// Upstream status errors carry the origin's own status line.
    pub fn response_body(&self) -> String {
        match self {
            GatewayError::UpstreamStatus { reason, .. } => reason.clone(),
            _ => status_line(self.to_http_status()),
        }
    }

    pub fn upstream_timeout(message: impl Into<String>) -> Self {
        GatewayError::UpstreamTimeout {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        GatewayError::Decode {
            message: message.into(),
        }
    }
}

/// `"<code> <canonical reason>"`, or just the code when the reason is unknown
pub fn status_line(status: u16) -> String {
    match http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}

impl From<ImageError> for GatewayError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::DecodeFailed { message } => GatewayError::Decode { message },
            ImageError::ResizeFailed { message } => GatewayError::Resize { message },
            ImageError::InvalidDimensions { .. } => GatewayError::Resize {
                message: err.to_string(),
            },
            ImageError::EncodeFailed { format, message } => GatewayError::Encode { format, message },
            ImageError::InvalidParameter { .. } => GatewayError::Config(err.to_string()),
        }
    }
}

impl From<WatermarkError> for GatewayError {
    fn from(err: WatermarkError) -> Self {
        match err {
            WatermarkError::MissingAsset { filename } => GatewayError::AssetMissing { filename },
            WatermarkError::Sample(msg) => GatewayError::Internal(msg),
            WatermarkError::Load { .. } | WatermarkError::Config(_) => {
                GatewayError::Config(err.to_string())
            }
        }
    }
}
