//! Image codec and geometry layer
//!
//! Provides the primitives the request pipeline calls into:
//! - Decoding origin bytes with content-based format detection
//! - Bestfit (center crop) and contain (pad with background) resizing
//! - Encoding to JPEG, PNG, GIF or lossless WebP by requested extension
//!
//! # Resize modes
//!
//! ```text
//! ?size=100x50&bestfit=1   400x400 source -> 100x50, cropped, no padding
//! ?size=100x50             400x400 source -> 50x50 content on a 100x50 canvas
//! ```

pub mod color;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod geometry;
pub mod resize;

pub use color::Color;
pub use decoder::decode_image;
pub use encoder::{EncodedImage, EncoderFactory, ImageEncoder};
pub use error::ImageError;
pub use format::OutputFormat;
pub use geometry::{Rect, Size};
pub use resize::{bestfit_crop, contain_geometry, ContainPlan, ResizeEngine, ResizeFilter};
