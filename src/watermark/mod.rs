//! Watermark module for stamping corner marks onto transformed images.
//!
//! Four pre-rendered assets (black/white, big/small) are loaded once at
//! startup. For each request the engine:
//!
//! 1. picks the small variant if the image is below the size threshold on
//!    either axis, the big one otherwise
//! 2. picks one of the four corners at random
//! 3. averages the covered region and uses the black mark when it is
//!    brighter than the color threshold on every channel, the white one
//!    otherwise
//! 4. composites the resolved asset at full opacity
//!
//! # Configuration Example
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

pub mod assets;
pub mod compositor;
pub mod contrast;
pub mod engine;
pub mod error;
pub mod position;

pub use assets::{Variant, WatermarkAssets};
pub use contrast::{pick_tone, sample_color, Tone};
pub use engine::{WatermarkOutcome, Watermarker};
pub use error::WatermarkError;
pub use position::{placement, Corner};
