//! Image decoding from raw origin bytes.

use image::io::Reader as ImageReader;
use image::DynamicImage;
use std::io::Cursor;

use super::error::ImageError;

/// Decode image data into a DynamicImage, guessing the format from content
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| ImageError::decode_failed(e.to_string()))
}
