//! Core types for image loading.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a photograph could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    /// The locator could not be fetched (network, missing resource).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// I/O error while reading a local file.
    #[error("I/O error: {0}")]
    Io(String),

    /// The bytes are not a recognized image format.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The image is corrupted or truncated.
    #[error("corrupted or incomplete image: {0}")]
    Corrupted(String),
}

/// A photograph could not be fetched or decoded.
///
/// Carries the opaque identifier of the source so callers can tell which
/// photo failed when several are loading at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load image '{source_id}': {reason}")]
pub struct ImageLoadError {
    pub source_id: String,
    pub reason: LoadFailure,
}

impl ImageLoadError {
    pub fn new(source_id: impl Into<String>, reason: LoadFailure) -> Self {
        Self {
            source_id: source_id.into(),
            reason,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded, upright photograph ready for compositing.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Identifier of the source the pixels came from.
    pub source_id: String,
    /// RGB pixels with EXIF orientation already applied.
    pub image: RgbImage,
}

impl LoadedImage {
    pub fn new(source_id: impl Into<String>, image: RgbImage) -> Self {
        Self {
            source_id: source_id.into(),
            image,
        }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_image_load_error_display() {
        let err = ImageLoadError::new("photo.jpg", LoadFailure::InvalidFormat);
        assert_eq!(
            err.to_string(),
            "failed to load image 'photo.jpg': invalid or unsupported image format"
        );
        assert_eq!(err.source_id, "photo.jpg");
    }

    #[test]
    fn test_loaded_image_dimensions() {
        let img = LoadedImage::new("mem", RgbImage::new(40, 30));
        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 30);
    }
}
