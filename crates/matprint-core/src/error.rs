//! Errors returned by the print-file generators.

use thiserror::Error;

use crate::decode::ImageLoadError;
use crate::encode::EncodeError;
use crate::surface::RenderSurfaceError;

/// Message shown to customers when a print file cannot be produced.
pub const PRINT_FILE_FAILURE_MESSAGE: &str = "Failed to generate print file";

/// A compositing call failed. No partial print file is produced.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// The photograph could not be fetched or decoded.
    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),

    /// A raster surface could not be allocated.
    #[error(transparent)]
    RenderSurface(#[from] RenderSurfaceError),

    /// The composite could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The canvas image is too small to source a full mirrored border.
    #[error("Canvas image {width}x{height}in is below the {min}in minimum edge")]
    CanvasTooSmall { width: f64, height: f64, min: f64 },
}

impl CompositeError {
    /// Generic customer-facing message; details go to the logs.
    pub fn user_message(&self) -> &'static str {
        PRINT_FILE_FAILURE_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::LoadFailure;

    #[test]
    fn test_image_load_error_is_transparent() {
        let err: CompositeError =
            ImageLoadError::new("https://cdn/photo.jpg", LoadFailure::InvalidFormat).into();
        assert_eq!(
            err.to_string(),
            "failed to load image 'https://cdn/photo.jpg': invalid or unsupported image format"
        );
        assert_eq!(err.user_message(), "Failed to generate print file");
    }

    #[test]
    fn test_surface_error_conversion() {
        let err: CompositeError = RenderSurfaceError::InvalidSize {
            width: 0,
            height: 5,
        }
        .into();
        assert!(matches!(err, CompositeError::RenderSurface(_)));
    }

    #[test]
    fn test_canvas_too_small_display() {
        let err = CompositeError::CanvasTooSmall {
            width: 1.0,
            height: 4.0,
            min: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Canvas image 1x4in is below the 2in minimum edge"
        );
    }
}
