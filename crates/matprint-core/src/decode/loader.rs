//! Photo decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use tracing::debug;

use super::{ImageLoadError, ImageSource, LoadFailure, LoadedImage, Orientation};

/// Fetch and decode a photograph.
///
/// The fetch is awaited; decoding runs synchronously afterwards. Any failure
/// is reported as an [`ImageLoadError`] carrying the source identifier, and
/// no partially decoded image is ever returned.
pub async fn load_image<S: ImageSource>(source: &S) -> Result<LoadedImage, ImageLoadError> {
    let bytes = source.fetch().await?;
    decode_image(source.id(), &bytes)
}

/// Decode encoded image bytes into an upright RGB image.
///
/// The format is sniffed from the bytes. EXIF orientation is applied so the
/// pixels match what a browser would display.
pub fn decode_image(source_id: &str, bytes: &[u8]) -> Result<LoadedImage, ImageLoadError> {
    if bytes.is_empty() {
        return Err(ImageLoadError::new(source_id, LoadFailure::InvalidFormat));
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageLoadError::new(source_id, LoadFailure::Corrupted(e.to_string())))?;

    let img = reader.decode().map_err(|e| {
        let reason = match e {
            ImageError::Unsupported(_) => LoadFailure::InvalidFormat,
            other => LoadFailure::Corrupted(other.to_string()),
        };
        ImageLoadError::new(source_id, reason)
    })?;

    let rgb = apply_orientation(img, orientation).into_rgb8();
    debug!(
        source = source_id,
        width = rgb.width(),
        height = rgb.height(),
        ?orientation,
        "decoded photo"
    );
    Ok(LoadedImage::new(source_id, rgb))
}

/// Extract EXIF orientation, defaulting to `Normal` when absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
