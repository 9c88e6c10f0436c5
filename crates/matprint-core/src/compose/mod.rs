//! Print-file compositors.
//!
//! Each generator follows the same pipeline:
//!
//! 1. Await the photo(s) from their [`ImageSource`](crate::decode::ImageSource)
//! 2. Draw onto a private [`RenderSurface`] sized to the paper
//! 3. Encode to JPEG
//! 4. Patch the JFIF density
//! 5. Return a [`PrintFileResult`]
//!
//! Calls share no state, so any number may run concurrently. A failed photo
//! load rejects only the call that owns it.

mod canvas;
mod collage;
mod standard;

pub use canvas::{
    canvas_layout_px, generate_canvas_print_file, mirror_regions, render_canvas_print,
    CanvasLayoutPx, Flip, MirrorRegion,
};
pub use collage::{
    generate_collage_print_file, render_collage_print, CollageCounts, CollagePrintResult,
};
pub use standard::{
    generate_print_file, generate_signature_print_file, image_print_area, render_standard_print,
    PrintArea,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::PrintConfig;
use crate::dimensions::format_inches;
use crate::encode::{apply_density_patch, encode_jpeg};
use crate::error::CompositeError;
use crate::surface::RenderSurface;

/// A finished print file and the geometry it was built with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintFileResult {
    /// Encoded JPEG bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Suggested download/upload name.
    pub filename: String,
    pub paper_width_in: f64,
    pub paper_height_in: f64,
    pub paper_width_px: u32,
    pub paper_height_px: u32,
    /// Size of the area the photo was printed into (inches).
    pub image_width_in: f64,
    pub image_height_in: f64,
    /// Whether the JFIF density was rewritten to the print density.
    pub density_patched: bool,
}

/// Build a sortable print filename such as `print-8x10in-20261016-142501-042.jpg`.
pub fn print_filename(
    prefix: &str,
    paper_width_in: f64,
    paper_height_in: f64,
    timestamp: DateTime<Utc>,
) -> String {
    format!(
        "{}-{}x{}in-{}.jpg",
        prefix,
        format_inches(paper_width_in),
        format_inches(paper_height_in),
        timestamp.format("%Y%m%d-%H%M%S-%3f")
    )
}

/// Encode, patch and describe a finished surface.
fn finish_print_file(
    surface: RenderSurface,
    config: &PrintConfig,
    prefix: &str,
    paper_in: (f64, f64),
    image_in: (f64, f64),
) -> Result<PrintFileResult, CompositeError> {
    let (paper_width_px, paper_height_px) = (surface.width(), surface.height());
    let mut bytes = encode_jpeg(surface.as_image(), config.jpeg_quality)?;
    drop(surface);

    let density_patched = apply_density_patch(&mut bytes, config.dpi);
    let filename = print_filename(prefix, paper_in.0, paper_in.1, Utc::now());

    info!(
        filename = %filename,
        paper_width_px,
        paper_height_px,
        bytes = bytes.len(),
        density_patched,
        "print file generated"
    );

    Ok(PrintFileResult {
        bytes,
        filename,
        paper_width_in: paper_in.0,
        paper_height_in: paper_in.1,
        paper_width_px,
        paper_height_px,
        image_width_in: image_in.0,
        image_height_in: image_in.1,
        density_patched,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use crate::config::{FilterType, PrintConfig};
    use crate::decode::BytesSource;

    /// Low-density config so tests stay fast.
    pub fn test_config(dpi: u16) -> PrintConfig {
        PrintConfig {
            dpi,
            filter: FilterType::Nearest,
            ..PrintConfig::default()
        }
    }

    /// Photo where every pixel encodes its own position.
    pub fn gradient_photo(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 256 + y / 256) % 256) as u8])
        })
    }

    pub fn png_source(id: &str, img: &RgbImage) -> BytesSource {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        BytesSource::new(id, out.into_inner())
    }

    pub fn broken_source(id: &str) -> BytesSource {
        BytesSource::new(id, vec![0xFF, 0xD8, 0xFF, 0x00, 0x13])
    }
}
