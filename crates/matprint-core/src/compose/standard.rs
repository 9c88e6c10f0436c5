//! Standard (matted or full-bleed) and signature print compositor.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{finish_print_file, PrintFileResult};
use crate::config::PrintConfig;
use crate::decode::{load_image, ImageSource};
use crate::dimensions::{calculate_signature_dimensions, PrintDimensions};
use crate::error::CompositeError;
use crate::fit::draw_cover;
use crate::surface::{PixelRect, RenderSurface, RenderSurfaceError};

/// Where the photo is printed on the paper (inches from the top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PrintArea {
    fn to_pixels(self, config: &PrintConfig) -> PixelRect {
        PixelRect::new(
            config.to_px(self.x),
            config.to_px(self.y),
            config.to_px_len(self.width),
            config.to_px_len(self.height),
        )
    }
}

/// Compute the image print area for a layout.
///
/// With a mat the photo covers the opening plus the bleed on every side, so
/// small mat-cutting errors never expose bare paper. Without a mat nothing
/// overlays the edge and the photo covers the whole sheet.
pub fn image_print_area(dims: &PrintDimensions, config: &PrintConfig) -> PrintArea {
    if !dims.has_borders() {
        return PrintArea {
            x: 0.0,
            y: 0.0,
            width: dims.paper_width,
            height: dims.paper_height,
        };
    }

    let bleed = config.bleed_inches;
    PrintArea {
        x: dims.border_left - bleed,
        y: dims.border_top - bleed,
        width: dims.mat_opening_width + 2.0 * bleed,
        height: dims.mat_opening_height + 2.0 * bleed,
    }
}

/// Draw a photo onto a paper-sized surface.
pub fn render_standard_print(
    photo: &RgbImage,
    dims: &PrintDimensions,
    config: &PrintConfig,
) -> Result<RenderSurface, RenderSurfaceError> {
    let mut surface = RenderSurface::new(
        config.to_px_len(dims.paper_width),
        config.to_px_len(dims.paper_height),
        config.background,
        config.max_surface_pixels,
    )?;

    let area = image_print_area(dims, config).to_pixels(config);
    draw_cover(&mut surface, photo, area, config.filter);
    Ok(surface)
}

/// Generate a print file for a single-opening frame.
#[tracing::instrument(skip_all, fields(source = source.id()))]
pub async fn generate_print_file<S: ImageSource>(
    source: &S,
    dims: &PrintDimensions,
    config: &PrintConfig,
) -> Result<PrintFileResult, CompositeError> {
    generate_single(source, dims, config, "print").await
}

/// Generate a print file for a signature frame opening.
#[tracing::instrument(skip_all, fields(source = source.id()))]
pub async fn generate_signature_print_file<S: ImageSource>(
    source: &S,
    opening_width: f64,
    opening_height: f64,
    config: &PrintConfig,
) -> Result<PrintFileResult, CompositeError> {
    let dims = calculate_signature_dimensions(opening_width, opening_height);
    generate_single(source, &dims, config, "signature-print").await
}

async fn generate_single<S: ImageSource>(
    source: &S,
    dims: &PrintDimensions,
    config: &PrintConfig,
    prefix: &str,
) -> Result<PrintFileResult, CompositeError> {
    info!(
        paper_width = dims.paper_width,
        paper_height = dims.paper_height,
        dpi = config.dpi,
        "generating print file"
    );

    let photo = load_image(source).await?;
    let surface = render_standard_print(&photo.image, dims, config)?;
    let area = image_print_area(dims, config);

    finish_print_file(
        surface,
        config,
        prefix,
        (dims.paper_width, dims.paper_height),
        (area.width, area.height),
    )
}
