//! Gallery-wrap canvas compositor.
//!
//! The photo is rendered once onto an intermediate surface the size of the
//! printed image (user image plus stretcher wrap). That surface is pasted in
//! the middle of the paper and is the only source for the eight mirrored
//! border regions around it: four edge strips flipped on one axis and four
//! corner blocks flipped on both. Because every region reflects rendered
//! pixels across its own seam, the fold around the stretcher bar shows no
//! visible edge.
//!
//! ```text
//! +--------------------------------+
//! |  grip margin (background)      |
//! |   +--+------------------+--+   |
//! |   |TL|   top mirror     |TR|   |
//! |   +--+------------------+--+   |
//! |   |L |  printed image   |R |   |
//! |   +--+------------------+--+   |
//! |   |BL|  bottom mirror   |BR|   |
//! |   +--+------------------+--+   |
//! +--------------------------------+
//! ```

use image::{imageops, RgbImage};
use tracing::{debug, info};

use super::{finish_print_file, PrintFileResult};
use crate::config::{PrintConfig, CANVAS_MIN_IMAGE_INCHES};
use crate::decode::{load_image, ImageSource};
use crate::dimensions::{calculate_canvas_dimensions, CanvasPrintDimensions};
use crate::error::CompositeError;
use crate::fit::draw_cover;
use crate::surface::{PixelRect, RenderSurface};

/// Axis (or axes) a mirrored region is flipped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Left/right edges.
    Horizontal,
    /// Top/bottom edges.
    Vertical,
    /// Corners (180 degrees).
    Both,
}

/// One mirrored border region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorRegion {
    /// Block copied from the printed-image surface.
    pub source: PixelRect,
    pub flip: Flip,
    /// Where the flipped block lands on the paper.
    pub dest: PixelRect,
}

/// Pixel geometry of a canvas print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayoutPx {
    pub paper_width: u32,
    pub paper_height: u32,
    /// Printed image (user image + wrap) placed on the paper.
    pub printed: PixelRect,
    /// Mirrored border thickness.
    pub mirror: u32,
}

/// Convert a canvas layout to pixels.
///
/// Each length is rounded independently, so the far grip margin may differ
/// from the near one by a pixel.
pub fn canvas_layout_px(dims: &CanvasPrintDimensions, config: &PrintConfig) -> CanvasLayoutPx {
    let printed_w = config.to_px_len(dims.printed_image_width);
    let printed_h = config.to_px_len(dims.printed_image_height);
    let inset = config.to_px(dims.printed_image_inset());

    CanvasLayoutPx {
        paper_width: config.to_px_len(dims.paper_width),
        paper_height: config.to_px_len(dims.paper_height),
        printed: PixelRect::new(inset, inset, printed_w, printed_h),
        mirror: config.to_px_len(dims.mirrored_border_width),
    }
}

/// The four edge and four corner mirror regions around a printed image.
///
/// `source` rectangles are in printed-image coordinates; `dest` rectangles
/// are in paper coordinates.
pub fn mirror_regions(printed: PixelRect, mirror: u32) -> [MirrorRegion; 8] {
    let (w, h) = (printed.width, printed.height);
    let m = mirror;
    let mi = i64::from(m);
    let (px, py) = (printed.x, printed.y);
    let (far_x, far_y) = (i64::from(w) - mi, i64::from(h) - mi);

    let region = |sx: i64, sy: i64, sw: u32, sh: u32, flip: Flip, dx: i64, dy: i64| MirrorRegion {
        source: PixelRect::new(sx, sy, sw, sh),
        flip,
        dest: PixelRect::new(dx, dy, sw, sh),
    };

    [
        // Edges
        region(0, 0, m, h, Flip::Horizontal, px - mi, py),
        region(far_x, 0, m, h, Flip::Horizontal, printed.right(), py),
        region(0, 0, w, m, Flip::Vertical, px, py - mi),
        region(0, far_y, w, m, Flip::Vertical, px, printed.bottom()),
        // Corners
        region(0, 0, m, m, Flip::Both, px - mi, py - mi),
        region(far_x, 0, m, m, Flip::Both, printed.right(), py - mi),
        region(0, far_y, m, m, Flip::Both, px - mi, printed.bottom()),
        region(far_x, far_y, m, m, Flip::Both, printed.right(), printed.bottom()),
    ]
}

fn flip_block(block: &RgbImage, flip: Flip) -> RgbImage {
    match flip {
        Flip::Horizontal => imageops::flip_horizontal(block),
        Flip::Vertical => imageops::flip_vertical(block),
        Flip::Both => imageops::rotate180(block),
    }
}

fn check_min_size(dims: &CanvasPrintDimensions) -> Result<(), CompositeError> {
    let min = CANVAS_MIN_IMAGE_INCHES;
    if dims.user_image_width < min || dims.user_image_height < min {
        return Err(CompositeError::CanvasTooSmall {
            width: dims.user_image_width,
            height: dims.user_image_height,
            min,
        });
    }
    Ok(())
}

/// Draw a gallery-wrap canvas print.
pub fn render_canvas_print(
    photo: &RgbImage,
    dims: &CanvasPrintDimensions,
    config: &PrintConfig,
) -> Result<RenderSurface, CompositeError> {
    check_min_size(dims)?;
    let layout = canvas_layout_px(dims, config);

    let mut printed = RenderSurface::new(
        layout.printed.width,
        layout.printed.height,
        config.background,
        config.max_surface_pixels,
    )?;
    let printed_bounds = printed.bounds();
    draw_cover(&mut printed, photo, printed_bounds, config.filter);

    let mut paper = RenderSurface::new(
        layout.paper_width,
        layout.paper_height,
        config.background,
        config.max_surface_pixels,
    )?;
    paper.draw_image(printed.as_image(), layout.printed.x, layout.printed.y);

    for region in mirror_regions(layout.printed, layout.mirror) {
        let block = printed.copy_region(region.source);
        paper.draw_image(&flip_block(&block, region.flip), region.dest.x, region.dest.y);
    }
    debug!(
        paper_width = layout.paper_width,
        paper_height = layout.paper_height,
        mirror = layout.mirror,
        "canvas mirrors composited"
    );

    Ok(paper)
}

/// Generate a gallery-wrap canvas print file for a user image size (inches).
#[tracing::instrument(skip_all, fields(source = source.id()))]
pub async fn generate_canvas_print_file<S: ImageSource>(
    source: &S,
    user_width: f64,
    user_height: f64,
    config: &PrintConfig,
) -> Result<PrintFileResult, CompositeError> {
    let dims = calculate_canvas_dimensions(user_width, user_height);
    check_min_size(&dims)?;
    info!(
        paper_width = dims.paper_width,
        paper_height = dims.paper_height,
        dpi = config.dpi,
        "generating canvas print file"
    );

    let photo = load_image(source).await?;
    let surface = render_canvas_print(&photo.image, &dims, config)?;

    finish_print_file(
        surface,
        config,
        "canvas-print",
        (dims.paper_width, dims.paper_height),
        (dims.printed_image_width, dims.printed_image_height),
    )
}
