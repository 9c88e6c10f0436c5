//! Multi-opening collage compositor.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{finish_print_file, PrintFileResult};
use crate::config::{PrintConfig, RgbColor};
use crate::decode::{load_image, ImageSource};
use crate::dimensions::{CollagePhoto, CollagePrintConfig, CollagePrintOpening};
use crate::error::CompositeError;
use crate::fit::draw_cover;
use crate::surface::{PixelRect, RenderSurface, RenderSurfaceError};

const MOUNT_LABEL: &str = "MOUNT PHOTO HERE";
const UNAVAILABLE_LABEL: &str = "PHOTO UNAVAILABLE";

/// How each opening of a collage was filled.
///
/// `print_count + byo_count + skipped_count` always equals the number of
/// openings. Error placeholders are counted in both `byo_count` and
/// `error_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollageCounts {
    pub print_count: usize,
    pub byo_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
}

/// A collage print file plus its opening counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollagePrintResult {
    pub file: PrintFileResult,
    pub print_count: usize,
    pub byo_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
}

fn opening_rect(opening: &CollagePrintOpening, config: &PrintConfig) -> PixelRect {
    PixelRect::new(
        config.to_px(opening.x),
        config.to_px(opening.y),
        config.to_px_len(opening.width),
        config.to_px_len(opening.height),
    )
}

fn draw_placeholder(
    surface: &mut RenderSurface,
    opening: &CollagePrintOpening,
    config: &PrintConfig,
    headline: &str,
    fill: RgbColor,
) {
    let rect = opening_rect(opening, config);
    let bleed = config.to_px(config.bleed_inches);
    surface.fill_rect(rect.expand(bleed), fill);

    let dpi = u32::from(config.dpi);
    surface.stroke_dashed_rect(
        rect,
        config.placeholder_ink,
        (dpi / 100).max(1),
        (dpi / 10).max(1),
        (dpi / 20).max(1),
    );

    let label = opening.size_label();
    let lines = [headline, label.as_str()];
    let widest = RenderSurface::text_width(&lines, 1);
    let fit_scale = if widest == 0 {
        0
    } else {
        rect.width * 9 / 10 / widest
    };
    let scale = (dpi / 40).max(1).min(fit_scale);
    if scale == 0 {
        debug!(
            width = rect.width,
            "opening too narrow for placeholder text"
        );
        return;
    }

    let cx = rect.x + i64::from(rect.width / 2);
    let cy = rect.y + i64::from(rect.height / 2);
    surface.draw_text_centered(&lines, cx, cy, scale, config.placeholder_ink);
}

/// Draw every opening of a collage onto a frame-interior-sized surface.
///
/// Openings are drawn in order, so a later opening's bleed overlaps an
/// earlier one. Photos that fail to load become error placeholders; only
/// surface allocation can fail the whole call.
pub async fn render_collage_print<S: ImageSource>(
    collage: &CollagePrintConfig<S>,
    config: &PrintConfig,
) -> Result<(RenderSurface, CollageCounts), RenderSurfaceError> {
    let (interior_w, interior_h) = collage.interior_size();
    let mut surface = RenderSurface::new(
        config.to_px_len(interior_w),
        config.to_px_len(interior_h),
        config.background,
        config.max_surface_pixels,
    )?;
    let bleed = config.to_px(config.bleed_inches);
    let mut counts = CollageCounts::default();

    for &index in collage.photos.keys() {
        if index >= collage.openings.len() {
            warn!(
                index,
                openings = collage.openings.len(),
                "photo assigned to missing opening, ignoring"
            );
        }
    }

    for (index, opening) in collage.openings.iter().enumerate() {
        if !opening.is_drawable() {
            warn!(
                index,
                width = opening.width,
                height = opening.height,
                "skipping collage opening with non-positive size"
            );
            counts.skipped_count += 1;
            continue;
        }

        let source = match collage.photos.get(&index) {
            Some(CollagePhoto::Source(source)) => source,
            Some(CollagePhoto::BringYourOwn) | None => {
                draw_placeholder(
                    &mut surface,
                    opening,
                    config,
                    MOUNT_LABEL,
                    config.placeholder_fill,
                );
                counts.byo_count += 1;
                continue;
            }
        };

        match load_image(source).await {
            Ok(photo) => {
                let target = opening_rect(opening, config).expand(bleed);
                draw_cover(&mut surface, &photo.image, target, config.filter);
                counts.print_count += 1;
            }
            Err(err) => {
                warn!(index, error = %err, "collage photo failed to load, drawing placeholder");
                draw_placeholder(
                    &mut surface,
                    opening,
                    config,
                    UNAVAILABLE_LABEL,
                    config.placeholder_error_fill,
                );
                counts.byo_count += 1;
                counts.error_count += 1;
            }
        }
    }

    Ok((surface, counts))
}

/// Generate a collage print file sized to the frame interior.
#[tracing::instrument(skip_all, fields(openings = collage.openings.len()))]
pub async fn generate_collage_print_file<S: ImageSource>(
    collage: &CollagePrintConfig<S>,
    config: &PrintConfig,
) -> Result<CollagePrintResult, CompositeError> {
    let (interior_w, interior_h) = collage.interior_size();
    info!(
        paper_width = interior_w,
        paper_height = interior_h,
        dpi = config.dpi,
        "generating collage print file"
    );

    let (surface, counts) = render_collage_print(collage, config).await?;
    info!(
        print_count = counts.print_count,
        byo_count = counts.byo_count,
        error_count = counts.error_count,
        skipped_count = counts.skipped_count,
        "collage openings composited"
    );

    let file = finish_print_file(
        surface,
        config,
        "collage-print",
        (interior_w, interior_h),
        (interior_w, interior_h),
    )?;

    Ok(CollagePrintResult {
        file,
        print_count: counts.print_count,
        byo_count: counts.byo_count,
        error_count: counts.error_count,
        skipped_count: counts.skipped_count,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use image::{Rgb, RgbImage};

    use crate::decode::BytesSource;

    const RED: [u8; 3] = [220, 30, 30];
    const BLUE: [u8; 3] = [20, 40, 200];

    fn solid(color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(30, 30, Rgb(color))
    }

    /// 12x10 frame, 1in molding: 10x8 interior with three 3x3 openings.
    fn three_openings() -> CollagePrintConfig<BytesSource> {
        CollagePrintConfig::new(
            12.0,
            10.0,
            1.0,
            vec![
                CollagePrintOpening::new(1.0, 1.0, 3.0, 3.0),
                CollagePrintOpening::new(6.0, 1.0, 3.0, 3.0),
                CollagePrintOpening::new(1.0, 5.0, 3.0, 2.5),
            ],
        )
    }

    #[tokio::test]
    async fn test_two_photos_one_byo() {
        let config = test_config(20);
        let collage = three_openings()
            .with_photo(0, CollagePhoto::Source(png_source("a", &solid(RED))))
            .with_photo(1, CollagePhoto::Source(png_source("b", &solid(BLUE))))
            .with_photo(2, CollagePhoto::BringYourOwn);

        let (surface, counts) = render_collage_print(&collage, &config).await.unwrap();
        assert_eq!(
            counts,
            CollageCounts {
                print_count: 2,
                byo_count: 1,
                error_count: 0,
                skipped_count: 0
            }
        );

        let img = surface.as_image();
        assert_eq!(img.dimensions(), (200, 160));
        assert_eq!(img.get_pixel(50, 50).0, RED);
        assert_eq!(img.get_pixel(150, 50).0, BLUE);
        // Bleed extends 0.5in (10px) past the opening.
        assert_eq!(img.get_pixel(11, 50).0, RED);
        assert_eq!(img.get_pixel(9, 50).0, [255, 255, 255]);
        // Placeholder fill inside the BYO opening, dashed ink at its corner.
        assert_eq!(img.get_pixel(25, 105).0, config.placeholder_fill);
        assert_eq!(img.get_pixel(20, 100).0, config.placeholder_ink);
    }

    #[tokio::test]
    async fn test_unassigned_opening_gets_placeholder() {
        let config = test_config(20);
        let collage = three_openings()
            .with_photo(0, CollagePhoto::Source(png_source("a", &solid(RED))));

        let (_, counts) = render_collage_print(&collage, &config).await.unwrap();
        assert_eq!(counts.print_count, 1);
        assert_eq!(counts.byo_count, 2);
    }

    #[tokio::test]
    async fn test_failed_photo_becomes_error_placeholder() {
        let config = test_config(20);
        let collage = three_openings()
            .with_photo(0, CollagePhoto::Source(broken_source("gone")))
            .with_photo(1, CollagePhoto::Source(png_source("b", &solid(BLUE))));

        let (surface, counts) = render_collage_print(&collage, &config).await.unwrap();
        assert_eq!(counts.print_count, 1);
        assert_eq!(counts.byo_count, 2);
        assert_eq!(counts.error_count, 1);
        assert_eq!(
            surface.as_image().get_pixel(25, 25).0,
            config.placeholder_error_fill
        );
        assert_eq!(surface.as_image().get_pixel(150, 50).0, BLUE);
    }

    #[tokio::test]
    async fn test_degenerate_openings_are_skipped() {
        let config = test_config(20);
        let mut collage = three_openings()
            .with_photo(1, CollagePhoto::Source(png_source("b", &solid(BLUE))))
            .with_photo(7, CollagePhoto::BringYourOwn);
        collage.openings.push(CollagePrintOpening::new(5.0, 5.0, 0.0, 2.0));
        collage.openings.push(CollagePrintOpening::new(5.0, 5.0, 2.0, -1.0));

        let (_, counts) = render_collage_print(&collage, &config).await.unwrap();
        assert_eq!(counts.skipped_count, 2);
        assert_eq!(
            counts.print_count + counts.byo_count + counts.skipped_count,
            collage.openings.len()
        );
    }

    #[tokio::test]
    async fn test_placeholder_text_is_drawn_when_it_fits() {
        let config = test_config(100);
        let collage: CollagePrintConfig<BytesSource> = CollagePrintConfig::new(
            6.0,
            5.0,
            0.5,
            vec![CollagePrintOpening::new(1.0, 1.0, 3.0, 2.0)],
        );

        let (surface, counts) = render_collage_print(&collage, &config).await.unwrap();
        assert_eq!(counts.byo_count, 1);

        // Ink well inside the opening can only come from the text.
        let img = surface.as_image();
        let ink = (120..380)
            .flat_map(|x| (120..280).map(move |y| (x, y)))
            .filter(|&(x, y)| img.get_pixel(x, y).0 == config.placeholder_ink)
            .count();
        assert!(ink > 0);
    }

    #[tokio::test]
    async fn test_generate_collage_print_file() {
        let config = test_config(20);
        let collage = three_openings()
            .with_photo(0, CollagePhoto::Source(png_source("a", &gradient_photo(60, 60))));

        let result = generate_collage_print_file(&collage, &config).await.unwrap();
        assert_eq!((result.file.paper_width_in, result.file.paper_height_in), (10.0, 8.0));
        assert_eq!((result.file.paper_width_px, result.file.paper_height_px), (200, 160));
        assert!(result.file.filename.starts_with("collage-print-10x8in-"));
        assert_eq!(result.print_count, 1);
        assert_eq!(result.byo_count, 2);
        assert!(result.file.density_patched);
    }
}
