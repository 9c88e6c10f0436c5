//! Cover-fit placement of a photo into a target rectangle.
//!
//! "Cover" scales the photo uniformly until it fills the target on both
//! axes, then centres it. Overflow on one axis is cropped; the target is
//! never letterboxed.

use image::{imageops, RgbImage};
use tracing::debug;

use crate::config::FilterType;
use crate::surface::{PixelRect, RenderSurface};

/// Result of a cover fit, relative to the target's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the source.
    pub scale: f64,
    /// Scaled source width in pixels.
    pub draw_width: f64,
    /// Scaled source height in pixels.
    pub draw_height: f64,
    /// `(target_width - draw_width) / 2`; negative when cropped.
    pub offset_x: f64,
    /// `(target_height - draw_height) / 2`; negative when cropped.
    pub offset_y: f64,
}

/// Compute the cover placement of a `src_w x src_h` image in a target.
///
/// If the source is relatively wider than the target its height is fitted
/// and its width overflows; otherwise its width is fitted and its height
/// overflows.
pub fn compute_cover_fit(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> CoverFit {
    let (sw, sh) = (f64::from(src_w.max(1)), f64::from(src_h.max(1)));
    let (tw, th) = (f64::from(target_w), f64::from(target_h));

    let src_aspect = sw / sh;
    let target_aspect = if th > 0.0 { tw / th } else { src_aspect };

    let (draw_width, draw_height, scale) = if src_aspect > target_aspect {
        let scale = th / sh;
        (sw * scale, th, scale)
    } else {
        let scale = tw / sw;
        (tw, sh * scale, scale)
    };

    CoverFit {
        scale,
        draw_width,
        draw_height,
        offset_x: (tw - draw_width) / 2.0,
        offset_y: (th - draw_height) / 2.0,
    }
}

/// Draw `image` cover-fitted into `target` on the surface.
///
/// Only the part of the photo that lands inside both the target and the
/// surface is resampled, so large print areas do not require scaling the
/// whole photo first.
pub fn draw_cover(
    surface: &mut RenderSurface,
    image: &RgbImage,
    target: PixelRect,
    filter: FilterType,
) {
    let visible = target.intersect(&surface.bounds());
    if visible.is_empty() || image.width() == 0 || image.height() == 0 {
        return;
    }

    let fit = compute_cover_fit(image.width(), image.height(), target.width, target.height);
    debug!(
        target_width = target.width,
        target_height = target.height,
        scale = fit.scale,
        offset_x = fit.offset_x,
        offset_y = fit.offset_y,
        "cover fit"
    );

    let origin_x = target.x as f64 + fit.offset_x;
    let origin_y = target.y as f64 + fit.offset_y;
    let (crop_x, crop_w, dest_x, span_w) =
        covering_span(visible.x, visible.right(), origin_x, fit.scale, image.width());
    let (crop_y, crop_h, dest_y, span_h) =
        covering_span(visible.y, visible.bottom(), origin_y, fit.scale, image.height());

    // The whole-pixel crop is resampled at the fit scale on both axes and
    // placed where those source pixels land, then clipped to the visible part.
    let cropped = imageops::crop_imm(image, crop_x, crop_y, crop_w, crop_h).to_image();
    let scaled = imageops::resize(&cropped, span_w, span_h, filter.to_image_filter());

    let placed = PixelRect::new(dest_x, dest_y, span_w, span_h);
    let clip = placed.intersect(&visible);
    if clip.is_empty() {
        return;
    }
    let part = imageops::crop_imm(
        &scaled,
        (clip.x - dest_x) as u32,
        (clip.y - dest_y) as u32,
        clip.width,
        clip.height,
    )
    .to_image();
    surface.draw_image(&part, clip.x, clip.y);
}

/// Source pixels covering the surface span `lo..hi` on one axis.
///
/// Returns `(src_start, src_len, dest_start, dest_len)`. Both ends of the
/// destination are rounded from their exact scaled positions, so the span
/// always covers `lo..hi` and the scale stays within one pixel of uniform.
fn covering_span(lo: i64, hi: i64, origin: f64, scale: f64, src_len: u32) -> (u32, u32, i64, u32) {
    let max = f64::from(src_len);
    let start = ((lo as f64 - origin) / scale).floor().clamp(0.0, max - 1.0);
    let end = ((hi as f64 - origin) / scale).ceil().clamp(start + 1.0, max);

    let dest_start = (origin + start * scale).round() as i64;
    let dest_end = (origin + end * scale).round() as i64;
    let dest_len = (dest_end - dest_start).max(1) as u32;

    (start as u32, (end - start) as u32, dest_start, dest_len)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a cover fit always covers the target on both axes.
        #[test]
        fn prop_cover_fills_target(
            sw in 1u32..5000,
            sh in 1u32..5000,
            tw in 1u32..5000,
            th in 1u32..5000,
        ) {
            let fit = compute_cover_fit(sw, sh, tw, th);
            prop_assert!(fit.draw_width >= f64::from(tw) - 1e-3);
            prop_assert!(fit.draw_height >= f64::from(th) - 1e-3);
            prop_assert!(fit.offset_x <= 1e-3);
            prop_assert!(fit.offset_y <= 1e-3);
        }

        /// Property: one axis is always fitted exactly and the result is centred.
        #[test]
        fn prop_cover_is_centred(
            sw in 1u32..5000,
            sh in 1u32..5000,
            tw in 1u32..5000,
            th in 1u32..5000,
        ) {
            let fit = compute_cover_fit(sw, sh, tw, th);
            let exact_w = (fit.draw_width - f64::from(tw)).abs() < 1e-3;
            let exact_h = (fit.draw_height - f64::from(th)).abs() < 1e-3;
            prop_assert!(exact_w || exact_h);

            let right_margin = f64::from(tw) - (fit.offset_x + fit.draw_width);
            let bottom_margin = f64::from(th) - (fit.offset_y + fit.draw_height);
            prop_assert!((right_margin - fit.offset_x).abs() < 1e-3);
            prop_assert!((bottom_margin - fit.offset_y).abs() < 1e-3);
        }

        /// Property: every drawn pixel samples the source within one output
        /// pixel of its exact cover-fit position, on both axes.
        #[test]
        fn prop_draw_cover_follows_fit(
            sw in 1u32..40,
            sh in 1u32..40,
            tw in 1u32..120,
            th in 1u32..120,
        ) {
            let photo = RgbImage::from_fn(sw, sh, |x, y| image::Rgb([x as u8, y as u8, 0]));
            let mut surface = RenderSurface::new(tw, th, [255, 255, 255], u64::MAX).unwrap();
            let bounds = surface.bounds();
            draw_cover(&mut surface, &photo, bounds, FilterType::Nearest);

            let fit = compute_cover_fit(sw, sh, tw, th);
            let window = |out: u32, offset: f64, len: u32| {
                let src = |pos: f64| ((pos - offset) / fit.scale).floor();
                let lo = src(f64::from(out) - 0.5).max(0.0) as u8;
                let hi = src(f64::from(out) + 1.5).min(f64::from(len - 1)) as u8;
                (lo, hi)
            };

            for (x, y, p) in surface.as_image().enumerate_pixels() {
                prop_assert_eq!(p.0[2], 0, "pixel ({}, {}) not drawn", x, y);
                let (col_lo, col_hi) = window(x, fit.offset_x, sw);
                let (row_lo, row_hi) = window(y, fit.offset_y, sh);
                prop_assert!(
                    (col_lo..=col_hi).contains(&p.0[0]),
                    "column {} outside {}..={} at x={}", p.0[0], col_lo, col_hi, x
                );
                prop_assert!(
                    (row_lo..=row_hi).contains(&p.0[1]),
                    "row {} outside {}..={} at y={}", p.0[1], row_lo, row_hi, y
                );
            }
        }
    }
}
