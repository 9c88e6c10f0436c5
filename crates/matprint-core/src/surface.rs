//! Private raster surfaces owned by a single compositing call.
//!
//! A [`RenderSurface`] is an RGB8 buffer with clipped drawing helpers. Pixel
//! rectangles use signed origins so geometry that hangs off the paper (bleed
//! past the edge, negative fit offsets) is clipped instead of rejected.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{imageops, Rgb, RgbImage};
use thiserror::Error;

use crate::config::RgbColor;

/// A raster surface could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderSurfaceError {
    /// Width or height is zero.
    #[error("Invalid surface size: {width}x{height} must be non-zero")]
    InvalidSize { width: u32, height: u32 },

    /// The surface exceeds the configured pixel limit.
    #[error("Surface {width}x{height} exceeds the limit of {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },

    /// The pixel buffer could not be allocated.
    #[error("Failed to allocate a {width}x{height} surface")]
    AllocationFailed { width: u32, height: u32 },
}

/// Axis-aligned pixel rectangle with a signed origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap of two rectangles; empty when they do not intersect.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return PixelRect::new(x0, y0, 0, 0);
        }
        PixelRect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    /// Grow the rectangle by `amount` pixels on every side.
    pub fn expand(&self, amount: i64) -> PixelRect {
        PixelRect::new(
            self.x - amount,
            self.y - amount,
            (i64::from(self.width) + 2 * amount).max(0) as u32,
            (i64::from(self.height) + 2 * amount).max(0) as u32,
        )
    }
}

/// Glyph cell size of the embedded bitmap font.
const GLYPH_SIZE: u32 = 8;

/// An RGB8 drawing surface.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    image: RgbImage,
}

impl RenderSurface {
    /// Allocate a surface filled with `background`.
    ///
    /// Fails instead of aborting when the buffer is empty, larger than
    /// `max_pixels`, or cannot be allocated.
    pub fn new(
        width: u32,
        height: u32,
        background: RgbColor,
        max_pixels: u64,
    ) -> Result<Self, RenderSurfaceError> {
        if width == 0 || height == 0 {
            return Err(RenderSurfaceError::InvalidSize { width, height });
        }

        let pixels = u64::from(width) * u64::from(height);
        if pixels > max_pixels {
            return Err(RenderSurfaceError::TooLarge {
                width,
                height,
                limit: max_pixels,
            });
        }

        let len = usize::try_from(pixels * 3)
            .map_err(|_| RenderSurfaceError::AllocationFailed { width, height })?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| RenderSurfaceError::AllocationFailed { width, height })?;
        for _ in 0..pixels {
            buffer.extend_from_slice(&background);
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderSurfaceError::AllocationFailed { width, height })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whole-surface rectangle.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width(), self.height())
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, rect: PixelRect, color: RgbColor) {
        let clip = rect.intersect(&self.bounds());
        if clip.is_empty() {
            return;
        }
        let color = Rgb(color);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Copy `src` onto the surface with its top-left at `(x, y)`, clipped.
    pub fn draw_image(&mut self, src: &RgbImage, x: i64, y: i64) {
        imageops::replace(&mut self.image, src, x, y);
    }

    /// Copy a region out of the surface. The region is clipped to the bounds.
    pub fn copy_region(&self, rect: PixelRect) -> RgbImage {
        let clip = rect.intersect(&self.bounds());
        if clip.is_empty() {
            return RgbImage::new(0, 0);
        }
        imageops::crop_imm(
            &self.image,
            clip.x as u32,
            clip.y as u32,
            clip.width,
            clip.height,
        )
        .to_image()
    }

    /// Stroke a dashed rectangle outline whose outer edge is `rect`.
    pub fn stroke_dashed_rect(
        &mut self,
        rect: PixelRect,
        color: RgbColor,
        thickness: u32,
        dash: u32,
        gap: u32,
    ) {
        if rect.is_empty() || thickness == 0 {
            return;
        }
        let t = thickness.min(rect.width).min(rect.height);
        let period = i64::from(dash.max(1) + gap);
        let dash = i64::from(dash.max(1));

        let mut x = 0i64;
        while x < i64::from(rect.width) {
            let len = dash.min(i64::from(rect.width) - x) as u32;
            self.fill_rect(PixelRect::new(rect.x + x, rect.y, len, t), color);
            self.fill_rect(
                PixelRect::new(rect.x + x, rect.bottom() - i64::from(t), len, t),
                color,
            );
            x += period;
        }

        let mut y = 0i64;
        while y < i64::from(rect.height) {
            let len = dash.min(i64::from(rect.height) - y) as u32;
            self.fill_rect(PixelRect::new(rect.x, rect.y + y, t, len), color);
            self.fill_rect(
                PixelRect::new(rect.right() - i64::from(t), rect.y + y, t, len),
                color,
            );
            y += period;
        }
    }

    /// Draw lines of text centred on `(cx, cy)` with the embedded 8x8 font.
    ///
    /// `scale` is the size of one font bit in pixels. Characters missing from
    /// the font are drawn as `?`.
    pub fn draw_text_centered(
        &mut self,
        lines: &[&str],
        cx: i64,
        cy: i64,
        scale: u32,
        color: RgbColor,
    ) {
        if lines.is_empty() || scale == 0 {
            return;
        }
        let glyph = i64::from(GLYPH_SIZE * scale);
        let line_gap = glyph / 2;
        let block_height = glyph * lines.len() as i64 + line_gap * (lines.len() as i64 - 1);
        let mut top = cy - block_height / 2;

        for line in lines {
            let chars = line.chars().count() as i64;
            let mut left = cx - chars * glyph / 2;
            for ch in line.chars() {
                self.draw_glyph(ch, left, top, scale, color);
                left += glyph;
            }
            top += glyph + line_gap;
        }
    }

    fn draw_glyph(&mut self, ch: char, x: i64, y: i64, scale: u32, color: RgbColor) {
        let Some(bitmap) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            return;
        };
        let cell = i64::from(scale);
        for (row, bits) in bitmap.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                self.fill_rect(
                    PixelRect::new(
                        x + i64::from(col) * cell,
                        y + row as i64 * cell,
                        scale,
                        scale,
                    ),
                    color,
                );
            }
        }
    }

    /// Width in pixels of the widest line at the given font scale.
    pub fn text_width(lines: &[&str], scale: u32) -> u32 {
        lines
            .iter()
            .map(|line| line.chars().count() as u32 * GLYPH_SIZE * scale)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: RgbColor = [255, 255, 255];
    const BLACK: RgbColor = [0, 0, 0];

    fn surface(w: u32, h: u32) -> RenderSurface {
        RenderSurface::new(w, h, WHITE, u64::MAX).unwrap()
    }

    #[test]
    fn test_new_fills_background() {
        let s = RenderSurface::new(3, 2, [10, 20, 30], 100).unwrap();
        assert_eq!(s.as_image().get_pixel(2, 1).0, [10, 20, 30]);
        assert_eq!(s.as_image().as_raw().len(), 18);
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            RenderSurface::new(0, 10, WHITE, 100),
            Err(RenderSurfaceError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_new_rejects_over_limit() {
        assert!(matches!(
            RenderSurface::new(100, 100, WHITE, 9_999),
            Err(RenderSurfaceError::TooLarge { limit: 9_999, .. })
        ));
    }

    #[test]
    fn test_rect_intersect() {
        let a = PixelRect::new(-5, -5, 10, 10);
        let b = PixelRect::new(0, 0, 20, 20);
        assert_eq!(a.intersect(&b), PixelRect::new(0, 0, 5, 5));

        let c = PixelRect::new(30, 30, 5, 5);
        assert!(b.intersect(&c).is_empty());
    }

    #[test]
    fn test_rect_expand() {
        let r = PixelRect::new(10, 10, 4, 6).expand(2);
        assert_eq!(r, PixelRect::new(8, 8, 8, 10));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut s = surface(4, 4);
        s.fill_rect(PixelRect::new(-2, -2, 4, 4), BLACK);
        assert_eq!(s.as_image().get_pixel(0, 0).0, BLACK);
        assert_eq!(s.as_image().get_pixel(1, 1).0, BLACK);
        assert_eq!(s.as_image().get_pixel(2, 2).0, WHITE);
    }

    #[test]
    fn test_draw_image_negative_offset() {
        let mut s = surface(4, 4);
        let src = RgbImage::from_pixel(3, 3, Rgb(BLACK));
        s.draw_image(&src, -1, -1);
        assert_eq!(s.as_image().get_pixel(1, 1).0, BLACK);
        assert_eq!(s.as_image().get_pixel(2, 2).0, WHITE);
    }

    #[test]
    fn test_copy_region() {
        let mut s = surface(6, 6);
        s.fill_rect(PixelRect::new(2, 2, 2, 2), BLACK);
        let region = s.copy_region(PixelRect::new(2, 2, 3, 3));
        assert_eq!(region.dimensions(), (3, 3));
        assert_eq!(region.get_pixel(0, 0).0, BLACK);
        assert_eq!(region.get_pixel(2, 2).0, WHITE);
    }

    #[test]
    fn test_stroke_dashed_rect_leaves_gaps() {
        let mut s = surface(40, 40);
        s.stroke_dashed_rect(PixelRect::new(0, 0, 40, 40), BLACK, 1, 4, 4);
        let img = s.as_image();
        // Top edge: dash at 0..4, gap at 4..8
        assert_eq!(img.get_pixel(0, 0).0, BLACK);
        assert_eq!(img.get_pixel(3, 0).0, BLACK);
        assert_eq!(img.get_pixel(5, 0).0, WHITE);
        // Interior untouched
        assert_eq!(img.get_pixel(20, 20).0, WHITE);
        // Bottom and right edges are stroked too
        assert_eq!(img.get_pixel(0, 39).0, BLACK);
        assert_eq!(img.get_pixel(39, 0).0, BLACK);
    }

    #[test]
    fn test_draw_text_marks_pixels_near_center() {
        let mut s = surface(200, 100);
        s.draw_text_centered(&["HI", "5 x 7 in"], 100, 50, 2, BLACK);
        let inked = s.as_image().pixels().filter(|p| p.0 == BLACK).count();
        assert!(inked > 0);
        // Nothing drawn in the far corner
        assert_eq!(s.as_image().get_pixel(0, 0).0, WHITE);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(RenderSurface::text_width(&["AB", "ABCD"], 2), 64);
        assert_eq!(RenderSurface::text_width(&[], 2), 0);
    }
}
