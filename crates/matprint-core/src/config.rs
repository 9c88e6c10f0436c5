//! Compositor configuration and shared constants.
//!
//! Every physical constant used by the calculators and compositors is named
//! here. Compositors take a [`PrintConfig`] value instead of reading globals,
//! so tests can render at a low density without touching production defaults.

use serde::{Deserialize, Serialize};

// =============================================================================
// Print density
// =============================================================================

/// Production print density (pixels per inch).
pub const PRINT_DPI: u16 = 300;

/// Extra image printed past a mat opening on every side (inches).
pub const BLEED_INCHES: f64 = 0.5;

/// JPEG quality used for print files (1-100).
pub const PRINT_JPEG_QUALITY: u8 = 95;

// =============================================================================
// Signature frames
// =============================================================================

/// Padding added around a signature-frame opening on each edge (inches).
pub const SIGNATURE_PADDING_INCHES: f64 = 1.0;

// =============================================================================
// Gallery-wrap canvas
// =============================================================================

/// Image that wraps around the stretcher bar depth on each edge (inches).
pub const CANVAS_STRETCHER_WRAP_INCHES: f64 = 0.375;

/// Mirrored border printed outside the wrap on each edge (inches).
pub const CANVAS_MIRROR_BORDER_INCHES: f64 = 2.0;

/// Unprinted margin the stretching machine grips on each edge (inches).
pub const CANVAS_GRIP_MARGIN_INCHES: f64 = 0.625;

/// Total paper added on each edge of a canvas print (inches).
pub const CANVAS_EDGE_TOTAL_INCHES: f64 =
    CANVAS_STRETCHER_WRAP_INCHES + CANVAS_MIRROR_BORDER_INCHES + CANVAS_GRIP_MARGIN_INCHES;

/// Smallest user image edge accepted by the canvas compositor (inches).
///
/// The mirrored border samples a 2in strip of the printed image, so the
/// printed image must be at least that wide on both axes.
pub const CANVAS_MIN_IMAGE_INCHES: f64 = 2.0;

// =============================================================================
// Resolution ladder
// =============================================================================

/// Upscale factors offered to the user, smallest first.
pub const UPSCALE_LADDER: [u32; 5] = [1, 2, 4, 8, 16];

/// Largest required scale still considered print-ready without upscaling.
pub const SUFFICIENT_SCALE_LIMIT: f64 = 1.5;

// =============================================================================
// Raster limits
// =============================================================================

/// Default cap on the pixel count of a single render surface.
///
/// A 40x60in canvas print at 300 ppi is roughly 275 megapixels.
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 300_000_000;

/// RGB colour used in configuration.
pub type RgbColor = [u8; 3];

/// Resampling filter used when scaling photographs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Settings shared by every compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Output density in pixels per inch.
    pub dpi: u16,
    /// Bleed printed past each mat or collage opening edge (inches).
    pub bleed_inches: f64,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Paper colour outside the image print area.
    pub background: RgbColor,
    /// Fill for "bring your own" collage placeholders.
    pub placeholder_fill: RgbColor,
    /// Fill for collage openings whose photo failed to load.
    pub placeholder_error_fill: RgbColor,
    /// Dashed outline and text colour for placeholders.
    pub placeholder_ink: RgbColor,
    /// Resampling filter for photo scaling.
    pub filter: FilterType,
    /// Largest surface (in pixels) a compositor may allocate.
    pub max_surface_pixels: u64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            dpi: PRINT_DPI,
            bleed_inches: BLEED_INCHES,
            jpeg_quality: PRINT_JPEG_QUALITY,
            background: [255, 255, 255],
            placeholder_fill: [240, 240, 240],
            placeholder_error_fill: [253, 226, 226],
            placeholder_ink: [120, 120, 120],
            filter: FilterType::Lanczos3,
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

impl PrintConfig {
    /// Create the production configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a physical length to whole pixels at this density.
    #[inline]
    pub fn to_px(&self, inches: f64) -> i64 {
        (inches * f64::from(self.dpi)).round() as i64
    }

    /// Convert a non-negative physical length to a pixel extent.
    ///
    /// Saturates at `u32::MAX` so oversized lengths are rejected by the
    /// surface pixel limit instead of wrapping to a small size.
    #[inline]
    pub fn to_px_len(&self, inches: f64) -> u32 {
        u32::try_from(self.to_px(inches).max(0)).unwrap_or(u32::MAX)
    }
}
