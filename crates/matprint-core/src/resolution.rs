//! Source resolution checks and upscale recommendations.

use serde::{Deserialize, Serialize};

use crate::config::{PRINT_DPI, SUFFICIENT_SCALE_LIMIT, UPSCALE_LADDER};

/// Outcome of checking a photo against a physical print size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionCheck {
    /// Pixels per inch along the width at the target size.
    pub current_dpi_x: f64,
    /// Pixels per inch along the height at the target size.
    pub current_dpi_y: f64,
    /// The lower of the two axes.
    pub current_dpi: f64,
    /// Scale the photo needs on its worst axis to reach print density.
    pub required_scale: f64,
    /// Smallest offered upscale factor covering `required_scale`.
    pub recommended_upscale: u32,
    /// Whether the photo prints acceptably without upscaling.
    pub sufficient: bool,
}

/// Check a `width_px x height_px` photo against a `width_in x height_in` print.
///
/// `required_scale` is `max((inches * 300) / pixels)` over both axes. It is
/// mapped onto the upscale ladder `{1, 2, 4, 8, 16}`; anything beyond 16 is
/// still recommended at 16. A required scale up to 1.5 counts as sufficient.
pub fn check_resolution(
    width_px: u32,
    height_px: u32,
    width_in: f64,
    height_in: f64,
) -> ResolutionCheck {
    check_resolution_at(width_px, height_px, width_in, height_in, PRINT_DPI)
}

/// [`check_resolution`] against an explicit target density.
pub fn check_resolution_at(
    width_px: u32,
    height_px: u32,
    width_in: f64,
    height_in: f64,
    target_dpi: u16,
) -> ResolutionCheck {
    let target = f64::from(target_dpi);
    let px_w = f64::from(width_px.max(1));
    let px_h = f64::from(height_px.max(1));

    let current_dpi_x = f64::from(width_px) / width_in;
    let current_dpi_y = f64::from(height_px) / height_in;

    let required_scale = ((width_in * target) / px_w).max((height_in * target) / px_h);

    ResolutionCheck {
        current_dpi_x,
        current_dpi_y,
        current_dpi: current_dpi_x.min(current_dpi_y),
        required_scale,
        recommended_upscale: recommend_upscale(required_scale),
        sufficient: required_scale <= SUFFICIENT_SCALE_LIMIT,
    }
}

/// Smallest ladder step that is at least `required_scale`.
pub fn recommend_upscale(required_scale: f64) -> u32 {
    if required_scale <= 1.0 {
        return 1;
    }
    UPSCALE_LADDER
        .iter()
        .copied()
        .find(|&step| f64::from(step) >= required_scale)
        .unwrap_or(UPSCALE_LADDER[UPSCALE_LADDER.len() - 1])
}
