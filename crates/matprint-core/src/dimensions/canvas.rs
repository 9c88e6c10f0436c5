//! Gallery-wrap canvas layout.
//!
//! From the centre outward: the user's visible image, the stretcher wrap, the
//! mirrored border and the unprinted grip margin. Each edge adds exactly 3in.

use serde::{Deserialize, Serialize};

use crate::config::{
    CANVAS_EDGE_TOTAL_INCHES, CANVAS_GRIP_MARGIN_INCHES, CANVAS_MIRROR_BORDER_INCHES,
    CANVAS_STRETCHER_WRAP_INCHES,
};

/// Physical layout of a gallery-wrap canvas print (inches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPrintDimensions {
    /// Front face the customer designed.
    pub user_image_width: f64,
    pub user_image_height: f64,
    /// User image plus the stretcher wrap on both edges.
    pub printed_image_width: f64,
    pub printed_image_height: f64,
    /// Wrap depth per edge.
    pub stretcher_wrap: f64,
    /// Mirrored border per edge.
    pub mirrored_border_width: f64,
    /// Unprinted grip margin per edge.
    pub grip_margin: f64,
    pub paper_width: f64,
    pub paper_height: f64,
}

impl CanvasPrintDimensions {
    /// Distance from the paper edge to the printed image (mirror + grip).
    #[inline]
    pub fn printed_image_inset(&self) -> f64 {
        self.mirrored_border_width + self.grip_margin
    }
}

/// Compute the canvas layout for a user image size.
pub fn calculate_canvas_dimensions(user_width: f64, user_height: f64) -> CanvasPrintDimensions {
    let wrap = CANVAS_STRETCHER_WRAP_INCHES;
    CanvasPrintDimensions {
        user_image_width: user_width,
        user_image_height: user_height,
        printed_image_width: user_width + 2.0 * wrap,
        printed_image_height: user_height + 2.0 * wrap,
        stretcher_wrap: wrap,
        mirrored_border_width: CANVAS_MIRROR_BORDER_INCHES,
        grip_margin: CANVAS_GRIP_MARGIN_INCHES,
        paper_width: user_width + 2.0 * CANVAS_EDGE_TOTAL_INCHES,
        paper_height: user_height + 2.0 * CANVAS_EDGE_TOTAL_INCHES,
    }
}
