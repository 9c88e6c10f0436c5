//! Physical layout calculators for every product geometry.
//!
//! All values are in inches. The calculators are pure: the same inputs always
//! produce bit-identical outputs, and none of them can fail. Callers validate
//! that measurements are positive before calling in.
//!
//! # Geometries
//!
//! - Matted and unmatted prints: [`calculate_print_dimensions`]
//! - Signature frames (small fixed opening): [`calculate_signature_dimensions`]
//! - Gallery-wrap canvas: [`calculate_canvas_dimensions`]
//! - Multi-opening collages: [`CollagePrintConfig`]

mod canvas;
mod collage;
mod print;

pub use canvas::{calculate_canvas_dimensions, CanvasPrintDimensions};
pub(crate) use collage::format_inches;
pub use collage::{CollagePhoto, CollagePrintConfig, CollagePrintOpening};
pub use print::{
    calculate_print_dimensions, calculate_signature_dimensions, MatBorders, MatType,
    PrintDimensions,
};
