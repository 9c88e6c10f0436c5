//! Matprint Core - print-file compositing library
//!
//! This crate turns a customer's photograph and a frame geometry into a
//! print-ready 300 DPI JPEG. It covers matted and full-bleed prints,
//! signature frames, gallery-wrap canvases with mirrored borders, and
//! multi-opening collages with bring-your-own placeholders.
//!
//! # Module Structure
//!
//! - `config` - Print constants and the tunable [`PrintConfig`]
//! - `dimensions` - Physical layout calculators (inches)
//! - `decode` - Async image sources and decoding
//! - `surface` - Private raster surfaces with clipped drawing
//! - `fit` - Cover-fit placement
//! - `compose` - The print-file generators
//! - `encode` - JPEG encoding and JFIF density patching
//! - `resolution` - Source resolution checks against the print density

pub mod compose;
pub mod config;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod error;
pub mod fit;
pub mod resolution;
pub mod surface;

pub use compose::{
    generate_canvas_print_file, generate_collage_print_file, generate_print_file,
    generate_signature_print_file, CollagePrintResult, PrintFileResult,
};
pub use config::{FilterType, PrintConfig, PRINT_DPI};
pub use decode::{BytesSource, ImageLoadError, ImageSource};
pub use dimensions::{
    calculate_canvas_dimensions, calculate_print_dimensions, calculate_signature_dimensions,
    CanvasPrintDimensions, CollagePhoto, CollagePrintConfig, CollagePrintOpening, MatBorders,
    MatType, PrintDimensions,
};
pub use encode::patch_density;
pub use error::{CompositeError, PRINT_FILE_FAILURE_MESSAGE};
pub use resolution::{check_resolution, ResolutionCheck};
