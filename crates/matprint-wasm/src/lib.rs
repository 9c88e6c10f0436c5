//! Matprint WASM - WebAssembly bindings for Matprint
//!
//! This crate exposes the matprint-core print-file generators and layout
//! calculators to JavaScript/TypeScript storefront code.
//!
//! # Module Structure
//!
//! - `dimensions` - Layout calculators (print, signature, canvas)
//! - `compose` - Async print-file generators fetching photos by URL
//! - `resolution` - Resolution check and JPEG density patch
//! - `source` - Browser `fetch` image source
//! - `types` - WASM-compatible wrapper types for results and inputs
//!
//! # Usage
//!
//! ```typescript
//! import init, { calculate_canvas_dimensions, generate_canvas_print_file } from '@matprint/wasm';
//!
//! await init();
//!
//! const file = await generate_canvas_print_file(photoUrl, 16, 20);
//! console.log(`${file.filename}: ${file.paper_width_px}x${file.paper_height_px}`);
//! ```

use wasm_bindgen::prelude::*;

mod compose;
mod dimensions;
mod resolution;
mod source;
mod types;

// Re-export public types
pub use compose::{
    generate_canvas_print_file, generate_collage_print_file, generate_print_file,
    generate_signature_print_file,
};
pub use dimensions::{
    calculate_canvas_dimensions, calculate_print_dimensions, calculate_signature_dimensions,
};
pub use resolution::{check_resolution, patch_jpeg_density};
pub use source::FetchSource;
pub use types::{JsCollageLayout, JsCollagePhoto, JsCollagePrintFile, JsPrintFile};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Print density every generator targets by default.
#[wasm_bindgen]
pub fn print_dpi() -> u16 {
    matprint_core::PRINT_DPI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_print_dpi() {
        assert_eq!(print_dpi(), 300);
    }
}
