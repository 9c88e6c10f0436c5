//! Layout calculator WASM bindings.
//!
//! Results are returned as plain JavaScript objects with snake_case keys,
//! matching the core structs field for field.
//!
//! # Example
//!
//! ```typescript
//! import { calculate_print_dimensions } from '@matprint/wasm';
//!
//! const dims = calculate_print_dimensions(8, 10, 'single', { top: 2, bottom: 2.5, left: 2, right: 2 });
//! console.log(`${dims.paper_width} x ${dims.paper_height} in`);
//! ```

use matprint_core::dimensions::{self, MatBorders, MatType};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a mat type name (`none`, `single`, `double`).
pub(crate) fn parse_mat_type(name: &str) -> Result<MatType, JsValue> {
    match name.to_ascii_lowercase().as_str() {
        "none" => Ok(MatType::None),
        "single" => Ok(MatType::Single),
        "double" => Ok(MatType::Double),
        other => Err(JsValue::from_str(&format!("Unknown mat type: {}", other))),
    }
}

/// Compute paper size, opening and borders for a framed print.
///
/// `borders` is `{ top, bottom, left, right }` in inches and is ignored when
/// `mat_type` is `none`.
#[wasm_bindgen]
pub fn calculate_print_dimensions(
    artwork_width: f64,
    artwork_height: f64,
    mat_type: &str,
    borders: JsValue,
) -> Result<JsValue, JsValue> {
    let mat_type = parse_mat_type(mat_type)?;
    let borders: MatBorders = if borders.is_undefined() || borders.is_null() {
        MatBorders::default()
    } else {
        serde_wasm_bindgen::from_value(borders)
            .map_err(|e| JsValue::from_str(&format!("Invalid mat borders: {}", e)))?
    };
    to_js(&dimensions::calculate_print_dimensions(
        artwork_width,
        artwork_height,
        mat_type,
        borders,
    ))
}

/// Compute the layout for a signature frame opening.
#[wasm_bindgen]
pub fn calculate_signature_dimensions(
    opening_width: f64,
    opening_height: f64,
) -> Result<JsValue, JsValue> {
    to_js(&dimensions::calculate_signature_dimensions(
        opening_width,
        opening_height,
    ))
}

/// Compute the gallery-wrap layout for a canvas image size.
#[wasm_bindgen]
pub fn calculate_canvas_dimensions(user_width: f64, user_height: f64) -> Result<JsValue, JsValue> {
    to_js(&dimensions::calculate_canvas_dimensions(
        user_width,
        user_height,
    ))
}
