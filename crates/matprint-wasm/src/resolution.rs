//! Resolution check and JPEG density WASM bindings.

use matprint_core::{encode, resolution};
use wasm_bindgen::prelude::*;

/// Check whether a source image has enough pixels for a print area.
///
/// Returns `{ current_dpi_x, current_dpi_y, current_dpi, required_scale,
/// recommended_upscale, sufficient }`.
#[wasm_bindgen]
pub fn check_resolution(
    width_px: u32,
    height_px: u32,
    target_width_in: f64,
    target_height_in: f64,
) -> Result<JsValue, JsValue> {
    let check = resolution::check_resolution(width_px, height_px, target_width_in, target_height_in);
    serde_wasm_bindgen::to_value(&check).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rewrite the JFIF density of a JPEG to `dpi`.
///
/// Bytes without a JFIF header are returned unchanged.
#[wasm_bindgen]
pub fn patch_jpeg_density(bytes: Vec<u8>, dpi: u16) -> Vec<u8> {
    encode::patch_density(bytes, dpi)
}
