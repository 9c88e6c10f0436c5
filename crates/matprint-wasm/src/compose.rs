//! Print-file generator WASM bindings.
//!
//! Each generator returns a `Promise`. Photos are fetched by URL inside the
//! call, so several generators may be awaited concurrently from JavaScript.
//! On failure the promise rejects with the generic customer-facing message
//! and the detailed error is written to the browser console.
//!
//! # Example
//!
//! ```typescript
//! import { calculate_print_dimensions, generate_print_file } from '@matprint/wasm';
//!
//! const dims = calculate_print_dimensions(8, 10, 'single', { top: 2, bottom: 2, left: 2, right: 2 });
//! const file = await generate_print_file(photoUrl, dims);
//! upload(file.filename, file.bytes());
//! ```

use matprint_core::compose;
use matprint_core::dimensions::PrintDimensions;
use matprint_core::CompositeError;
use wasm_bindgen::prelude::*;

use crate::source::FetchSource;
use crate::types::{print_config_from_js, JsCollageLayout, JsCollagePrintFile, JsPrintFile};

/// Log the detailed error and reject with the customer-facing message.
fn reject(context: &str, err: CompositeError) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&format!("{}: {}", context, err)));
    JsValue::from_str(err.user_message())
}

/// Generate a matted or full-bleed print file.
///
/// `dimensions` is the object returned by `calculate_print_dimensions`.
/// `config` optionally overrides print settings (`dpi`, `bleed_inches`, ...).
#[wasm_bindgen]
pub async fn generate_print_file(
    image_url: String,
    dimensions: JsValue,
    config: JsValue,
) -> Result<JsPrintFile, JsValue> {
    let dims: PrintDimensions = serde_wasm_bindgen::from_value(dimensions)
        .map_err(|e| JsValue::from_str(&format!("Invalid print dimensions: {}", e)))?;
    let config = print_config_from_js(config)?;
    let source = FetchSource::new(image_url);

    compose::generate_print_file(&source, &dims, &config)
        .await
        .map(JsPrintFile::from)
        .map_err(|e| reject("print file", e))
}

/// Generate a signature frame print file.
#[wasm_bindgen]
pub async fn generate_signature_print_file(
    image_url: String,
    opening_width: f64,
    opening_height: f64,
    config: JsValue,
) -> Result<JsPrintFile, JsValue> {
    let config = print_config_from_js(config)?;
    let source = FetchSource::new(image_url);

    compose::generate_signature_print_file(&source, opening_width, opening_height, &config)
        .await
        .map(JsPrintFile::from)
        .map_err(|e| reject("signature print file", e))
}

/// Generate a gallery-wrap canvas print file.
#[wasm_bindgen]
pub async fn generate_canvas_print_file(
    image_url: String,
    user_width: f64,
    user_height: f64,
    config: JsValue,
) -> Result<JsPrintFile, JsValue> {
    let config = print_config_from_js(config)?;
    let source = FetchSource::new(image_url);

    compose::generate_canvas_print_file(&source, user_width, user_height, &config)
        .await
        .map(JsPrintFile::from)
        .map_err(|e| reject("canvas print file", e))
}

/// Generate a collage print file.
///
/// `layout` is `{ frame_width, frame_height, molding_width, openings, photos }`
/// where each photo is `{ kind: 'url', index, url }` or
/// `{ kind: 'bring_your_own', index }`.
#[wasm_bindgen]
pub async fn generate_collage_print_file(
    layout: JsValue,
    config: JsValue,
) -> Result<JsCollagePrintFile, JsValue> {
    let layout: JsCollageLayout = serde_wasm_bindgen::from_value(layout)
        .map_err(|e| JsValue::from_str(&format!("Invalid collage layout: {}", e)))?;
    let config = print_config_from_js(config)?;
    let collage = layout.into_config();

    compose::generate_collage_print_file(&collage, &config)
        .await
        .map(JsCollagePrintFile::from)
        .map_err(|e| reject("collage print file", e))
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use matprint_core::dimensions::{CollagePrintOpening, MatBorders, MatType};
    use matprint_core::PRINT_FILE_FAILURE_MESSAGE;
    use wasm_bindgen_test::*;

    use crate::types::JsCollagePhoto;

    wasm_bindgen_test_configure!(run_in_browser);

    const MISSING: &str = "http://127.0.0.1:9/missing.jpg";

    #[wasm_bindgen_test]
    async fn test_unreachable_photo_rejects_with_generic_message() {
        let dims = matprint_core::calculate_print_dimensions(
            4.0,
            6.0,
            MatType::Single,
            MatBorders::uniform(1.0),
        );
        let dims = serde_wasm_bindgen::to_value(&dims).unwrap();
        let err = generate_print_file(MISSING.to_string(), dims, JsValue::UNDEFINED)
            .await
            .err()
            .unwrap();
        assert_eq!(err.as_string().as_deref(), Some(PRINT_FILE_FAILURE_MESSAGE));
    }

    #[wasm_bindgen_test]
    async fn test_collage_of_placeholders_needs_no_network() {
        let layout = JsCollageLayout {
            frame_width: 8.0,
            frame_height: 6.0,
            molding_width: 1.0,
            openings: vec![
                CollagePrintOpening::new(0.5, 0.5, 2.0, 3.0),
                CollagePrintOpening::new(3.5, 0.5, 2.0, 3.0),
            ],
            photos: vec![
                JsCollagePhoto::BringYourOwn { index: 0 },
                JsCollagePhoto::Url {
                    index: 1,
                    url: MISSING.to_string(),
                },
            ],
        };
        #[derive(serde::Serialize)]
        struct LowDpi {
            dpi: u16,
        }
        let layout = serde_wasm_bindgen::to_value(&layout).unwrap();
        let config = serde_wasm_bindgen::to_value(&LowDpi { dpi: 30 }).unwrap();

        let result = generate_collage_print_file(layout, config).await.unwrap();
        assert_eq!(result.print_count(), 0);
        assert_eq!(result.byo_count(), 2);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.file().paper_width_px(), 180);
    }

    #[wasm_bindgen_test]
    async fn test_small_canvas_rejects() {
        let err = generate_canvas_print_file(MISSING.to_string(), 1.0, 1.0, JsValue::UNDEFINED)
            .await
            .err()
            .unwrap();
        assert_eq!(err.as_string().as_deref(), Some(PRINT_FILE_FAILURE_MESSAGE));
    }
}
