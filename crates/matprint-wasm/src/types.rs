//! WASM-compatible wrapper types for print files and inputs.
//!
//! Results are exposed as classes with getters so the JPEG bytes stay in WASM
//! memory until JavaScript asks for them. Inputs arrive as plain objects and
//! are converted with serde_wasm_bindgen.

use matprint_core::compose::{CollagePrintResult, PrintFileResult};
use matprint_core::dimensions::{CollagePhoto, CollagePrintConfig, CollagePrintOpening};
use matprint_core::PrintConfig;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::source::FetchSource;

/// A generated print file.
#[wasm_bindgen]
pub struct JsPrintFile {
    inner: PrintFileResult,
}

#[wasm_bindgen]
impl JsPrintFile {
    /// JPEG bytes as a `Uint8Array` (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn paper_width_in(&self) -> f64 {
        self.inner.paper_width_in
    }

    #[wasm_bindgen(getter)]
    pub fn paper_height_in(&self) -> f64 {
        self.inner.paper_height_in
    }

    #[wasm_bindgen(getter)]
    pub fn paper_width_px(&self) -> u32 {
        self.inner.paper_width_px
    }

    #[wasm_bindgen(getter)]
    pub fn paper_height_px(&self) -> u32 {
        self.inner.paper_height_px
    }

    #[wasm_bindgen(getter)]
    pub fn image_width_in(&self) -> f64 {
        self.inner.image_width_in
    }

    #[wasm_bindgen(getter)]
    pub fn image_height_in(&self) -> f64 {
        self.inner.image_height_in
    }

    /// Whether the JPEG carries the print density in its JFIF header.
    #[wasm_bindgen(getter)]
    pub fn density_patched(&self) -> bool {
        self.inner.density_patched
    }
}

impl From<PrintFileResult> for JsPrintFile {
    fn from(inner: PrintFileResult) -> Self {
        Self { inner }
    }
}

/// A generated collage print file with its opening counts.
#[wasm_bindgen]
pub struct JsCollagePrintFile {
    file: PrintFileResult,
    print_count: usize,
    byo_count: usize,
    error_count: usize,
    skipped_count: usize,
}

#[wasm_bindgen]
impl JsCollagePrintFile {
    /// The print file itself. Copies the JPEG bytes.
    #[wasm_bindgen(getter)]
    pub fn file(&self) -> JsPrintFile {
        JsPrintFile::from(self.file.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn print_count(&self) -> usize {
        self.print_count
    }

    /// Placeholders drawn, including error placeholders.
    #[wasm_bindgen(getter)]
    pub fn byo_count(&self) -> usize {
        self.byo_count
    }

    /// Assigned photos that failed to load.
    #[wasm_bindgen(getter)]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[wasm_bindgen(getter)]
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }
}

impl From<CollagePrintResult> for JsCollagePrintFile {
    fn from(result: CollagePrintResult) -> Self {
        Self {
            file: result.file,
            print_count: result.print_count,
            byo_count: result.byo_count,
            error_count: result.error_count,
            skipped_count: result.skipped_count,
        }
    }
}

/// What JavaScript assigns to one collage opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JsCollagePhoto {
    /// Fetch and print the photo at `url`.
    Url { index: usize, url: String },
    /// Customer mounts their own photo.
    BringYourOwn { index: usize },
}

/// Collage layout as passed from TypeScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsCollageLayout {
    pub frame_width: f64,
    pub frame_height: f64,
    pub molding_width: f64,
    pub openings: Vec<CollagePrintOpening>,
    #[serde(default)]
    pub photos: Vec<JsCollagePhoto>,
}

impl JsCollageLayout {
    /// Build the core collage config, turning URLs into fetch sources.
    ///
    /// A later assignment to the same index replaces an earlier one.
    pub(crate) fn into_config(self) -> CollagePrintConfig<FetchSource> {
        self.photos.into_iter().fold(
            CollagePrintConfig::new(
                self.frame_width,
                self.frame_height,
                self.molding_width,
                self.openings,
            ),
            |config, photo| match photo {
                JsCollagePhoto::Url { index, url } => {
                    config.with_photo(index, CollagePhoto::Source(FetchSource::new(url)))
                }
                JsCollagePhoto::BringYourOwn { index } => {
                    config.with_photo(index, CollagePhoto::BringYourOwn)
                }
            },
        )
    }
}

/// Read an optional `PrintConfig` object. `undefined`/`null` mean defaults.
pub(crate) fn print_config_from_js(value: JsValue) -> Result<PrintConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(PrintConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid print config: {}", e)))
}
