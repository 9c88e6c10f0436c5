//! Browser `fetch` image source.

use js_sys::Uint8Array;
use matprint_core::decode::{ImageLoadError, ImageSource, LoadFailure};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// A photo fetched by URL through the window's `fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSource {
    url: String,
}

impl FetchSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn failure(&self, message: impl Into<String>) -> ImageLoadError {
        ImageLoadError::new(&self.url, LoadFailure::Fetch(message.into()))
    }
}

/// Best-effort description of a rejected promise.
fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

impl ImageSource for FetchSource {
    fn id(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<u8>, ImageLoadError> {
        let window = web_sys::window().ok_or_else(|| self.failure("no window available"))?;

        let response = JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(|e| self.failure(describe_js_error(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| self.failure("fetch did not return a Response"))?;

        if !response.ok() {
            return Err(self.failure(format!("HTTP {}", response.status())));
        }

        let buffer = response
            .array_buffer()
            .map_err(|e| self.failure(describe_js_error(&e)))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| self.failure(describe_js_error(&e)))?;

        Ok(Uint8Array::new(&buffer).to_vec())
    }
}
