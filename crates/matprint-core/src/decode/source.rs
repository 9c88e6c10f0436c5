//! Opaque, asynchronously fetchable photo locators.

use std::future::Future;

use super::{ImageLoadError, LoadFailure};

/// Something a photograph can be fetched from.
///
/// The compositors never inspect the locator; they only await its bytes.
/// Implementations exist for in-memory bytes, local files and (in the WASM
/// bindings) browser `fetch`.
pub trait ImageSource {
    /// Identifier reported in errors and logs (a URL, path or label).
    fn id(&self) -> &str;

    /// Fetch the encoded image bytes.
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, ImageLoadError>>;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, ImageLoadError>> {
        (**self).fetch()
    }
}

/// Encoded image bytes already in memory.
#[derive(Debug, Clone)]
pub struct BytesSource {
    id: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            bytes,
        }
    }
}

impl ImageSource for BytesSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<Vec<u8>, ImageLoadError> {
        Ok(self.bytes.clone())
    }
}

/// An image file on the local filesystem, read with `tokio::fs`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSource {
    path: std::path::PathBuf,
    id: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let id = path.display().to_string();
        Self { path, id }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ImageSource for FileSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<Vec<u8>, ImageLoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| ImageLoadError::new(&self.id, LoadFailure::Io(e.to_string())))
    }
}
