//! Photo loading for the compositors.
//!
//! This module provides:
//! - The [`ImageSource`] abstraction over fetchable photo locators
//! - Decoding of JPEG/PNG/WebP bytes with EXIF orientation correction
//!
//! # Architecture
//!
//! Fetching is asynchronous (network or disk); decoding and everything after
//! it is synchronous and owned by a single compositing call.
//!
//! # Examples
//!
//! ```ignore
//! use matprint_core::decode::{load_image, BytesSource};
//!
//! let source = BytesSource::new("upload", std::fs::read("photo.jpg")?);
//! let photo = load_image(&source).await?;
//! println!("Loaded {}x{}", photo.width(), photo.height());
//! ```

mod loader;
mod source;
mod types;

pub use loader::{decode_image, load_image};
#[cfg(not(target_arch = "wasm32"))]
pub use source::FileSource;
pub use source::{BytesSource, ImageSource};
pub use types::{ImageLoadError, LoadFailure, LoadedImage, Orientation};
