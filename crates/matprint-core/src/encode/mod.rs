//! Print file encoding.
//!
//! This module provides:
//! - JPEG encoding of composited surfaces
//! - The JFIF density patch applied to every print file
//!
//! The density patch only touches bytes through [`patch_density`], so the
//! encoder backend can change without touching the compositors.
//!
//! # Examples
//!
//! ```ignore
//! use matprint_core::encode::{encode_jpeg, patch_density, read_density};
//!
//! let jpeg = patch_density(encode_jpeg(&surface, 95)?, 300);
//! assert_eq!(read_density(&jpeg).map(|d| d.x), Some(300));
//! ```

mod density;
mod jpeg;

pub(crate) use density::apply_density_patch;
pub use density::{
    patch_density, read_density, try_patch_density, Density, DensityUnit, MetadataPatchSkipped,
};
pub use jpeg::{encode_jpeg, EncodeError};
