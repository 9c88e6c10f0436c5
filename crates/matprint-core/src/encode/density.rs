//! JFIF density patching.
//!
//! Print shops read the JFIF density fields to decide the physical size of a
//! file, so a 300 ppi composite must say 300 ppi. The encoder only writes a
//! placeholder, which this module rewrites in place.
//!
//! # JFIF APP0 payload layout
//!
//! ```text
//! offset  size  field
//!  0      5     identifier "JFIF\0"
//!  5      2     version
//!  7      1     density units (0 = aspect ratio, 1 = per inch, 2 = per cm)
//!  8      2     horizontal density, big-endian
//! 10      2     vertical density, big-endian
//! 12      2     thumbnail width/height
//! ```

use std::ops::Range;

use thiserror::Error;
use tracing::{debug, warn};

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const JFIF_ID: &[u8; 4] = b"JFIF";

const UNITS_OFFSET: usize = 7;
const X_DENSITY_OFFSET: usize = 8;
const Y_DENSITY_OFFSET: usize = 10;
const MIN_JFIF_PAYLOAD: usize = 12;

/// Why the density patch was not applied.
///
/// Not an error for the pipeline: the file is still returned, just without
/// print-grade density metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetadataPatchSkipped {
    /// The bytes do not start with a JPEG start-of-image marker.
    #[error("not a JPEG stream (missing SOI marker)")]
    NotJpeg,

    /// No JFIF APP0 segment appears before the image data.
    #[error("no JFIF APP0 segment found")]
    NoJfifSegment,
}

/// Unit of the JFIF density fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityUnit {
    /// Densities only express the pixel aspect ratio.
    AspectRatio,
    PerInch,
    PerCentimeter,
    Unknown(u8),
}

impl From<u8> for DensityUnit {
    fn from(value: u8) -> Self {
        match value {
            0 => DensityUnit::AspectRatio,
            1 => DensityUnit::PerInch,
            2 => DensityUnit::PerCentimeter,
            other => DensityUnit::Unknown(other),
        }
    }
}

/// Density recorded in a JFIF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub unit: DensityUnit,
    pub x: u16,
    pub y: u16,
}

/// One marker segment of a JPEG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    marker: u8,
    /// Payload range, excluding the marker and the length field.
    payload: Range<usize>,
}

/// Walks marker segments from SOI up to the start of scan.
///
/// Stops silently on malformed or truncated input.
struct SegmentWalker<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SegmentWalker<'a> {
    fn new(bytes: &'a [u8]) -> Result<Self, MetadataPatchSkipped> {
        if bytes.len() < 2 || bytes[..2] != SOI {
            return Err(MetadataPatchSkipped::NotJpeg);
        }
        Ok(Self { bytes, pos: 2 })
    }

    fn stop(&mut self) -> Option<Segment> {
        self.pos = self.bytes.len();
        None
    }
}

impl Iterator for SegmentWalker<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let bytes = self.bytes;
        if self.pos >= bytes.len() || bytes[self.pos] != 0xFF {
            return self.stop();
        }

        // Markers may be preceded by any number of 0xFF fill bytes.
        while self.pos < bytes.len() && bytes[self.pos] == 0xFF {
            self.pos += 1;
        }
        let Some(&marker) = bytes.get(self.pos) else {
            return self.stop();
        };
        self.pos += 1;

        match marker {
            SOS | EOI => self.stop(),
            0x01 | 0xD0..=0xD7 => Some(Segment {
                marker,
                payload: self.pos..self.pos,
            }),
            _ => {
                let Some(len_bytes) = bytes.get(self.pos..self.pos + 2) else {
                    return self.stop();
                };
                let length = usize::from(u16::from_be_bytes([len_bytes[0], len_bytes[1]]));
                if length < 2 || self.pos + length > bytes.len() {
                    return self.stop();
                }
                let payload = self.pos + 2..self.pos + length;
                self.pos += length;
                Some(Segment { marker, payload })
            }
        }
    }
}

/// Locate the payload of the JFIF APP0 segment.
fn find_jfif_payload(bytes: &[u8]) -> Result<Range<usize>, MetadataPatchSkipped> {
    SegmentWalker::new(bytes)?
        .find(|seg| {
            seg.marker == APP0
                && seg.payload.len() >= MIN_JFIF_PAYLOAD
                && bytes[seg.payload.start..seg.payload.start + 4] == JFIF_ID[..]
        })
        .map(|seg| seg.payload)
        .ok_or(MetadataPatchSkipped::NoJfifSegment)
}

/// Read the density from a JPEG's JFIF header, if present.
pub fn read_density(bytes: &[u8]) -> Option<Density> {
    let payload = find_jfif_payload(bytes).ok()?;
    let at = |offset: usize| payload.start + offset;
    Some(Density {
        unit: DensityUnit::from(bytes[at(UNITS_OFFSET)]),
        x: u16::from_be_bytes([bytes[at(X_DENSITY_OFFSET)], bytes[at(X_DENSITY_OFFSET) + 1]]),
        y: u16::from_be_bytes([bytes[at(Y_DENSITY_OFFSET)], bytes[at(Y_DENSITY_OFFSET) + 1]]),
    })
}

/// Rewrite the JFIF density to `dpi` dots per inch on both axes, in place.
pub fn try_patch_density(bytes: &mut [u8], dpi: u16) -> Result<(), MetadataPatchSkipped> {
    let payload = find_jfif_payload(bytes)?;
    let start = payload.start;
    let dpi_be = dpi.to_be_bytes();

    bytes[start + UNITS_OFFSET] = 1;
    bytes[start + X_DENSITY_OFFSET..start + X_DENSITY_OFFSET + 2].copy_from_slice(&dpi_be);
    bytes[start + Y_DENSITY_OFFSET..start + Y_DENSITY_OFFSET + 2].copy_from_slice(&dpi_be);
    Ok(())
}

/// Patch in place and log when the patch has to be skipped.
///
/// Returns whether the density was written.
pub(crate) fn apply_density_patch(bytes: &mut [u8], dpi: u16) -> bool {
    match try_patch_density(bytes, dpi) {
        Ok(()) => {
            debug!(dpi, "patched JFIF density");
            true
        }
        Err(reason) => {
            warn!(%reason, "density patch skipped; returning file unmodified");
            false
        }
    }
}

/// Return `bytes` with the JFIF density set to `dpi`.
///
/// Files without a JFIF segment are returned unmodified: missing metadata
/// degrades print sizing but never fails the pipeline.
pub fn patch_density(mut bytes: Vec<u8>, dpi: u16) -> Vec<u8> {
    apply_density_patch(&mut bytes, dpi);
    bytes
}
