//! Multi-opening collage layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One rectangular mat opening, relative to the frame interior top-left (inches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollagePrintOpening {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CollagePrintOpening {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Openings with a non-positive (or NaN) extent cannot be drawn.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Label printed inside placeholders, e.g. `5 x 7 in`.
    pub fn size_label(&self) -> String {
        format!(
            "{} x {} in",
            format_inches(self.width),
            format_inches(self.height)
        )
    }
}

/// What the customer assigned to a collage opening.
#[derive(Debug, Clone, PartialEq)]
pub enum CollagePhoto<S> {
    /// A photo to fetch and print.
    Source(S),
    /// The customer mounts their own photo; print a placeholder.
    BringYourOwn,
}

/// A collage frame: openings, photo assignments and frame geometry.
///
/// `S` is the photo locator type, usually an [`ImageSource`](crate::decode::ImageSource).
#[derive(Debug, Clone)]
pub struct CollagePrintConfig<S> {
    /// Openings in drawing order.
    pub openings: Vec<CollagePrintOpening>,
    /// Photo per opening index. Openings without an entry get a placeholder.
    pub photos: BTreeMap<usize, CollagePhoto<S>>,
    /// Outside frame width (inches).
    pub frame_width: f64,
    /// Outside frame height (inches).
    pub frame_height: f64,
    /// Molding face width (inches).
    pub molding_width: f64,
}

impl<S> CollagePrintConfig<S> {
    pub fn new(
        frame_width: f64,
        frame_height: f64,
        molding_width: f64,
        openings: Vec<CollagePrintOpening>,
    ) -> Self {
        Self {
            openings,
            photos: BTreeMap::new(),
            frame_width,
            frame_height,
            molding_width,
        }
    }

    /// Assign a photo (or a bring-your-own marker) to an opening index.
    pub fn with_photo(mut self, index: usize, photo: CollagePhoto<S>) -> Self {
        self.photos.insert(index, photo);
        self
    }

    /// Frame interior (paper) size: frame minus molding on both sides.
    pub fn interior_size(&self) -> (f64, f64) {
        (
            self.frame_width - 2.0 * self.molding_width,
            self.frame_height - 2.0 * self.molding_width,
        )
    }
}

/// Format an inch value without trailing zeros (`5`, `8.5`, `11.25`).
pub(crate) fn format_inches(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}
