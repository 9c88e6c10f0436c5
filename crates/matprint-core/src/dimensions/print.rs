//! Single-opening print layout (matted, unmatted and signature frames).

use serde::{Deserialize, Serialize};

use crate::config::SIGNATURE_PADDING_INCHES;

/// Mat configuration of a framed print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatType {
    /// Print fills the frame interior.
    #[default]
    None,
    /// One mat board.
    Single,
    /// Two stacked mat boards. Same paper math as a single mat.
    Double,
}

impl MatType {
    /// Whether a mat overlays the print edge.
    #[inline]
    pub fn has_mat(self) -> bool {
        !matches!(self, MatType::None)
    }
}

/// Mat border widths around the opening (inches).
///
/// The four sides are independent so bottom-weighted mats and plaque
/// clearance zones can be expressed directly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatBorders {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl MatBorders {
    /// Same width on every side.
    pub fn uniform(width: f64) -> Self {
        Self {
            top: width,
            bottom: width,
            left: width,
            right: width,
        }
    }

    /// Uniform border with extra width added to the bottom.
    pub fn bottom_weighted(width: f64, extra_bottom: f64) -> Self {
        Self {
            bottom: width + extra_bottom,
            ..Self::uniform(width)
        }
    }

    /// Add a plaque clearance zone below the opening.
    pub fn with_plaque_clearance(self, clearance: f64) -> Self {
        Self {
            bottom: self.bottom + clearance,
            ..self
        }
    }

    /// Total horizontal border (left + right).
    #[inline]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical border (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Physical layout of a single-opening print (inches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintDimensions {
    /// Sheet width, equal to the frame interior (rabbet) width.
    pub paper_width: f64,
    /// Sheet height, equal to the frame interior (rabbet) height.
    pub paper_height: f64,
    /// Visible artwork width.
    pub mat_opening_width: f64,
    /// Visible artwork height.
    pub mat_opening_height: f64,
    pub border_top: f64,
    pub border_bottom: f64,
    pub border_left: f64,
    pub border_right: f64,
}

impl PrintDimensions {
    /// Whether any border surrounds the opening.
    pub fn has_borders(&self) -> bool {
        self.border_top > 0.0
            || self.border_bottom > 0.0
            || self.border_left > 0.0
            || self.border_right > 0.0
    }
}

/// Compute the paper layout for an artwork size and mat configuration.
///
/// With [`MatType::None`] the paper is exactly the artwork size and the
/// borders are ignored. Otherwise the paper is the artwork plus the borders
/// on all four sides.
///
/// # Example
///
/// ```ignore
/// let dims = calculate_print_dimensions(8.0, 10.0, MatType::Single, MatBorders::uniform(2.0));
/// assert_eq!((dims.paper_width, dims.paper_height), (12.0, 14.0));
/// ```
pub fn calculate_print_dimensions(
    artwork_width: f64,
    artwork_height: f64,
    mat_type: MatType,
    borders: MatBorders,
) -> PrintDimensions {
    if !mat_type.has_mat() {
        return PrintDimensions {
            paper_width: artwork_width,
            paper_height: artwork_height,
            mat_opening_width: artwork_width,
            mat_opening_height: artwork_height,
            border_top: 0.0,
            border_bottom: 0.0,
            border_left: 0.0,
            border_right: 0.0,
        };
    }

    PrintDimensions {
        paper_width: artwork_width + borders.left + borders.right,
        paper_height: artwork_height + borders.top + borders.bottom,
        mat_opening_width: artwork_width,
        mat_opening_height: artwork_height,
        border_top: borders.top,
        border_bottom: borders.bottom,
        border_left: borders.left,
        border_right: borders.right,
    }
}

/// Layout for a signature frame: the opening plus 1in on every edge.
pub fn calculate_signature_dimensions(opening_width: f64, opening_height: f64) -> PrintDimensions {
    let pad = SIGNATURE_PADDING_INCHES;
    PrintDimensions {
        paper_width: opening_width + 2.0 * pad,
        paper_height: opening_height + 2.0 * pad,
        mat_opening_width: opening_width,
        mat_opening_height: opening_height,
        border_top: pad,
        border_bottom: pad,
        border_left: pad,
        border_right: pad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mat_paper_equals_artwork() {
        let dims = calculate_print_dimensions(8.0, 10.0, MatType::None, MatBorders::uniform(2.0));
        assert_eq!(dims.paper_width, 8.0);
        assert_eq!(dims.paper_height, 10.0);
        assert!(!dims.has_borders());
    }

    #[test]
    fn test_single_mat_uniform() {
        let dims = calculate_print_dimensions(8.0, 10.0, MatType::Single, MatBorders::uniform(2.0));
        assert_eq!(dims.paper_width, 12.0);
        assert_eq!(dims.paper_height, 14.0);
        assert_eq!(dims.mat_opening_width, 8.0);
        assert_eq!(dims.border_left, 2.0);
    }

    #[test]
    fn test_double_mat_matches_single() {
        let borders = MatBorders::uniform(2.5);
        let single = calculate_print_dimensions(5.0, 7.0, MatType::Single, borders);
        let double = calculate_print_dimensions(5.0, 7.0, MatType::Double, borders);
        assert_eq!(single, double);
    }

    #[test]
    fn test_bottom_weighted_mat() {
        let borders = MatBorders::bottom_weighted(2.0, 0.5);
        let dims = calculate_print_dimensions(8.0, 10.0, MatType::Single, borders);
        assert_eq!(dims.border_top, 2.0);
        assert_eq!(dims.border_bottom, 2.5);
        assert_eq!(dims.paper_height, 14.5);
        assert_eq!(dims.paper_width, 12.0);
    }

    #[test]
    fn test_plaque_clearance() {
        let borders = MatBorders::uniform(2.0).with_plaque_clearance(1.25);
        assert_eq!(borders.bottom, 3.25);
        assert_eq!(borders.top, 2.0);
        assert_eq!(borders.vertical(), 5.25);
        assert_eq!(borders.horizontal(), 4.0);
    }

    #[test]
    fn test_signature_dimensions() {
        let dims = calculate_signature_dimensions(4.0, 6.0);
        assert_eq!(dims.paper_width, 6.0);
        assert_eq!(dims.paper_height, 8.0);
        assert_eq!(dims.border_top, 1.0);
        assert_eq!(dims.border_right, 1.0);
        assert_eq!(dims.mat_opening_height, 6.0);
    }

    #[test]
    fn test_mat_type_has_mat() {
        assert!(!MatType::None.has_mat());
        assert!(MatType::Single.has_mat());
        assert!(MatType::Double.has_mat());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn size_strategy() -> impl Strategy<Value = f64> {
        0.5f64..60.0
    }

    fn border_strategy() -> impl Strategy<Value = f64> {
        0.0f64..6.0
    }

    fn mat_strategy() -> impl Strategy<Value = MatType> {
        prop_oneof![Just(MatType::Single), Just(MatType::Double)]
    }

    proptest! {
        /// Property: without a mat the paper is exactly the artwork.
        #[test]
        fn prop_no_mat_paper_equals_artwork(
            w in size_strategy(),
            h in size_strategy(),
            b in border_strategy(),
        ) {
            let dims = calculate_print_dimensions(w, h, MatType::None, MatBorders::uniform(b));
            prop_assert_eq!(dims.paper_width, w);
            prop_assert_eq!(dims.paper_height, h);
        }

        /// Property: paper equals opening plus borders on each axis.
        #[test]
        fn prop_paper_is_opening_plus_borders(
            w in size_strategy(),
            h in size_strategy(),
            top in border_strategy(),
            bottom in border_strategy(),
            left in border_strategy(),
            right in border_strategy(),
            mat in mat_strategy(),
        ) {
            let borders = MatBorders { top, bottom, left, right };
            let dims = calculate_print_dimensions(w, h, mat, borders);

            let width_sum = dims.mat_opening_width + dims.border_left + dims.border_right;
            let height_sum = dims.mat_opening_height + dims.border_top + dims.border_bottom;
            prop_assert!((dims.paper_width - width_sum).abs() < 1e-9);
            prop_assert!((dims.paper_height - height_sum).abs() < 1e-9);
        }

        /// Property: identical inputs give bit-identical outputs.
        #[test]
        fn prop_calculator_is_idempotent(
            w in size_strategy(),
            h in size_strategy(),
            b in border_strategy(),
            extra in border_strategy(),
            mat in mat_strategy(),
        ) {
            let borders = MatBorders::bottom_weighted(b, extra);
            let first = calculate_print_dimensions(w, h, mat, borders);
            let second = calculate_print_dimensions(w, h, mat, borders);
            prop_assert_eq!(first, second);

            let sig_first = calculate_signature_dimensions(w, h);
            let sig_second = calculate_signature_dimensions(w, h);
            prop_assert_eq!(sig_first, sig_second);
        }

        /// Property: signature paper is always the opening plus 2in.
        #[test]
        fn prop_signature_adds_two_inches(w in size_strategy(), h in size_strategy()) {
            let dims = calculate_signature_dimensions(w, h);
            prop_assert_eq!(dims.paper_width, w + 2.0);
            prop_assert_eq!(dims.paper_height, h + 2.0);
        }
    }
}
