//! Crop geometry for one zoom step.
//!
//! A zoom by `factor` keeps the central `1 / factor` of the source plus a
//! four-pixel margin, so the diffuser has neighbours to bleed glow from at
//! the crop edges. The crop never exceeds the window, and is centered on
//! the source with integer division.

use matrixrain_common::error::{MatrixRainError, MatrixRainResult};

/// Extra source pixels kept around the zoomed region.
pub const CROP_MARGIN: usize = 4;

/// A rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub start_col: usize,
    pub start_row: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    /// Compute the centered crop for `factor`.
    ///
    /// The size is clamped to the window and to the source, so the
    /// rectangle always lies inside the source bitmap.
    pub fn centered(
        source_width: usize,
        source_height: usize,
        window_width: usize,
        window_height: usize,
        factor: f64,
    ) -> MatrixRainResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MatrixRainError::invalid_factor(factor));
        }

        let width = crop_extent(source_width, window_width, factor);
        let height = crop_extent(source_height, window_height, factor);

        Ok(Self {
            start_col: (source_width - width) / 2,
            start_row: (source_height - height) / 2,
            width,
            height,
        })
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.start_col + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.start_row + self.height
    }
}

fn crop_extent(source: usize, window: usize, factor: f64) -> usize {
    // `as` saturates, so tiny factors land on usize::MAX before the margin
    let zoomed = ((source as f64 / factor).floor() as usize).saturating_add(CROP_MARGIN);
    zoomed.min(window).min(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_factor_is_clamped_to_window() {
        let rect = CropRect::centered(640, 480, 640, 480, 1.0).unwrap();
        assert_eq!(rect.width, 640);
        assert_eq!(rect.height, 480);
        assert_eq!((rect.start_col, rect.start_row), (0, 0));
    }

    #[test]
    fn test_zoomed_crop_is_centered() {
        // 640 / 2.0 + 4 = 324, 480 / 2.0 + 4 = 244
        let rect = CropRect::centered(640, 480, 640, 480, 2.0).unwrap();
        assert_eq!((rect.width, rect.height), (324, 244));
        assert_eq!((rect.start_col, rect.start_row), (158, 118));
    }

    #[test]
    fn test_fractional_factor_floors() {
        // 100 / 1.05 = 95.238.. -> 95 + 4 = 99
        let rect = CropRect::centered(100, 100, 200, 200, 1.05).unwrap();
        assert_eq!(rect.width, 99);
        assert_eq!(rect.start_col, 0);
    }

    #[test]
    fn test_small_window_caps_crop() {
        let rect = CropRect::centered(800, 600, 300, 200, 1.5).unwrap();
        assert_eq!((rect.width, rect.height), (300, 200));
        assert_eq!((rect.start_col, rect.start_row), (250, 200));
    }

    #[test]
    fn test_non_positive_factor_rejected() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CropRect::centered(10, 10, 10, 10, factor).unwrap_err();
            assert!(matches!(err, MatrixRainError::InvalidFactor { .. }));
        }
    }

    #[test]
    fn test_tiny_positive_factor_clamps_to_window() {
        for factor in [1e-300, f64::MIN_POSITIVE, 1e-3] {
            let rect = CropRect::centered(640, 480, 320, 240, factor).unwrap();
            assert_eq!((rect.width, rect.height), (320, 240));
            assert_eq!((rect.start_col, rect.start_row), (160, 120));
        }
    }

    proptest! {
        #[test]
        fn crop_stays_inside_window_and_source(
            source_w in 1usize..2000,
            source_h in 1usize..2000,
            window_w in 1usize..2000,
            window_h in 1usize..2000,
            factor in 1.0f64..12.0,
        ) {
            let rect = CropRect::centered(source_w, source_h, window_w, window_h, factor).unwrap();
            prop_assert!(rect.width <= window_w && rect.height <= window_h);
            prop_assert!(rect.right() <= source_w && rect.bottom() <= source_h);
            prop_assert!(rect.width >= 1 && rect.height >= 1);
        }
    }
}
