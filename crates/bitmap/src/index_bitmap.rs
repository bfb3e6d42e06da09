//! Pixel-index bitmaps.
//!
//! Each cell holds an integer color or phosphor index rather than an RGB
//! value; palettes are applied by whoever draws the bitmap. Cells are
//! addressed as `(col, row)` with `(0, 0)` at the top-left.

use matrixrain_common::error::{MatrixRainError, MatrixRainResult};
use serde::{Deserialize, Serialize};

/// A rectangular grid of pixel indices, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBitmap {
    width: usize,
    height: usize,
    pixels: Vec<i32>,
}

impl IndexBitmap {
    /// Create a zero-filled bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    /// Create a bitmap with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<i32>) -> MatrixRainResult<Self> {
        if pixels.len() != width * height {
            return Err(MatrixRainError::configuration(format!(
                "pixel buffer holds {} cells, expected {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a bitmap from a row-major grid of equal-length rows.
    pub fn from_rows(rows: &[Vec<i32>]) -> MatrixRainResult<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(MatrixRainError::configuration(
                "bitmap rows must all have the same width",
            ));
        }
        Self::from_pixels(width, height, rows.concat())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major pixel storage.
    pub fn pixels(&self) -> &[i32] {
        &self.pixels
    }

    /// Replace the whole grid. The buffer must match the new dimensions.
    pub fn set_pixels(
        &mut self,
        width: usize,
        height: usize,
        pixels: Vec<i32>,
    ) -> MatrixRainResult<()> {
        *self = Self::from_pixels(width, height, pixels)?;
        Ok(())
    }

    /// Whether the bitmap has no cells.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel index at `(col, row)`, or `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<i32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.pixels[row * self.width + col])
    }

    /// Set the pixel at `(col, row)`. Writes outside the grid are ignored.
    pub fn set(&mut self, col: usize, row: usize, value: i32) {
        if col < self.width && row < self.height {
            self.pixels[row * self.width + col] = value;
        }
    }

    /// Iterate rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        // chunks_exact panics on zero, and a zero-width bitmap has no rows anyway
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Copy the `width` x `height` rectangle whose top-left corner is
    /// `(start_col, start_row)` into a new bitmap.
    pub fn crop(
        &self,
        start_col: usize,
        start_row: usize,
        width: usize,
        height: usize,
    ) -> MatrixRainResult<IndexBitmap> {
        let fits = |start: usize, len: usize, bound: usize| {
            start.checked_add(len).map_or(false, |end| end <= bound)
        };
        if !fits(start_col, width, self.width) || !fits(start_row, height, self.height) {
            return Err(MatrixRainError::index_range(format!(
                "crop {width}x{height} at ({start_col}, {start_row}) exceeds {}x{} bitmap",
                self.width, self.height
            )));
        }

        let mut pixels = Vec::with_capacity(width * height);
        for row in start_row..start_row + height {
            let offset = row * self.width + start_col;
            pixels.extend_from_slice(&self.pixels[offset..offset + width]);
        }

        Ok(IndexBitmap {
            width,
            height,
            pixels,
        })
    }

    /// Number of cells whose index is non-zero (lit).
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(width: usize, height: usize) -> IndexBitmap {
        let pixels = (0..width * height).map(|i| i as i32).collect();
        IndexBitmap::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_get_and_set() {
        let mut bitmap = IndexBitmap::new(4, 3);
        bitmap.set(3, 2, 7);
        assert_eq!(bitmap.get(3, 2), Some(7));
        assert_eq!(bitmap.get(4, 0), None);
        assert_eq!(bitmap.get(0, 3), None);

        // out of range writes are dropped
        bitmap.set(10, 10, 1);
        assert_eq!(bitmap.lit_count(), 1);
    }

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        let err = IndexBitmap::from_pixels(3, 3, vec![0; 8]).unwrap_err();
        assert!(matches!(err, MatrixRainError::Configuration { .. }));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1, 2, 3], vec![4, 5]];
        assert!(IndexBitmap::from_rows(&rows).is_err());

        let rows = vec![vec![1, 2], vec![3, 4]];
        let bitmap = IndexBitmap::from_rows(&rows).unwrap();
        assert_eq!(bitmap.get(1, 1), Some(4));
    }

    #[test]
    fn test_crop_copies_rectangle() {
        let bitmap = ramp(5, 4);
        let crop = bitmap.crop(1, 1, 3, 2).unwrap();
        assert_eq!(crop.width(), 3);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.pixels(), &[6, 7, 8, 11, 12, 13]);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let bitmap = ramp(5, 4);
        let err = bitmap.crop(3, 0, 3, 1).unwrap_err();
        assert!(matches!(err, MatrixRainError::IndexRange { .. }));
    }

    #[test]
    fn test_crop_with_overflowing_extent() {
        let bitmap = ramp(5, 4);
        for (col, row, w, h) in [(usize::MAX, 0, 2, 1), (1, 0, usize::MAX, 1), (0, 2, 1, usize::MAX)] {
            let err = bitmap.crop(col, row, w, h).unwrap_err();
            assert!(matches!(err, MatrixRainError::IndexRange { .. }));
        }
    }

    #[test]
    fn test_rows_iteration() {
        let bitmap = ramp(3, 2);
        let rows: Vec<&[i32]> = bitmap.rows().collect();
        assert_eq!(rows, vec![&[0, 1, 2][..], &[3, 4, 5][..]]);
    }

    #[test]
    fn test_serde_shape() {
        let bitmap = ramp(2, 1);
        let json = serde_json::to_string(&bitmap).unwrap();
        assert_eq!(json, r#"{"width":2,"height":1,"pixels":[0,1]}"#);
    }

    proptest! {
        #[test]
        fn crop_matches_source_cells(
            width in 1usize..24,
            height in 1usize..24,
            seed in any::<(usize, usize, usize, usize)>(),
        ) {
            let bitmap = ramp(width, height);
            let start_col = seed.0 % width;
            let start_row = seed.1 % height;
            let crop_w = 1 + seed.2 % (width - start_col);
            let crop_h = 1 + seed.3 % (height - start_row);

            let crop = bitmap.crop(start_col, start_row, crop_w, crop_h).unwrap();
            for row in 0..crop_h {
                for col in 0..crop_w {
                    prop_assert_eq!(
                        crop.get(col, row),
                        bitmap.get(col + start_col, row + start_row)
                    );
                }
            }
        }
    }
}
