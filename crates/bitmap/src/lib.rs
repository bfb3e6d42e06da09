//! MatrixRain Bitmap Model
//!
//! Defines the data contracts shared by the intro subsystems:
//! - **IndexBitmap:** A grid of integer color/phosphor indices
//! - **Positions:** Title glyph and connector anchor points
//!
//! Bitmaps are plain data; they carry no rendering or loading logic.

pub mod index_bitmap;
pub mod position;

pub use index_bitmap::*;
pub use position::*;
