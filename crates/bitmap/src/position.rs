//! Title glyph and connector positions.
//!
//! Coordinates are window pixels: `(0, 0)` is top-left, `y` grows downward.

use serde::{Deserialize, Serialize};

/// A 2D integer point in window pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Where a falling glyph of the title comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleGlyphPosition {
    /// Column of the glyph's column of rain.
    pub x: i32,
    /// Row at which the glyph stops falling.
    pub end_y: i32,
}

impl TitleGlyphPosition {
    pub fn new(x: i32, end_y: i32) -> Self {
        Self { x, end_y }
    }

    /// The resting point `(x, end_y)`.
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.end_y)
    }
}

/// Where a decorative connector sits between two title glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleConnectorPosition {
    pub position: Point,
}

impl TitleConnectorPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}
