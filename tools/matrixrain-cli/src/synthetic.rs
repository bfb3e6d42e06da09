//! Synthetic title bitmaps for running the intro without a glyph renderer.
//!
//! Titles are drawn in a 3x5 block font, scaled to fit the window and
//! centered. Letter pixels carry the palette index `1 + letter offset`.
//! Between adjacent letters the best-rated mutually relevant connector is
//! drawn as a short bar carrying `CONNECTOR_INDEX_BASE + variant`.

use matrixrain_bitmap::{IndexBitmap, TitleConnectorPosition, TitleGlyphPosition};
use matrixrain_common::error::{MatrixRainError, MatrixRainResult};
use matrixrain_connector::{connector_map, Side, CONNECTOR_VARIANTS};

const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
const ADVANCE: usize = GLYPH_W + 1;
const CONNECTOR_INDEX_BASE: i32 = 30;

#[rustfmt::skip]
const FONT: [[u8; GLYPH_H]; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // a
    [0b110, 0b101, 0b110, 0b101, 0b110], // b
    [0b011, 0b100, 0b100, 0b100, 0b011], // c
    [0b110, 0b101, 0b101, 0b101, 0b110], // d
    [0b111, 0b100, 0b110, 0b100, 0b111], // e
    [0b111, 0b100, 0b110, 0b100, 0b100], // f
    [0b011, 0b100, 0b101, 0b101, 0b011], // g
    [0b101, 0b101, 0b111, 0b101, 0b101], // h
    [0b111, 0b010, 0b010, 0b010, 0b111], // i
    [0b001, 0b001, 0b001, 0b101, 0b010], // j
    [0b101, 0b101, 0b110, 0b101, 0b101], // k
    [0b100, 0b100, 0b100, 0b100, 0b111], // l
    [0b101, 0b111, 0b111, 0b101, 0b101], // m
    [0b110, 0b101, 0b101, 0b101, 0b101], // n
    [0b010, 0b101, 0b101, 0b101, 0b010], // o
    [0b110, 0b101, 0b110, 0b100, 0b100], // p
    [0b010, 0b101, 0b101, 0b110, 0b011], // q
    [0b110, 0b101, 0b110, 0b101, 0b101], // r
    [0b011, 0b100, 0b010, 0b001, 0b110], // s
    [0b111, 0b010, 0b010, 0b010, 0b010], // t
    [0b101, 0b101, 0b101, 0b101, 0b111], // u
    [0b101, 0b101, 0b101, 0b101, 0b010], // v
    [0b101, 0b101, 0b111, 0b111, 0b101], // w
    [0b101, 0b101, 0b010, 0b101, 0b101], // x
    [0b101, 0b101, 0b010, 0b010, 0b010], // y
    [0b111, 0b001, 0b010, 0b100, 0b111], // z
];

/// A rendered title with the layout the rain animation needs.
#[derive(Debug, Clone)]
pub struct SyntheticTitle {
    pub bitmap: IndexBitmap,
    pub glyphs: Vec<TitleGlyphPosition>,
    pub connectors: Vec<TitleConnectorPosition>,
}

fn letter_offset(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
}

/// Pick the zero-based connector variant joining `left` to `right`.
fn best_connector(left: char, right: char) -> MatrixRainResult<Option<usize>> {
    let map = connector_map();
    let l = map.profile(left)?;
    let r = map.profile(right)?;

    let mut best: Option<(u8, usize)> = None;
    for j in 0..CONNECTOR_VARIANTS {
        if !l.relevancy(Side::Right)[j] || !r.relevancy(Side::Left)[j] {
            continue;
        }
        let score = l.ratings(Side::Right)[j] + r.ratings(Side::Left)[j];
        if score > 0 && best.map_or(true, |(s, _)| score > s) {
            best = Some((score, j));
        }
    }
    Ok(best.map(|(_, j)| j))
}

/// Render `title` centered in a `width` x `height` bitmap.
pub fn render_title(title: &str, width: usize, height: usize) -> MatrixRainResult<SyntheticTitle> {
    if width == 0 || height == 0 {
        return Err(MatrixRainError::configuration(format!(
            "window size {width}x{height} must be positive"
        )));
    }

    let chars: Vec<char> = title.chars().collect();
    if !chars.iter().any(|c| letter_offset(*c).is_some()) {
        return Err(MatrixRainError::configuration(
            "title must contain at least one letter",
        ));
    }

    // one spare cell of margin on every side
    let cells_w = chars.len() * ADVANCE - 1;
    let scale = (width / (cells_w + 2)).min(height / (GLYPH_H + 2)).max(1);
    let origin_x = width.saturating_sub(cells_w * scale) / 2;
    let origin_y = height.saturating_sub(GLYPH_H * scale) / 2;

    let mut bitmap = IndexBitmap::new(width, height);
    let mut fill = |cell_x: usize, cell_y: usize, value: i32| {
        for dy in 0..scale {
            for dx in 0..scale {
                bitmap.set(
                    origin_x + cell_x * scale + dx,
                    origin_y + cell_y * scale + dy,
                    value,
                );
            }
        }
    };

    let mut glyphs = Vec::new();
    let mut connectors = Vec::new();

    for (i, c) in chars.iter().enumerate() {
        let Some(offset) = letter_offset(*c) else {
            continue;
        };

        for (row, bits) in FONT[offset].iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0b100 >> col) != 0 {
                    fill(i * ADVANCE + col, row, offset as i32 + 1);
                }
            }
        }
        glyphs.push(TitleGlyphPosition::new(
            (origin_x + i * ADVANCE * scale) as i32,
            (origin_y + GLYPH_H * scale) as i32,
        ));

        let next = chars.get(i + 1).copied().and_then(letter_offset);
        if let Some(next) = next {
            let left = (b'a' + offset as u8) as char;
            let right = (b'a' + next as u8) as char;
            if let Some(variant) = best_connector(left, right)? {
                let gap = i * ADVANCE + GLYPH_W;
                let mid = GLYPH_H / 2;
                fill(gap, mid, CONNECTOR_INDEX_BASE + variant as i32);
                connectors.push(TitleConnectorPosition::new(
                    (origin_x + gap * scale) as i32,
                    (origin_y + mid * scale) as i32,
                ));
            }
        }
    }

    tracing::debug!(
        title,
        scale,
        glyphs = glyphs.len(),
        connectors = connectors.len(),
        "Synthetic title rendered"
    );

    Ok(SyntheticTitle {
        bitmap,
        glyphs,
        connectors,
    })
}
