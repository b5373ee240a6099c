//! Luminance to glyph quantization

use crate::buffer::Grid;
use std::fmt;

/// Glyphs from darkest to brightest
pub const GLYPH_RAMP: [char; 6] = [' ', '.', '-', '*', '$', '#'];

/// Terminal cells per logical pixel, horizontally. Cells are about twice as
/// tall as they are wide, so each pixel is drawn twice to look square.
pub const CELLS_PER_PIXEL: usize = 2;

/// Pick the glyph for a luminance value. Anything at or below 0 (including
/// NaN) is darkest, anything at or above 1 is brightest.
pub fn glyph_for(luminance: f64) -> char {
    let max_index = GLYPH_RAMP.len() - 1;
    let scaled = (luminance.clamp(0.0, 1.0) * max_index as f64).round();
    // NaN casts to 0
    let index = (scaled as usize).min(max_index);
    GLYPH_RAMP[index]
}

/// Rows of terminal cells ready to blit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    columns: usize,
    rows: Vec<Vec<char>>,
}

impl GlyphGrid {
    /// Quantize a luminance buffer; pixel (col, row) fills cells
    /// `2·col` and `2·col + 1` of that row.
    pub fn from_luminance(luminance: &Grid<f64>) -> Self {
        let columns = luminance.width() * CELLS_PER_PIXEL;
        let rows: Vec<Vec<char>> = (0..luminance.height())
            .filter_map(|y| luminance.row(y))
            .map(|row| {
                row.iter()
                    .flat_map(|&lum| std::iter::repeat(glyph_for(lum)).take(CELLS_PER_PIXEL))
                    .collect::<Vec<char>>()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Each row as a string, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|r| r.iter().collect::<String>())
    }
}

impl fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
