//! Character grid rasterizer
//!
//! Maps continuous body positions onto a fixed `cols` x `rows` grid of
//! characters. Kept free of terminal I/O so headless runs and tests can use it.

use crate::error::{Result, SimError};
use crate::simulation::states::{NVec2, World};

pub const BODY_GLYPH: char = '*';
pub const EMPTY_GLYPH: char = ' ';

/// Grid cell of a position: truncate, then clamp into `[0, cols) x [0, rows)`
pub fn cell_of(x: NVec2, cols: usize, rows: usize) -> (usize, usize) {
    (clamp_axis(x.x, cols), clamp_axis(x.y, rows))
}

fn clamp_axis(v: f64, len: usize) -> usize {
    // `as` saturates and maps NaN to 0
    let c = v.trunc() as i64;
    c.clamp(0, len.saturating_sub(1) as i64) as usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsciiFrame {
    cols: usize,
    rows: usize,
    cells: Vec<char>, // row-major
}

impl AsciiFrame {
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let len = cols.checked_mul(rows).ok_or_else(|| {
            SimError::InvalidConfiguration(format!("frame of {cols} x {rows} cells is too large"))
        })?;
        Ok(Self {
            cols,
            rows,
            cells: vec![EMPTY_GLYPH; len],
        })
    }

    /// Frame sized to the world's grid (extents rounded up)
    pub fn for_world(world: &World) -> Result<Self> {
        Self::new(world.width().ceil() as usize, world.height().ceil() as usize)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_GLYPH);
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Clear and draw every body of `world`
    pub fn draw(&mut self, world: &World) {
        self.clear();
        for b in world.bodies() {
            let (col, row) = cell_of(b.x, self.cols, self.rows);
            self.cells[row * self.cols + col] = BODY_GLYPH;
        }
    }

    /// Rows as strings, top row first
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.cols).map(|row| row.iter().collect())
    }

    /// Top-left `max_cols` x `max_rows` corner of the frame, for a smaller screen
    pub fn clipped_lines(&self, max_cols: usize, max_rows: usize) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.cols)
            .take(max_rows)
            .map(move |row| row.iter().take(max_cols).collect())
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows);
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
