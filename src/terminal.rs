//! Terminal backing for `Surface`.
//!
//! Draw calls land in a cell buffer; `present` writes the buffer out with
//! crossterm in one pass, switching colour only when it changes.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::display::{Rgb, Surface};
use crate::geometry::{Size, Vector};

const CELL: &str = "█";

/// Maps the arena onto a block of terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub arena: Size,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, arena: Size) -> Self {
        Self { cols, rows, arena }
    }

    fn has_area(&self) -> bool {
        self.arena.w() > 0.0 && self.arena.h() > 0.0
    }

    /// Arena position of a cell's centre.
    pub fn to_arena(&self, col: u16, row: u16) -> Vector {
        if !self.has_area() || self.cols == 0 || self.rows == 0 {
            return Vector::ZERO;
        }
        Vector::new(
            (col as f64 + 0.5) * self.arena.w() / self.cols as f64,
            (row as f64 + 0.5) * self.arena.h() / self.rows as f64,
        )
    }

    /// How many cells a distance covers, horizontally and vertically.
    fn cells_across(&self, dx: f64, dy: f64) -> (f64, f64) {
        (
            dx * self.cols as f64 / self.arena.w(),
            dy * self.rows as f64 / self.arena.h(),
        )
    }

    /// Half-open cell ranges `(col0..col1, row0..row1)` covered by a rect,
    /// clipped to the viewport. Anything with positive area covers at least
    /// one cell.
    fn cells(&self, x: f64, y: f64, w: f64, h: f64) -> Option<((u16, u16), (u16, u16))> {
        if !self.has_area() {
            return None;
        }
        let cols = span(x, w, self.arena.w(), self.cols)?;
        let rows = span(y, h, self.arena.h(), self.rows)?;
        Some((cols, rows))
    }
}

/// Cells `lo..hi` covered by `start..start + len` when `extent` arena units
/// are spread over `cells` cells.
fn span(start: f64, len: f64, extent: f64, cells: u16) -> Option<(u16, u16)> {
    if len <= 0.0 || !start.is_finite() || !len.is_finite() {
        return None;
    }
    let per = cells as f64;
    let lo = (start * per / extent).floor();
    let hi = ((start + len) * per / extent).ceil().max(lo + 1.0);
    let lo = lo.max(0.0);
    let hi = hi.min(per);
    if lo >= hi {
        None
    } else {
        Some((lo as u16, hi as u16))
    }
}

// ── Cell buffer ───────────────────────────────────────────────────────────────

pub struct TerminalSurface {
    viewport: Viewport,
    cells: Vec<Option<Rgb>>,
}

impl TerminalSurface {
    pub fn new(viewport: Viewport) -> Self {
        let len = viewport.cols as usize * viewport.rows as usize;
        Self {
            viewport,
            cells: vec![None; len],
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Adopt a new viewport (terminal resized); the buffer starts empty.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = TerminalSurface::new(viewport);
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Rgb> {
        if col >= self.viewport.cols || row >= self.viewport.rows {
            return None;
        }
        self.cells[row as usize * self.viewport.cols as usize + col as usize]
    }

    /// Write the whole buffer, top-left first. Empty cells are blanks.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let cols = self.viewport.cols as usize;
        let mut current: Option<Rgb> = None;

        for (row, line) in self.cells.chunks(cols.max(1)).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in line {
                match cell {
                    Some(rgb) => {
                        if current != Some(*rgb) {
                            out.queue(style::SetForegroundColor(to_color(*rgb)))?;
                            current = Some(*rgb);
                        }
                        out.queue(Print(CELL))?;
                    }
                    None => {
                        out.queue(Print(' '))?;
                    }
                }
            }
        }

        out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let Some(((c0, c1), (r0, r1))) = self.viewport.cells(x, y, w, h) else {
            return;
        };
        let cols = self.viewport.cols as usize;
        for row in r0..r1 {
            let base = row as usize * cols;
            self.cells[base + c0 as usize..base + c1 as usize].fill(Some(color));
        }
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        if !self.viewport.has_area() {
            return;
        }
        // One square stamp per cell travelled, plus both end caps.
        let (dx, dy) = (x2 - x1, y2 - y1);
        let (across, down) = self.viewport.cells_across(dx.abs(), dy.abs());
        let cells_travelled = across.max(down).ceil();
        let steps = if cells_travelled.is_finite() {
            cells_travelled.max(1.0) as usize
        } else {
            1
        };
        let half = width / 2.0;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let (px, py) = (x1 + dx * t, y1 + dy * t);
            self.fill_rect(px - half, py - half, width, width, color);
        }
    }
}
