//! Terminal presentation via half-block cells
//!
//! Each character cell shows two vertically stacked samples: the upper one
//! as the foreground of `▀`, the lower one as the background. The canvas is
//! scaled to fit the terminal, letterboxed, and area-averaged. Only cells
//! that changed since the last frame are written.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color as TermColor, Print},
    terminal,
};

use crate::entity::Entity;
use crate::platform::PlatformError;
use crate::sprite::Color;

use super::{Canvas, RenderSurface};

const HALF_BLOCK: char = '▀';

/// One terminal cell worth of samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub top: Color,
    pub bottom: Color,
}

/// Where the scaled canvas lands on the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left column
    pub col: u16,
    /// Top row
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Largest aspect-correct fit of `width`x`height` into the grid.
    /// Samples are square with two per cell vertically.
    pub fn fit(width: i32, height: i32, term_cols: u16, term_rows: u16) -> Self {
        let avail_w = term_cols.max(1) as f32;
        let avail_h = (term_rows.max(1) as f32) * 2.0;
        let scale = (avail_w / width as f32).min(avail_h / height as f32);

        let cols = ((width as f32 * scale + 1e-3).floor() as u16).clamp(1, term_cols.max(1));
        let samples = ((height as f32 * scale + 1e-3).floor() as u16).max(2);
        let rows = (samples / 2).clamp(1, term_rows.max(1));

        Self {
            col: (term_cols.saturating_sub(cols)) / 2,
            row: (term_rows.saturating_sub(rows)) / 2,
            cols,
            rows,
        }
    }
}

/// Average the canvas into `cols` x `rows` cells (row-major)
pub fn downsample(canvas: &Canvas, cols: u16, rows: u16) -> Vec<Cell> {
    let samples_y = rows as i32 * 2;
    let mut cells = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            let top = average(canvas, col, row * 2, cols as i32, samples_y);
            let bottom = average(canvas, col, row * 2 + 1, cols as i32, samples_y);
            cells.push(Cell { top, bottom });
        }
    }
    cells
}

/// Mean color of the canvas block that maps to sample `(sx, sy)`
fn average(canvas: &Canvas, sx: i32, sy: i32, samples_x: i32, samples_y: i32) -> Color {
    let x0 = sx * canvas.width() / samples_x;
    let x1 = ((sx + 1) * canvas.width() / samples_x).max(x0 + 1);
    let y0 = sy * canvas.height() / samples_y;
    let y1 = ((sy + 1) * canvas.height() / samples_y).max(y0 + 1);

    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = canvas.pixel(x, y);
            r += p.r as u32;
            g += p.g as u32;
            b += p.b as u32;
            n += 1;
        }
    }
    let n = n.max(1);
    Color::rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Render surface that draws to a canvas and presents it on a terminal
pub struct TerminalSurface<W: Write> {
    out: W,
    canvas: Canvas,
    /// Terminal grid size, refreshed on every present
    size: (u16, u16),
    /// Cells as last written, for diffing
    previous: Vec<Cell>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: i32, height: i32) -> Self {
        Self {
            out,
            canvas: Canvas::new(width, height),
            size: (0, 0),
            previous: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Write the frame for a terminal of `cols` x `rows`
    pub fn present_to(&mut self, cols: u16, rows: u16) -> Result<(), PlatformError> {
        if (cols, rows) != self.size {
            self.size = (cols, rows);
            self.previous.clear();
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let view = Viewport::fit(self.canvas.width(), self.canvas.height(), cols, rows);
        let cells = downsample(&self.canvas, view.cols, view.rows);
        let full = self.previous.len() != cells.len();

        for row in 0..view.rows {
            // Track the cursor so runs of changed cells need one MoveTo
            let mut cursor_col: Option<u16> = None;
            for col in 0..view.cols {
                let i = row as usize * view.cols as usize + col as usize;
                let cell = cells[i];
                if !full && self.previous[i] == cell {
                    cursor_col = None;
                    continue;
                }
                if cursor_col != Some(col) {
                    self.out
                        .queue(cursor::MoveTo(view.col + col, view.row + row))?;
                }
                self.out
                    .queue(style::SetForegroundColor(term_color(cell.top)))?
                    .queue(style::SetBackgroundColor(term_color(cell.bottom)))?
                    .queue(Print(HALF_BLOCK))?;
                cursor_col = Some(col + 1);
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        self.previous = cells;
        Ok(())
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn fill(&mut self, color: Color) {
        self.canvas.fill(color);
    }

    fn blit(&mut self, entity: &Entity) {
        self.canvas.blit(entity);
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        let (cols, rows) = terminal::size()?;
        self.present_to(cols, rows)?;
        self.canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Sprite;
    use std::rc::Rc;

    #[test]
    fn test_viewport_letterboxes() {
        // Wide terminal: height limits, columns centered
        let view = Viewport::fit(1100, 400, 300, 20);
        assert_eq!(view.rows, 20);
        assert_eq!(view.cols, 110);
        assert_eq!(view.col, 95);
        assert_eq!(view.row, 0);

        // Narrow terminal: width limits, rows centered
        let view = Viewport::fit(1100, 400, 110, 50);
        assert_eq!(view.cols, 110);
        assert_eq!(view.rows, 20);
        assert_eq!(view.row, 15);
    }

    #[test]
    fn test_downsample_averages_blocks() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Color::rgb(0, 0, 0));
        canvas.draw_sprite(&Sprite::solid("w", 2, 2, Color::rgb(200, 200, 200)), 0, 0);

        // 2x1 cells, each covering 2x4 pixels as two 2x2 samples
        let cells = downsample(&canvas, 2, 1);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].top, Color::rgb(200, 200, 200));
        assert_eq!(cells[0].bottom, Color::rgb(0, 0, 0));
        assert_eq!(cells[1].top, Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_only_changed_cells_rewritten() {
        let mut surface = TerminalSurface::new(Vec::new(), 8, 4);
        surface.fill(Color::rgb(255, 255, 255));
        surface.present_to(8, 2).unwrap();
        let first = surface.out.len();
        assert!(first > 0);

        // Same frame again: only the color reset goes out
        surface.out.clear();
        surface.present_to(8, 2).unwrap();
        let idle = surface.out.len();
        assert!(idle < first / 4);

        // One changed pixel: a single cell is redrawn
        surface.out.clear();
        let dot = Entity::top_left(0, 0, Rc::new(Sprite::solid("k", 1, 1, Color::rgb(0, 0, 0))));
        surface.blit(&dot);
        surface.present_to(8, 2).unwrap();
        let text = String::from_utf8(surface.out.clone()).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 1);
    }
}
