//! Terminal backend
//!
//! Rasterizes draw calls onto a grid of character cells, one cell per 8x16
//! pixel block, and writes only the cells that changed since the last frame.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, SetBackgroundColor, SetForegroundColor};
use glam::Vec2;

use super::{Align, Color, Surface};
use crate::assets::Image;
use crate::sim::Rect;

/// Pixels covered by one terminal cell
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

/// Pixel size of a terminal with the given cell count
pub fn cells_to_pixels(cols: u16, rows: u16) -> Vec2 {
    Vec2::new(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

/// Pixel position of a cell's center, where pointer events land
pub fn cell_center(col: u16, row: u16) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: TermColor,
    bg: TermColor,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: TermColor::White,
        bg: TermColor::Black,
    };

    /// Differs from every drawable cell, forcing a repaint
    const INVALID: Cell = Cell {
        ch: '\0',
        fg: TermColor::Magenta,
        bg: TermColor::Magenta,
    };
}

#[derive(Debug, Clone)]
struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(cols: usize, rows: usize, fill: Cell) -> Self {
        Self {
            cols,
            rows,
            cells: vec![fill; cols * rows],
        }
    }

    fn get_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols + col as usize)
    }

    fn put(&mut self, col: i64, row: i64, ch: char, fg: TermColor) {
        if let Some(cell) = self.get_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn set(&mut self, col: i64, row: i64, value: Cell) {
        if let Some(cell) = self.get_mut(col, row) {
            *cell = value;
        }
    }

    fn paint(&mut self, col: i64, row: i64, bg: TermColor) {
        if let Some(cell) = self.get_mut(col, row) {
            cell.ch = ' ';
            cell.bg = bg;
        }
    }
}

/// Straight RGBA pixel, blended against black like `term_color`
fn pixel_color([r, g, b, a]: [u8; 4]) -> TermColor {
    let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    TermColor::Rgb {
        r: blend(r),
        g: blend(g),
        b: blend(b),
    }
}

/// Alpha is blended against black
fn term_color(color: Color) -> TermColor {
    let a = color[3].clamp(0.0, 1.0);
    let channel = |c: f32| (c.clamp(0.0, 1.0) * a * 255.0).round() as u8;
    TermColor::Rgb {
        r: channel(color[0]),
        g: channel(color[1]),
        b: channel(color[2]),
    }
}

fn to_col(x: f32) -> i64 {
    (x / CELL_WIDTH).floor() as i64
}

fn to_row(y: f32) -> i64 {
    (y / CELL_HEIGHT).floor() as i64
}

/// Cells whose centers lie inside `rect`, or the single cell under its
/// center when it is smaller than a cell
fn covered_cells(rect: Rect) -> (i64, i64, i64, i64) {
    let c0 = ((rect.min().x / CELL_WIDTH) - 0.5).ceil() as i64;
    let c1 = ((rect.max().x / CELL_WIDTH) - 0.5).floor() as i64;
    let r0 = ((rect.min().y / CELL_HEIGHT) - 0.5).ceil() as i64;
    let r1 = ((rect.max().y / CELL_HEIGHT) - 0.5).floor() as i64;
    let center = rect.center();
    let (c0, c1) = if c1 < c0 {
        (to_col(center.x), to_col(center.x))
    } else {
        (c0, c1)
    };
    let (r0, r1) = if r1 < r0 {
        (to_row(center.y), to_row(center.y))
    } else {
        (r0, r1)
    };
    (c0, c1, r0, r1)
}

/// Double-buffered cell grid written through crossterm
pub struct TerminalSurface<W: Write> {
    out: W,
    front: Grid,
    back: Grid,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            out,
            front: Grid::new(cols, rows, Cell::BLANK),
            back: Grid::new(cols, rows, Cell::INVALID),
        }
    }

    /// Adopt a new terminal size; the next frame is a full repaint
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (cols, rows) = (cols as usize, rows as usize);
        self.front = Grid::new(cols, rows, Cell::BLANK);
        self.back = Grid::new(cols, rows, Cell::INVALID);
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut colors: Option<(TermColor, TermColor)> = None;
        let mut cursor: Option<(usize, usize)> = None;
        for row in 0..self.front.rows {
            for col in 0..self.front.cols {
                let i = row * self.front.cols + col;
                let cell = self.front.cells[i];
                if self.back.cells[i] == cell {
                    continue;
                }
                if cursor != Some((col, row)) {
                    queue!(self.out, MoveTo(col as u16, row as u16))?;
                }
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(self.out, SetForegroundColor(cell.fg), SetBackgroundColor(cell.bg))?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.ch))?;
                cursor = Some((col + 1, row));
            }
        }
        self.out.flush()?;
        self.back.cells.clone_from(&self.front.cells);
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> Vec2 {
        cells_to_pixels(self.front.cols as u16, self.front.rows as u16)
    }

    fn clear(&mut self, color: Color) {
        let bg = term_color(color);
        self.front.cells.fill(Cell { bg, ..Cell::BLANK });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let bg = term_color(color);
        let (c0, c1, r0, r1) = covered_cells(rect);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.front.paint(col, row, bg);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, _width: f32, color: Color) {
        let fg = term_color(color);
        let (c0, c1, r0, r1) = covered_cells(rect);
        for col in c0..=c1 {
            self.front.put(col, r0, '─', fg);
            self.front.put(col, r1, '─', fg);
        }
        for row in r0..=r1 {
            self.front.put(c0, row, '│', fg);
            self.front.put(c1, row, '│', fg);
        }
        if c0 != c1 && r0 != r1 {
            self.front.put(c0, r0, '┌', fg);
            self.front.put(c1, r0, '┐', fg);
            self.front.put(c0, r1, '└', fg);
            self.front.put(c1, r1, '┘', fg);
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, _width: f32, color: Color) {
        let fg = term_color(color);
        let (mut x, mut y) = (to_col(from.x), to_row(from.y));
        let (x1, y1) = (to_col(to.x), to_row(to.y));
        let ch = if y == y1 {
            '─'
        } else if x == x1 {
            '│'
        } else {
            '•'
        };

        // Bresenham over cells
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.front.put(x, y, ch, fg);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, _width: f32, color: Color) {
        let fg = term_color(color);
        let steps = ((radius / CELL_WIDTH) * 8.0).ceil().max(8.0) as usize;
        for i in 0..steps {
            let theta = i as f32 / steps as f32 * std::f32::consts::TAU;
            let p = center + Vec2::new(theta.cos(), theta.sin()) * radius;
            self.front.put(to_col(p.x), to_row(p.y), '·', fg);
        }
    }

    /// Two samples per cell: the upper half block takes the top sample as
    /// foreground and the bottom one as background
    fn blit(&mut self, image: &Image, dest: Rect) {
        let (c0, c1, r0, r1) = covered_cells(dest);
        let size = dest.size.max(Vec2::splat(1.0));
        let sample = |x: f32, y: f32| {
            let u = (x - dest.min().x) / size.x;
            let v = (y - dest.min().y) / size.y;
            image.sample(u, v).map(pixel_color).unwrap_or(TermColor::Black)
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let x = (col as f32 + 0.5) * CELL_WIDTH;
                let y = row as f32 * CELL_HEIGHT;
                self.front.set(
                    col,
                    row,
                    Cell {
                        ch: '▀',
                        fg: sample(x, y + CELL_HEIGHT * 0.25),
                        bg: sample(x, y + CELL_HEIGHT * 0.75),
                    },
                );
            }
        }
    }

    fn text(&mut self, text: &str, pos: Vec2, _size: f32, align: Align, color: Color) {
        let fg = term_color(color);
        let len = text.chars().count() as i64;
        let row = to_row(pos.y);
        let start = match align {
            Align::Left => to_col(pos.x),
            Align::Center => to_col(pos.x) - len / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            self.front.put(start + i as i64, row, ch, fg);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.flush_diff()
    }
}
