//! Framebuffer of styled character cells, drawable through [`Surface`].
//!
//! One surface pixel maps to `x_scale` terminal columns and one row, so a grid
//! size of 1 with the default `x_scale` of 2 gives roughly square cells.

use grid_tetris_core::Surface;

use crate::types::{Point, Rect, Rgb};

/// Character used for filled pixels.
pub const BLOCK: char = '█';

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::BLACK,
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    x_scale: u16,
    color_key: Option<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            x_scale: 2,
            color_key: None,
        }
    }

    /// Terminal columns per surface pixel (minimum 1).
    pub fn with_x_scale(mut self, x_scale: u16) -> Self {
        self.x_scale = x_scale.max(1);
        self
    }

    /// Pixels drawn in this color are skipped, leaving what is underneath.
    pub fn with_color_key(mut self, key: Option<Rgb>) -> Self {
        self.color_key = key;
        self
    }

    pub fn set_color_key(&mut self, key: Option<Rgb>) {
        self.color_key = key;
    }

    pub fn color_key(&self) -> Option<Rgb> {
        self.color_key
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn x_scale(&self) -> u16 {
        self.x_scale
    }

    /// Resize the framebuffer, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Row `y` as a string, for tests and logs.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, style });
            cx += 1;
        }
    }

    /// Fill one surface pixel. Off-screen pixels are dropped.
    fn plot(&mut self, at: Point, color: Rgb) {
        if at.x < 0 || at.y < 0 {
            return;
        }
        let scale = i32::from(self.x_scale);
        let Ok(y) = u16::try_from(at.y) else {
            return;
        };
        let style = CellStyle {
            fg: color,
            ..CellStyle::default()
        };
        for dx in 0..scale {
            if let Ok(x) = u16::try_from(at.x * scale + dx) {
                self.set(x, y, Cell { ch: BLOCK, style });
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn draw_rectangle(&mut self, rect: Rect, color: Rgb) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(i32::from(self.width));
        let y1 = (rect.y + rect.h).min(i32::from(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(Point::new(x, y), color);
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        // Bresenham, all octants.
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut p = from;
        loop {
            self.plot(p, color);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p.y += sy;
            }
        }
    }

    fn draw_pixel(&mut self, at: Point, color: Rgb) {
        if self.color_key == Some(color) {
            return;
        }
        self.plot(at, color);
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Option<Rgb>) {
        if at.x < 0 || at.y < 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (
            u16::try_from(at.x * i32::from(self.x_scale)),
            u16::try_from(at.y),
        ) else {
            return;
        };
        let mut style = CellStyle::default();
        if let Some(fg) = color {
            style.fg = fg;
        }
        self.put_str(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_is_scaled_horizontally() {
        let mut fb = FrameBuffer::new(8, 3);
        fb.draw_rectangle(Rect::new(1, 1, 2, 1), Rgb::RED);
        assert_eq!(fb.row_text(0), "        ");
        assert_eq!(fb.row_text(1), "  ████  ");
        assert_eq!(fb.get(2, 1).map(|c| c.style.fg), Some(Rgb::RED));
    }

    #[test]
    fn rectangle_is_clipped() {
        let mut fb = FrameBuffer::new(4, 2).with_x_scale(1);
        fb.draw_rectangle(Rect::new(-2, -2, 10, 10), Rgb::GREY);
        assert_eq!(FrameBuffer::new(1, 1).with_x_scale(0).x_scale(), 1);
        assert!(fb.cells().iter().all(|c| c.ch == BLOCK));
    }

    #[test]
    fn color_key_pixels_are_skipped() {
        let mut fb = FrameBuffer::new(4, 1)
            .with_x_scale(1)
            .with_color_key(Some(Rgb::PINK));
        fb.draw_pixel(Point::new(0, 0), Rgb::WHITE);
        fb.draw_pixel(Point::new(1, 0), Rgb::PINK);
        assert_eq!(fb.row_text(0), "█   ");

        fb.set_color_key(None);
        fb.draw_pixel(Point::new(2, 0), Rgb::PINK);
        assert_eq!(fb.row_text(0), "█ █ ");
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut fb = FrameBuffer::new(3, 3).with_x_scale(1);
        fb.draw_line(Point::new(2, 2), Point::new(0, 0), Rgb::RED);
        assert_eq!(fb.row_text(0), "█  ");
        assert_eq!(fb.row_text(1), " █ ");
        assert_eq!(fb.row_text(2), "  █");
    }

    #[test]
    fn text_uses_default_color_when_none() {
        let mut fb = FrameBuffer::new(10, 1);
        fb.draw_text(Point::new(1, 0), "HI", None);
        assert_eq!(fb.row_text(0), "  HI      ");
        assert_eq!(fb.get(2, 0).map(|c| c.style), Some(CellStyle::default()));
    }
}
