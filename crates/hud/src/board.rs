//! Board frame: the U-shaped border around the playfield.

use grid_tetris_core::{Playfield, Surface};

use crate::types::{Point, Rect, Rgb};

/// Color of the debug grid overlay.
pub const DEBUG_GRID_COLOR: Rgb = Rgb::RED;

/// Board geometry. Holds no cell content; see [`Playfield`] for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    surface_size: (i32, i32),
    surface_position: Point,
    dirty: bool,
}

impl Board {
    pub fn new(surface_size: (i32, i32), surface_position: Point) -> Self {
        Self {
            surface_size,
            surface_position,
            dirty: true,
        }
    }

    pub fn width(&self) -> i32 {
        self.surface_size.0
    }

    pub fn height(&self) -> i32 {
        self.surface_size.1
    }

    pub fn surface_size(&self) -> (i32, i32) {
        self.surface_size
    }

    /// Where the board's local origin sits on the screen.
    pub fn surface_position(&self) -> Point {
        self.surface_position
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Left wall, floor and right wall, in that order.
    pub fn border_rects(&self, grid: i32) -> [Rect; 3] {
        let (w, h) = self.surface_size;
        [
            Rect::new(0, 0, grid, h),
            Rect::new(grid, h - grid, w - grid, grid),
            Rect::new(w - grid, 0, grid, h - grid),
        ]
    }

    /// Occupancy grid whose walls are the cells under the border rectangles.
    pub fn playfield(&self, grid: i32) -> Playfield {
        Playfield::from_geometry(self.width(), self.height(), grid)
    }

    /// Draw the borders, and the cell grid when `debug` is set.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S, grid: i32, color: Rgb, debug: bool) {
        for rect in self.border_rects(grid) {
            surface.draw_rectangle(rect, color);
        }
        if debug {
            self.draw_grid(surface, grid, DEBUG_GRID_COLOR);
        }
        self.dirty = false;
    }

    fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S, grid: i32, color: Rgb) {
        if grid <= 0 {
            return;
        }
        let (w, h) = self.surface_size;
        for y in (0..h).step_by(grid as usize) {
            surface.draw_line(Point::new(0, y), Point::new(w, y), color);
        }
        for x in (0..w).step_by(grid as usize) {
            surface.draw_line(Point::new(x, 0), Point::new(x, h), color);
        }
    }
}
