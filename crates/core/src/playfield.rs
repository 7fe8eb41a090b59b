//! Playfield module - occupancy grid for walls and locked cells
//!
//! The HUD board only draws borders; the playfield is where settled pieces
//! live. Its geometry comes from the board: `cols x rows` grid cells, where
//! column 0, column `cols - 1` and row `rows - 1` are walls, exactly the cells
//! the board's border rectangles cover. Everything else starts empty.
//!
//! Uses a flat row-major array. Coordinates: `(x, y)` with `x` left to right
//! and `y` top to bottom; anything outside `0..cols` / `0..rows` is blocked.

use log::debug;

use crate::collision::Collision;
use crate::piece::Piece;
use crate::surface::Surface;
use crate::types::{Direction, GridPos, Rect, Rgb};

/// Content of one playfield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Wall,
    Locked(Rgb),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    cols: i32,
    rows: i32,
    /// Flat array of slots, row-major order (y * cols + x)
    slots: Vec<Slot>,
    dirty: bool,
}

impl Playfield {
    /// Create a playfield of `cols x rows` cells with walls on the left,
    /// right and bottom edges.
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        let mut slots = vec![Slot::Empty; (cols * rows) as usize];
        for y in 0..rows {
            for x in 0..cols {
                if x == 0 || x == cols - 1 || y == rows - 1 {
                    slots[(y * cols + x) as usize] = Slot::Wall;
                }
            }
        }
        Self {
            cols,
            rows,
            slots,
            dirty: true,
        }
    }

    /// Derive the grid from pixel geometry (`width x height` at `grid` pixels
    /// per cell).
    pub fn from_geometry(width: i32, height: i32, grid: i32) -> Self {
        if grid <= 0 {
            return Self::new(0, 0);
        }
        Self::new(width / grid, height / grid)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.cols || y < 0 || y >= self.rows {
            return None;
        }
        Some((y * self.cols + x) as usize)
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Get slot at `(x, y)`, `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Slot> {
        self.index(x, y).map(|i| self.slots[i])
    }

    /// Within bounds and empty.
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Slot::Empty))
    }

    /// Whether every cell in `cells` is free.
    pub fn fits(&self, cells: &[GridPos]) -> bool {
        cells.iter().all(|c| self.is_free(c.x, c.y))
    }

    /// Lock a piece's current cells into the grid.
    ///
    /// Returns false, leaving the grid untouched, if any cell is blocked.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let cells = piece.cells();
        if !self.fits(&cells) {
            return false;
        }
        for c in &cells {
            if let Some(i) = self.index(c.x, c.y) {
                self.slots[i] = Slot::Locked(piece.color());
            }
        }
        self.dirty = true;
        debug!(
            "locked piece {} at ({}, {})",
            piece.name(),
            piece.position().x,
            piece.position().y
        );
        true
    }

    /// Where new pieces enter this playfield.
    pub fn spawn_position(&self) -> GridPos {
        crate::pieces::spawn_position(self.cols)
    }

    /// A freshly spawned piece that does not fit means the stack reached the top.
    pub fn is_spawn_blocked(&self, piece: &Piece) -> bool {
        !self.fits(&piece.cells())
    }

    pub fn locked_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Locked(_)))
            .count()
    }

    /// Remove every locked cell, keeping the walls.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if matches!(slot, Slot::Locked(_)) {
                *slot = Slot::Empty;
            }
        }
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Draw locked cells as `grid`-sized squares. Walls are the board's job.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S, grid: i32) {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Locked(color) = slot {
                let x = i as i32 % self.cols;
                let y = i as i32 / self.cols;
                surface.draw_rectangle(Rect::new(x * grid, y * grid, grid, grid), *color);
            }
        }
        self.dirty = false;
    }
}

impl Collision for Playfield {
    fn can_move(&self, piece: &Piece, direction: Direction) -> bool {
        self.fits(&piece.cells_at(piece.current_rotation(), piece.position().step(direction)))
    }

    fn can_rotate(&self, piece: &Piece, next_rotation: usize) -> bool {
        next_rotation < piece.rotation_count()
            && self.fits(&piece.cells_at(next_rotation, piece.position()))
    }
}
