//! Shared types - plain data used by every other crate
//!
//! Everything here is a small `Copy` value with no external dependencies, so the
//! same types can flow through the core object model, the HUD panels, the
//! content loader and the terminal surface.
//!
//! # Coordinates
//!
//! Two coordinate spaces are used throughout the workspace:
//!
//! - **Grid cells** ([`GridPos`]): logical board cells, `x` to the right and `y`
//!   downwards. A piece's position is the top-left cell of its 4x4 box.
//! - **Pixels** ([`Point`], [`Rect`]): surface coordinates. A grid cell at
//!   `(x, y)` covers the pixel square `(x * grid, y * grid, grid, grid)`.
//!
//! # Shape Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SHAPE_SIDE` | 4 | Side of a piece's bounding box in cells |
//! | `CELLS_PER_ROTATION` | 16 | Cells per rotation block in a shape table |
//! | `DEFAULT_GRID` | 20 | Default pixel size of one grid cell |
//!
//! # Examples
//!
//! ```
//! use grid_tetris_types::{Direction, GridPos, MenuState, Rgb, CELLS_PER_ROTATION};
//!
//! // Named colors resolve case-insensitively
//! assert_eq!(Rgb::from_name("Grey"), Some(Rgb::GREY));
//!
//! // Directions are unit steps on the grid
//! let pos = GridPos::new(3, 5).step(Direction::Left);
//! assert_eq!(pos, GridPos::new(2, 5));
//!
//! // Menu states parse from their content names
//! assert_eq!(MenuState::from_str("settings"), Some(MenuState::Settings));
//!
//! assert_eq!(CELLS_PER_ROTATION, 16);
//! ```

/// Side of a piece's bounding box, in cells.
pub const SHAPE_SIDE: usize = 4;

/// Number of cells in one rotation block of a shape table (4x4).
pub const CELLS_PER_ROTATION: usize = SHAPE_SIDE * SHAPE_SIDE;

/// Default pixel side length of one grid cell.
pub const DEFAULT_GRID: i32 = 20;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GREY: Rgb = Rgb::new(128, 128, 128);
    pub const RED: Rgb = Rgb::new(220, 60, 60);
    pub const GREEN: Rgb = Rgb::new(100, 220, 120);
    pub const BLUE: Rgb = Rgb::new(80, 120, 220);
    pub const CYAN: Rgb = Rgb::new(80, 220, 220);
    pub const YELLOW: Rgb = Rgb::new(240, 220, 80);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const PURPLE: Rgb = Rgb::new(200, 120, 220);
    /// Conventional chroma-key color for "no pixel".
    pub const PINK: Rgb = Rgb::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a color name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_tetris_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_name("red"), Some(Rgb::RED));
    /// assert_eq!(Rgb::from_name("PINK"), Some(Rgb::PINK));
    /// assert_eq!(Rgb::from_name("mauve"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "black" => Some(Rgb::BLACK),
            "white" => Some(Rgb::WHITE),
            "grey" | "gray" => Some(Rgb::GREY),
            "red" => Some(Rgb::RED),
            "green" => Some(Rgb::GREEN),
            "blue" => Some(Rgb::BLUE),
            "cyan" => Some(Rgb::CYAN),
            "yellow" => Some(Rgb::YELLOW),
            "orange" => Some(Rgb::ORANGE),
            "purple" | "magenta" => Some(Rgb::PURPLE),
            "pink" => Some(Rgb::PINK),
            _ => None,
        }
    }
}

/// A pixel coordinate on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by another point used as an offset.
    pub fn offset(self, by: Point) -> Self {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

/// An axis-aligned pixel rectangle: origin plus width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn offset(self, by: Point) -> Self {
        Rect::new(self.x + by.x, self.y + by.y, self.w, self.h)
    }
}

/// A logical board cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One cell further in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// Pixel origin of this cell for a given grid cell size.
    pub fn to_pixels(self, grid: i32) -> Point {
        Point::new(self.x * grid, self.y * grid)
    }
}

/// Direction of a piece move.
///
/// Pieces never move up; rotation is a separate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Grid delta `(dx, dy)` for one step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Arrow keys as seen by menus and the piece driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

/// Menu states the selection arrow knows how to drive.
///
/// - **Selection**: up/down moves between entries (main menu)
/// - **Settings**: left/right moves between settings, up/down edits the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    Selection,
    Settings,
}

impl MenuState {
    /// Parse a menu state name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "selection" | "menu" => Some(MenuState::Selection),
            "settings" => Some(MenuState::Settings),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuState::Selection => "selection",
            MenuState::Settings => "settings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_constants() {
        assert_eq!(SHAPE_SIDE, 4);
        assert_eq!(CELLS_PER_ROTATION, 16);
    }

    #[test]
    fn grid_pos_steps_and_pixels() {
        let p = GridPos::new(3, 5);
        assert_eq!(p.step(Direction::Right), GridPos::new(4, 5));
        assert_eq!(p.step(Direction::Down), GridPos::new(3, 6));
        assert_eq!(p.to_pixels(10), Point::new(30, 50));
    }

    #[test]
    fn rect_offset_keeps_size() {
        let r = Rect::new(1, 2, 3, 4).offset(Point::new(10, 20));
        assert_eq!(r, Rect::new(11, 22, 3, 4));
        assert_eq!(r.origin(), Point::new(11, 22));
    }

    #[test]
    fn gray_is_an_alias() {
        assert_eq!(Rgb::from_name("gray"), Rgb::from_name("grey"));
    }
}
