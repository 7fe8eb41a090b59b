//! Core object model - pieces, shape tables and the playfield
//!
//! This crate holds the piece encoding and rotation model plus the occupancy
//! grid pieces settle into. It has no dependency on any terminal, window or
//! audio backend: drawing goes through the [`Surface`] trait and fit checks
//! go through the [`Collision`] trait.
//!
//! # Module Structure
//!
//! - [`shape`]: ragged rotation masks encoded into one flat, fixed-stride table
//! - [`piece`]: a falling piece with its rotation state machine and draw projection
//! - [`collision`]: the capability a piece consults before moving or rotating
//! - [`playfield`]: walls and locked cells; the concrete collision rules
//! - [`pieces`]: piece definitions and the seven standard tetrominoes
//! - [`rng`]: deterministic bag randomizer that spawns pieces from a catalog
//! - [`surface`]: primitive drawing capability, recording surface, translation
//!
//! # Frame Model
//!
//! Everything is single-threaded and frame-driven. Between frames the driver
//! mutates state (`try_move`, `rotate`, `lock`); each mutation sets the
//! drawable's dirty flag. During the render pass `draw` issues primitive calls
//! and clears the flag. Drawing is idempotent, so calling it on a clean
//! drawable is harmless.
//!
//! # Example
//!
//! ```
//! use grid_tetris_core::{Piece, Playfield, RecordingSurface, Outcome};
//! use grid_tetris_types::{Direction, GridPos, Rect, Rgb};
//!
//! // An I piece whose horizontal rotation lists a single row
//! let mut piece = Piece::new(
//!     "I",
//!     Rgb::CYAN,
//!     &[vec![vec![1, 1, 1, 1]], vec![vec![0, 1], vec![0, 1], vec![0, 1], vec![0, 1]]],
//!     GridPos::new(1, 0),
//! )
//! .unwrap();
//!
//! // A 10 x 11 cell field: walls on the left, right and bottom
//! let field = Playfield::new(10, 11);
//! assert_eq!(piece.try_move(Direction::Left, &field), Outcome::Blocked);
//! assert_eq!(piece.try_move(Direction::Down, &field), Outcome::Moved);
//!
//! let mut surface = RecordingSurface::new();
//! piece.draw(&mut surface, 20);
//! assert_eq!(surface.rectangles()[0], (Rect::new(20, 20, 20, 20), Rgb::CYAN));
//! ```

pub mod collision;
pub mod piece;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod shape;
pub mod surface;

pub use grid_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::{Collision, Unbounded};
pub use piece::{Outcome, Piece, PieceCells, PieceError};
pub use pieces::{spawn_position, standard_pieces, PieceDef, SPAWN_POSITION};
pub use playfield::{Playfield, Slot};
pub use rng::{SimpleRng, Spawner};
pub use shape::{Mask, ShapeTable};
pub use surface::{DrawCall, RecordingSurface, Surface, Translate};
