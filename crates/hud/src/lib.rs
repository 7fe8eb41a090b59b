//! HUD panels drawn around the playfield.
//!
//! Each panel owns its layout and a dirty flag, takes the target surface and
//! grid cell size per `draw` call, and draws in its own local coordinates.
//! The driver places a panel on screen by drawing through a
//! [`Translate`](grid_tetris_core::Translate) at the panel's surface position.
//!
//! - [`Board`]: left wall, floor and right wall, plus an optional debug grid
//! - [`StatsPanel`]: next-piece box and titled values pulled from the game
//! - [`Arrow`]: menu cursor with a wrap-around selection and a fixed key table

pub mod arrow;
pub mod board;
pub mod stats;

pub use grid_tetris_core as core;
pub use grid_tetris_types as types;

pub use arrow::{dispatch, Arrow, ArrowAction, ArrowError, ArrowOption, Dispatch, MenuOptions};
pub use board::{Board, DEBUG_GRID_COLOR};
pub use stats::{StatEntry, StatValues, StatsPanel};
