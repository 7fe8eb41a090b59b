//! Grid Tetris (workspace facade crate).
//!
//! Re-exports the member crates under short names and adds the [`app`] module,
//! which wires pieces, HUD panels and menus into the screens the terminal
//! binary runs.

pub mod app;

pub use grid_tetris_content as content;
pub use grid_tetris_core as core;
pub use grid_tetris_hud as hud;
pub use grid_tetris_input as input;
pub use grid_tetris_term as term;
pub use grid_tetris_types as types;
