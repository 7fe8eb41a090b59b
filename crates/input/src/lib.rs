//! Terminal input module.
//!
//! Maps `crossterm` key events into [`InputCommand`]s. Menus feed the
//! navigation keys through the arrow's dispatch table; the play screen reads
//! them as movement.

pub mod map;

pub use grid_tetris_types as types;

pub use map::{handle_key_event, should_quit, InputCommand};
