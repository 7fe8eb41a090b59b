//! Terminal rendering backend.
//!
//! [`FrameBuffer`] implements the core [`Surface`](grid_tetris_core::Surface)
//! trait over a grid of styled character cells; [`TerminalRenderer`] flushes
//! it to a real terminal through `crossterm`, emitting only changed runs after
//! the first frame.

pub mod fb;
pub mod renderer;

pub use grid_tetris_core as core;
pub use grid_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, BLOCK};
pub use renderer::{encode_changes, encode_frame, TerminalRenderer};
