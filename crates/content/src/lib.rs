//! Game content and runtime configuration.
//!
//! Piece definitions, menu option tables and HUD layout are data, loaded from
//! JSON (or the built-in default) and resolved into the core and HUD types.
//!
//! ```
//! use grid_tetris_content::Content;
//!
//! let content = Content::builtin().unwrap();
//! assert_eq!(content.pieces.len(), 7);
//! ```

pub mod config;
pub mod content;

pub use grid_tetris_types as types;

pub use config::Config;
pub use content::{
    ColorDef, Content, ContentDoc, ContentError, Label, Menu, MenuTarget, BUILTIN_CONTENT,
};
