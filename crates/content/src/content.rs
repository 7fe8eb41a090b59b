//! Content module - JSON definitions of pieces, menus and HUD layout
//!
//! The raw document types mirror the JSON one to one. [`Content::from_json`]
//! resolves them into the HUD and core types, failing on the first unknown
//! color, bad menu or empty piece list.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use grid_tetris_core::{Mask, PieceDef, PieceError};
use grid_tetris_hud::{ArrowError, ArrowOption, Board, MenuOptions, StatEntry, StatsPanel};

use crate::config::Config;
use crate::types::{MenuState, Point, Rect, Rgb, DEFAULT_GRID};

/// Built-in content, laid out for a terminal (one grid cell per character).
pub const BUILTIN_CONTENT: &str = include_str!("../assets/default.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown color name '{0}'")]
    UnknownColor(String),
    #[error("unknown menu state '{0}'")]
    UnknownMenuState(String),
    #[error("grid size must be positive, got {0}")]
    BadGrid(i32),
    #[error("content defines no pieces")]
    NoPieces,
    #[error("piece '{name}': {source}")]
    Piece {
        name: String,
        #[source]
        source: PieceError,
    },
    #[error("menu '{menu}': {source}")]
    Arrow {
        menu: String,
        #[source]
        source: ArrowError,
    },
}

/// A color as written in content: a name or an `[r, g, b]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Rgb([u8; 3]),
    Name(String),
}

impl ColorDef {
    pub fn resolve(&self) -> Result<Rgb, ContentError> {
        match self {
            ColorDef::Rgb([r, g, b]) => Ok(Rgb::new(*r, *g, *b)),
            ColorDef::Name(name) => {
                Rgb::from_name(name).ok_or_else(|| ContentError::UnknownColor(name.clone()))
            }
        }
    }
}

/// What a menu option leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuTarget {
    Play,
    Settings,
    Quit,
    Speed,
    Debug,
    Back,
}

// ============== Raw document ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDoc {
    #[serde(default = "default_grid")]
    pub grid: i32,
    #[serde(default = "default_border")]
    pub border_color: ColorDef,
    pub board: BoardDoc,
    pub stats: StatsDoc,
    pub pieces: Vec<PieceDoc>,
    pub menus: MenusDoc,
}

fn default_grid() -> i32 {
    DEFAULT_GRID
}

fn default_border() -> ColorDef {
    ColorDef::Name("grey".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDoc {
    pub surface_size: [i32; 2],
    pub surface_position: [i32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDoc {
    pub surface_size: [i32; 2],
    pub surface_position: [i32; 2],
    pub position_next: [i32; 2],
    pub size_next: [i32; 2],
    /// `[title, [x, y], value key or null]`
    #[serde(default)]
    pub stats: Vec<(String, [i32; 2], Option<String>)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceDoc {
    pub name: String,
    pub color: ColorDef,
    /// One ragged mask per rotation.
    pub shape: Vec<Mask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenusDoc {
    pub main: MenuDoc,
    pub settings: MenuDoc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDoc {
    pub state: String,
    #[serde(default = "default_transparent")]
    pub transparent: ColorDef,
    pub arrowshape: Mask,
    /// `[[x, y], color, target]`
    pub arrowselect: Vec<([i32; 2], ColorDef, MenuTarget)>,
    #[serde(default)]
    pub labels: Vec<(String, [i32; 2])>,
}

fn default_transparent() -> ColorDef {
    ColorDef::Name("pink".to_string())
}

// ============== Resolved content ==============

/// Static text drawn next to menu options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub state: MenuState,
    pub options: MenuOptions<MenuTarget>,
    pub labels: Vec<Label>,
    pub transparent: Rgb,
}

#[derive(Debug, Clone)]
pub struct Content {
    pub grid: i32,
    pub border_color: Rgb,
    pub board: Board,
    pub stats: StatsPanel,
    pub pieces: Vec<PieceDef>,
    pub main_menu: Menu,
    pub settings_menu: Menu,
}

fn point([x, y]: [i32; 2]) -> Point {
    Point::new(x, y)
}

impl Content {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_CONTENT)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loading content from {}", path.display());
        Self::from_json(&text)
    }

    /// Load the configured content file (or the built-in one) and apply the
    /// grid override.
    pub fn from_config(config: &Config) -> Result<Self, ContentError> {
        let mut content = match &config.content_path {
            Some(path) => Self::load(path)?,
            None => Self::builtin()?,
        };
        if let Some(grid) = config.grid {
            content.grid = grid;
        }
        Ok(content)
    }

    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let doc: ContentDoc = serde_json::from_str(text)?;
        doc.resolve()
    }

    pub fn piece(&self, name: &str) -> Option<&PieceDef> {
        self.pieces.iter().find(|p| p.name == name)
    }
}

impl ContentDoc {
    pub fn resolve(self) -> Result<Content, ContentError> {
        if self.grid <= 0 {
            return Err(ContentError::BadGrid(self.grid));
        }
        if self.pieces.is_empty() {
            return Err(ContentError::NoPieces);
        }

        let board = Board::new(
            (self.board.surface_size[0], self.board.surface_size[1]),
            point(self.board.surface_position),
        );

        let entries = self
            .stats
            .stats
            .iter()
            .map(|(title, pos, key)| StatEntry::new(title.as_str(), point(*pos), key.as_deref()))
            .collect();
        let next_box = Rect::new(
            self.stats.position_next[0],
            self.stats.position_next[1],
            self.stats.size_next[0],
            self.stats.size_next[1],
        );
        let stats = StatsPanel::new(
            (self.stats.surface_size[0], self.stats.surface_size[1]),
            point(self.stats.surface_position),
            next_box,
            entries,
        );

        let pieces = self
            .pieces
            .into_iter()
            .map(PieceDoc::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("resolved {} piece definitions", pieces.len());

        Ok(Content {
            grid: self.grid,
            border_color: self.border_color.resolve()?,
            board,
            stats,
            pieces,
            main_menu: self.menus.main.resolve("main")?,
            settings_menu: self.menus.settings.resolve("settings")?,
        })
    }
}

impl PieceDoc {
    pub fn resolve(self) -> Result<PieceDef, ContentError> {
        let def = PieceDef::new(self.name, self.color.resolve()?, self.shape);
        if def.rotation_count() == 0 {
            return Err(ContentError::Piece {
                source: PieceError::NoRotations(def.name.clone()),
                name: def.name,
            });
        }
        Ok(def)
    }
}

impl MenuDoc {
    pub fn resolve(self, menu: &str) -> Result<Menu, ContentError> {
        let state = MenuState::from_str(&self.state)
            .ok_or_else(|| ContentError::UnknownMenuState(self.state.clone()))?;
        let arrow_err = |source| ContentError::Arrow {
            menu: menu.to_string(),
            source,
        };
        if self.arrowselect.is_empty() {
            return Err(arrow_err(ArrowError::NoOptions));
        }
        if self.arrowshape.is_empty() {
            return Err(arrow_err(ArrowError::EmptyGlyph));
        }

        let options = self
            .arrowselect
            .iter()
            .map(|(pos, color, target)| -> Result<_, ContentError> {
                Ok(ArrowOption {
                    position: point(*pos),
                    color: color.resolve()?,
                    target: *target,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Menu {
            state,
            options: MenuOptions {
                glyph: self.arrowshape,
                options,
            },
            labels: self
                .labels
                .into_iter()
                .map(|(text, pos)| Label {
                    text,
                    position: point(pos),
                })
                .collect(),
            transparent: self.transparent.resolve()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_resolves() {
        let content = Content::builtin().unwrap();
        assert_eq!(content.grid, 1);
        assert_eq!(content.pieces.len(), 7);
        assert_eq!(content.piece("T").unwrap().rotation_count(), 4);
        assert_eq!(content.main_menu.state, MenuState::Selection);
        assert_eq!(content.settings_menu.state, MenuState::Settings);
        assert_eq!(
            content.main_menu.options.options[0].target,
            MenuTarget::Play
        );
    }

    #[test]
    fn colors_accept_names_and_triples() {
        assert_eq!(ColorDef::Name("Cyan".into()).resolve().unwrap(), Rgb::CYAN);
        assert_eq!(
            ColorDef::Rgb([1, 2, 3]).resolve().unwrap(),
            Rgb::new(1, 2, 3)
        );
        assert!(matches!(
            ColorDef::Name("mauve".into()).resolve(),
            Err(ContentError::UnknownColor(name)) if name == "mauve"
        ));
    }

    #[test]
    fn color_def_parses_untagged() {
        let c: ColorDef = serde_json::from_str("[10, 20, 30]").unwrap();
        assert_eq!(c, ColorDef::Rgb([10, 20, 30]));
        let c: ColorDef = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(c, ColorDef::Name("red".into()));
    }

    #[test]
    fn piece_without_rotations_is_rejected() {
        let doc = PieceDoc {
            name: "X".into(),
            color: ColorDef::Name("red".into()),
            shape: vec![],
        };
        assert!(matches!(
            doc.resolve(),
            Err(ContentError::Piece { name, source: PieceError::NoRotations(_) }) if name == "X"
        ));
    }

    #[test]
    fn menu_without_options_is_rejected() {
        let doc = MenuDoc {
            state: "selection".into(),
            transparent: default_transparent(),
            arrowshape: vec![vec![1]],
            arrowselect: vec![],
            labels: vec![],
        };
        assert!(matches!(
            doc.resolve("main"),
            Err(ContentError::Arrow { source: ArrowError::NoOptions, .. })
        ));
    }

    #[test]
    fn unknown_menu_state_is_rejected() {
        let doc = MenuDoc {
            state: "paused".into(),
            transparent: default_transparent(),
            arrowshape: vec![vec![1]],
            arrowselect: vec![([0, 0], ColorDef::Name("white".into()), MenuTarget::Play)],
            labels: vec![],
        };
        assert!(matches!(
            doc.resolve("main"),
            Err(ContentError::UnknownMenuState(s)) if s == "paused"
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Content::load("/nonexistent/grid-tetris.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/grid-tetris.json"));
    }

    #[test]
    fn config_grid_override_applies() {
        let config = Config {
            grid: Some(20),
            ..Config::default()
        };
        assert_eq!(Content::from_config(&config).unwrap().grid, 20);
    }
}
