//! Runtime configuration from environment variables.

use std::path::PathBuf;

/// Settings the driver reads once at startup.
///
/// - `GRID_TETRIS_CONTENT`: content JSON path (default: built-in content)
/// - `GRID_TETRIS_GRID`: grid cell size override
/// - `GRID_TETRIS_DEBUG`: `1` or `true` draws the board's debug grid
/// - `GRID_TETRIS_SEED`: randomizer seed (default 1)
/// - `GRID_TETRIS_LOG`: log file path (default: no logging)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub content_path: Option<PathBuf>,
    pub grid: Option<i32>,
    pub debug: bool,
    pub seed: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_path: None,
            grid: None,
            debug: false,
            seed: 1,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let content_path = non_empty("GRID_TETRIS_CONTENT").map(PathBuf::from);

        let grid = non_empty("GRID_TETRIS_GRID")
            .and_then(|s| s.parse().ok())
            .filter(|g: &i32| *g > 0);

        let debug = non_empty("GRID_TETRIS_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let seed = non_empty("GRID_TETRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let log_path = non_empty("GRID_TETRIS_LOG").map(PathBuf::from);

        Self {
            content_path,
            grid,
            debug,
            seed,
            log_path,
        }
    }
}
