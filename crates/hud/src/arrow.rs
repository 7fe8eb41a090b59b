//! Arrow: the menu selection cursor.
//!
//! The arrow keeps a selection index on a ring `0..=index_max`. Everything it
//! draws (glyph, color, screen position) and the action it points at are
//! derived from an external options table; call [`Arrow::get_data`] after the
//! selection or the table changes.
//!
//! Keys are dispatched through a fixed `(MenuState, Key)` table, see
//! [`dispatch`]. Setting edits are reported back to the caller instead of
//! being applied here.

use log::{trace, warn};
use thiserror::Error;

use grid_tetris_core::{Mask, Surface};

use crate::types::{Key, MenuState, Point, Rgb};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArrowError {
    #[error("menu has no options to select")]
    NoOptions,
    #[error("arrow glyph has no rows")]
    EmptyGlyph,
}

/// One selectable entry: where the arrow goes, its color and what it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowOption<T> {
    pub position: Point,
    pub color: Rgb,
    pub target: T,
}

/// The options table an arrow derives its state from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOptions<T> {
    /// 0/1 pixel mask of the arrow, any size
    pub glyph: Mask,
    pub options: Vec<ArrowOption<T>>,
}

/// What a key does in a given menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Select(i32),
    ChangeSetting(i32),
    Nothing,
}

/// The `(state, key) -> action` table.
pub fn dispatch(state: MenuState, key: Key) -> Dispatch {
    match (state, key) {
        (MenuState::Selection, Key::Up) => Dispatch::Select(-1),
        (MenuState::Selection, Key::Down) => Dispatch::Select(1),
        (MenuState::Settings, Key::Up) => Dispatch::ChangeSetting(1),
        (MenuState::Settings, Key::Down) => Dispatch::ChangeSetting(-1),
        (MenuState::Settings, Key::Left) => Dispatch::Select(-1),
        (MenuState::Settings, Key::Right) => Dispatch::Select(1),
        _ => Dispatch::Nothing,
    }
}

/// Result of [`Arrow::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowAction {
    /// The selection moved to this index.
    Selected(usize),
    /// The caller should change the current setting by this amount.
    ChangeSetting(i32),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrow<T> {
    selection: usize,
    index_max: usize,
    shape: Mask,
    color: Rgb,
    target: T,
    transparent: Rgb,
    previous_position: Point,
    position: Point,
    dirty: bool,
}

impl<T: Clone> Arrow<T> {
    /// Create an arrow on the first option of `menu`.
    pub fn new(menu: &MenuOptions<T>) -> Result<Self, ArrowError> {
        let first = menu.options.first().ok_or(ArrowError::NoOptions)?;
        let mut arrow = Self {
            selection: 0,
            index_max: 0,
            shape: Vec::new(),
            color: first.color,
            target: first.target.clone(),
            transparent: Rgb::PINK,
            previous_position: first.position,
            position: first.position,
            dirty: true,
        };
        arrow.get_data(menu)?;
        Ok(arrow)
    }

    /// Use another chroma-key color for unset glyph pixels.
    pub fn with_transparent(mut self, color: Rgb) -> Self {
        self.transparent = color;
        self
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn index_max(&self) -> usize {
        self.index_max
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn shape(&self) -> &Mask {
        &self.shape
    }

    pub fn transparent_color(&self) -> Rgb {
        self.transparent
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn previous_position(&self) -> Point {
        self.previous_position
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Step the selection, wrapping below 0 to `index_max` and above
    /// `index_max` to 0.
    pub fn update_selection(&mut self, direction: i32) {
        let next = self.selection as i64 + i64::from(direction);
        self.selection = if next < 0 {
            self.index_max
        } else if next > self.index_max as i64 {
            0
        } else {
            next as usize
        };
        self.previous_position = self.position;
        self.dirty = true;
        trace!("arrow selection -> {}", self.selection);
    }

    /// Apply a key according to [`dispatch`].
    pub fn handle_key(&mut self, key: Key, state: MenuState) -> ArrowAction {
        match dispatch(state, key) {
            Dispatch::Select(direction) => {
                self.update_selection(direction);
                ArrowAction::Selected(self.selection)
            }
            Dispatch::ChangeSetting(delta) => ArrowAction::ChangeSetting(delta),
            Dispatch::Nothing => ArrowAction::Ignored,
        }
    }

    /// Re-derive glyph, color, target and position from `menu` at the current
    /// selection.
    pub fn get_data(&mut self, menu: &MenuOptions<T>) -> Result<(), ArrowError> {
        if menu.options.is_empty() {
            return Err(ArrowError::NoOptions);
        }
        if menu.glyph.is_empty() {
            return Err(ArrowError::EmptyGlyph);
        }
        self.index_max = menu.options.len() - 1;
        if self.selection > self.index_max {
            warn!(
                "arrow selection {} beyond {} options, clamping",
                self.selection,
                menu.options.len()
            );
            self.selection = self.index_max;
        }
        let option = &menu.options[self.selection];
        self.shape.clone_from(&menu.glyph);
        self.position = option.position;
        self.color = option.color;
        self.target = option.target.clone();
        self.dirty = true;
        Ok(())
    }

    /// Draw the glyph pixel by pixel at the local origin: set pixels in the
    /// arrow color, unset pixels in the transparent key color.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for (row, line) in self.shape.iter().enumerate() {
            for (col, &v) in line.iter().enumerate() {
                let color = if v == 1 { self.color } else { self.transparent };
                surface.draw_pixel(Point::new(col as i32, row as i32), color);
            }
        }
        self.dirty = false;
    }
}
