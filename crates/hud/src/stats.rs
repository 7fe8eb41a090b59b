//! Stats panel: next-piece box plus titled values.
//!
//! The panel owns layout only. Values come from a [`StatValues`] source at
//! draw time, so the game state stays the single owner of score-like data.

use std::collections::HashMap;

use grid_tetris_core::Surface;

use crate::types::{GridPos, Point, Rect, Rgb};

/// One titled line of the panel.
///
/// `value` is the key looked up in the [`StatValues`] source; entries without
/// a key are plain labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub title: String,
    pub position: Point,
    pub value: Option<String>,
}

impl StatEntry {
    pub fn new(title: impl Into<String>, position: Point, value: Option<&str>) -> Self {
        Self {
            title: title.into(),
            position,
            value: value.map(str::to_string),
        }
    }
}

/// Source of displayed values, keyed by the entries' value keys.
pub trait StatValues {
    fn stat(&self, key: &str) -> Option<String>;
}

impl<F> StatValues for F
where
    F: Fn(&str) -> Option<String>,
{
    fn stat(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl StatValues for HashMap<String, String> {
    fn stat(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    surface_size: (i32, i32),
    surface_position: Point,
    next_box: Rect,
    entries: Vec<StatEntry>,
    box_color: Rgb,
    value_color: Rgb,
    dirty: bool,
}

impl StatsPanel {
    pub fn new(
        surface_size: (i32, i32),
        surface_position: Point,
        next_box: Rect,
        entries: Vec<StatEntry>,
    ) -> Self {
        Self {
            surface_size,
            surface_position,
            next_box,
            entries,
            box_color: Rgb::GREY,
            value_color: Rgb::WHITE,
            dirty: true,
        }
    }

    pub fn with_colors(mut self, box_color: Rgb, value_color: Rgb) -> Self {
        self.box_color = box_color;
        self.value_color = value_color;
        self
    }

    pub fn surface_size(&self) -> (i32, i32) {
        self.surface_size
    }

    pub fn surface_position(&self) -> Point {
        self.surface_position
    }

    pub fn next_box(&self) -> Rect {
        self.next_box
    }

    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Values are external, so the driver flags changes it knows about.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Left edge, bottom edge and right edge of the next-piece box.
    pub fn next_box_rects(&self, grid: i32) -> [Rect; 3] {
        let Rect { x, y, w, h } = self.next_box;
        [
            Rect::new(x, y, grid, h),
            Rect::new(x, y + h - grid, w, grid),
            Rect::new(x + w - grid, y, grid, h),
        ]
    }

    /// Grid cell where a preview piece's 4x4 box should be anchored: one cell
    /// in from the left edge, level with the top of the box.
    pub fn preview_anchor(&self, grid: i32) -> GridPos {
        if grid <= 0 {
            return GridPos::default();
        }
        GridPos::new(self.next_box.x / grid + 1, self.next_box.y / grid)
    }

    pub fn draw<S, V>(&mut self, surface: &mut S, grid: i32, values: &V)
    where
        S: Surface + ?Sized,
        V: StatValues + ?Sized,
    {
        for rect in self.next_box_rects(grid) {
            surface.draw_rectangle(rect, self.box_color);
        }
        for entry in &self.entries {
            surface.draw_text(entry.position, &entry.title, None);
            let Some(key) = entry.value.as_deref() else {
                continue;
            };
            if let Some(value) = values.stat(key) {
                let below = Point::new(entry.position.x, entry.position.y + grid);
                surface.draw_text(below, &value, Some(self.value_color));
            }
        }
        self.dirty = false;
    }
}
