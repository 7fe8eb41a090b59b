//! Surface module - the drawing capability every drawable renders through
//!
//! Drawables never own a surface. The driver passes one to `draw` each frame
//! and the drawable issues primitive calls against it. Concrete surfaces live
//! outside the core (the terminal framebuffer in `grid-tetris-term`); this
//! module only holds the trait and two small adapters:
//!
//! - [`RecordingSurface`] keeps every call as a [`DrawCall`], which makes draw
//!   output comparable in tests.
//! - [`Translate`] shifts every call by an origin, standing in for blitting a
//!   per-drawable surface at its `surface_position`.

use crate::types::{Point, Rect, Rgb};

/// Primitive drawing operations supplied by a rendering backend.
///
/// Text rendering is part of the surface: the surface owns whatever font it
/// uses, callers only supply the position, the text and an optional color.
pub trait Surface {
    fn draw_rectangle(&mut self, rect: Rect, color: Rgb);
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb);
    fn draw_pixel(&mut self, at: Point, color: Rgb);
    fn draw_text(&mut self, at: Point, text: &str, color: Option<Rgb>);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw_rectangle(&mut self, rect: Rect, color: Rgb) {
        (**self).draw_rectangle(rect, color);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        (**self).draw_line(from, to, color);
    }

    fn draw_pixel(&mut self, at: Point, color: Rgb) {
        (**self).draw_pixel(at, color);
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Option<Rgb>) {
        (**self).draw_text(at, text, color);
    }
}

/// One primitive call as seen by a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Rectangle { rect: Rect, color: Rgb },
    Line { from: Point, to: Point, color: Rgb },
    Pixel { at: Point, color: Rgb },
    Text { at: Point, text: String, color: Option<Rgb> },
}

/// A surface that records calls instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Recorded rectangles only, in call order.
    pub fn rectangles(&self) -> Vec<(Rect, Rgb)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rectangle { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Recorded text calls only, in call order.
    pub fn texts(&self) -> Vec<(Point, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { at, text, .. } => Some((*at, text.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_rectangle(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(DrawCall::Rectangle { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn draw_pixel(&mut self, at: Point, color: Rgb) {
        self.calls.push(DrawCall::Pixel { at, color });
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Option<Rgb>) {
        self.calls.push(DrawCall::Text {
            at,
            text: text.to_string(),
            color,
        });
    }
}

/// Offsets every call by `origin` before forwarding it.
pub struct Translate<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    origin: Point,
}

impl<'a, S: Surface + ?Sized> Translate<'a, S> {
    pub fn new(inner: &'a mut S, origin: Point) -> Self {
        Self { inner, origin }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}

impl<S: Surface + ?Sized> Surface for Translate<'_, S> {
    fn draw_rectangle(&mut self, rect: Rect, color: Rgb) {
        self.inner.draw_rectangle(rect.offset(self.origin), color);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        self.inner
            .draw_line(from.offset(self.origin), to.offset(self.origin), color);
    }

    fn draw_pixel(&mut self, at: Point, color: Rgb) {
        self.inner.draw_pixel(at.offset(self.origin), color);
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Option<Rgb>) {
        self.inner.draw_text(at.offset(self.origin), text, color);
    }
}
