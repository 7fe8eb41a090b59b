//! Terminal output for [`FrameBuffer`]s.
//!
//! Rows go out as styled spans: one color change and one `Print` per stretch
//! of same-styled cells. After the first frame only changed spans are sent,
//! widened to whole surface pixels so a block is never half repainted.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next [`TerminalRenderer::present`] repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previously shown buffer in its place.
    ///
    /// The buffer handed back holds a stale frame; clear it before drawing.
    /// A change of size or scale repaints the whole screen.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let shown = self.shown.take().filter(|prev| {
            prev.width() == fb.width()
                && prev.height() == fb.height()
                && prev.x_scale() == fb.x_scale()
        });
        let mut back = match shown {
            Some(prev) => {
                encode_changes(&prev, fb, &mut self.buf)?;
                prev
            }
            None => {
                encode_frame(fb, &mut self.buf)?;
                fb.clone()
            }
        };
        self.flush_buf()?;
        std::mem::swap(&mut back, fb);
        self.shown = Some(back);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a complete repaint of `fb` into `out`.
pub fn encode_frame(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_span(out, &mut pen, fb, y, 0..fb.width())?;
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only what differs between `prev` and `next`. Both must share size
/// and scale.
pub fn encode_changes(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = None;
    for y in 0..next.height() {
        for span in changed_spans(prev, next, y) {
            out.queue(cursor::MoveTo(span.start, y))?;
            write_span(out, &mut pen, next, y, span)?;
        }
    }
    if pen.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(())
}

/// Column ranges of row `y` that changed, snapped outward to pixel
/// boundaries. Touching ranges are merged.
fn changed_spans(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<Range<u16>> {
    let scale = next.x_scale().max(1);
    let width = next.width();
    let mut spans: Vec<Range<u16>> = Vec::new();
    let mut x = 0;
    while x < width {
        let end = x.saturating_add(scale).min(width);
        if (x..end).any(|cx| prev.get(cx, y) != next.get(cx, y)) {
            match spans.last_mut() {
                Some(last) if last.end == x => last.end = end,
                _ => spans.push(x..end),
            }
        }
        x = end;
    }
    spans
}

/// Print `cols` of row `y`, switching colors only where the style changes.
/// `pen` is the style the terminal currently has, carried across spans.
fn write_span(
    out: &mut Vec<u8>,
    pen: &mut Option<CellStyle>,
    fb: &FrameBuffer,
    y: u16,
    cols: Range<u16>,
) -> Result<()> {
    let mut x = cols.start;
    while x < cols.end {
        let style = fb.get(x, y).unwrap_or_default().style;
        let mut text = String::new();
        while x < cols.end {
            let cell = fb.get(x, y).unwrap_or_default();
            if cell.style != style {
                break;
            }
            text.push(cell.ch);
            x += 1;
        }
        if pen.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if pen.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        *pen = Some(style);
        out.queue(Print(text))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
