//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: queue cursor move (only if needed), style changes (only
//!      if they differ from the last emitted style) and the character
//! 3. Flush the writer once
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::FrameBuffer;
use crate::layout::char_width;
use crate::types::{Attr, Cell, Rgba};

/// Last style and cursor position written to the terminal.
#[derive(Debug, Default)]
struct EmitState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
}

/// Differential renderer for fullscreen mode.
///
/// Keeps track of the previous frame to enable diff-based rendering.
/// Only cells that have changed since the last frame are output.
pub struct DiffRenderer<W: Write> {
    writer: W,
    emit: EmitState,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<io::Stdout> {
    /// Renderer writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DiffRenderer<W> {
    /// Create a new diff renderer over a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            emit: EmitState::default(),
            previous: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;
        queue!(self.writer, BeginSynchronizedUpdate)?;
        self.emit = EmitState::default();

        let width = buffer.width();
        let height = buffer.height();
        let comparable = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        for y in 0..height {
            for x in 0..width {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };

                let changed = match comparable.and_then(|prev| prev.get(x, y)) {
                    Some(prev_cell) => !cells_equal(cell, prev_cell),
                    None => true,
                };

                if changed {
                    has_changes = true;
                    render_cell(&mut self.writer, &mut self.emit, x, y, cell)?;
                }
            }
        }

        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        self.writer.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

/// Queue one cell, emitting only the escape codes that differ from the
/// terminal's current state.
fn render_cell<W: Write>(
    out: &mut W,
    emit: &mut EmitState,
    x: u16,
    y: u16,
    cell: &Cell,
) -> io::Result<()> {
    // Continuation of a wide char printed in the previous column
    if cell.ch == '\0' {
        return Ok(());
    }

    if emit.cursor != Some((x, y)) {
        queue!(out, MoveTo(x, y))?;
    }

    if emit.attrs != Some(cell.attrs) {
        // Attribute reset also clears colors
        queue!(out, SetAttribute(Attribute::Reset))?;
        for (flag, attribute) in [
            (Attr::BOLD, Attribute::Bold),
            (Attr::DIM, Attribute::Dim),
            (Attr::ITALIC, Attribute::Italic),
            (Attr::UNDERLINE, Attribute::Underlined),
            (Attr::INVERSE, Attribute::Reverse),
        ] {
            if cell.attrs.contains(flag) {
                queue!(out, SetAttribute(attribute))?;
            }
        }
        emit.attrs = Some(cell.attrs);
        emit.fg = None;
        emit.bg = None;
    }

    if emit.fg != Some(cell.fg) {
        queue!(out, SetForegroundColor(to_color(cell.fg)))?;
        emit.fg = Some(cell.fg);
    }
    if emit.bg != Some(cell.bg) {
        queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
        emit.bg = Some(cell.bg);
    }

    queue!(out, Print(cell.ch))?;
    let advance = char_width(cell.ch).max(1);
    emit.cursor = Some((x.saturating_add(advance), y));
    Ok(())
}

/// Convert our color to crossterm's.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

/// Fast cell equality check.
#[inline]
fn cells_equal(a: &Cell, b: &Cell) -> bool {
    a.ch == b.ch && a.attrs == b.attrs && a.fg == b.fg && a.bg == b.bg
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_renderer_creation() {
        let renderer = DiffRenderer::new(Vec::new());
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_cells_equal() {
        let a = Cell {
            ch: 'X',
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
            attrs: Attr::BOLD,
        };
        let b = a;
        assert!(cells_equal(&a, &b));

        let c = Cell { ch: 'Y', ..a };
        assert!(!cells_equal(&a, &c));
    }

    #[test]
    fn test_second_render_of_same_frame_is_empty_diff() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let mut buffer = FrameBuffer::new(6, 2);
        buffer.draw_text(0, 0, "hello", Rgba::WHITE, None, Attr::NONE, None);

        assert!(renderer.render(&buffer).unwrap());
        assert!(renderer.has_previous());
        assert!(!renderer.render(&buffer).unwrap());
    }

    #[test]
    fn test_only_changed_cells_written() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let mut buffer = FrameBuffer::new(6, 1);
        buffer.draw_text(0, 0, "abcdef", Rgba::WHITE, None, Attr::NONE, None);
        renderer.render(&buffer).unwrap();

        let before = renderer.writer().len();
        buffer.draw_text(3, 0, "Z", Rgba::WHITE, None, Attr::NONE, None);
        renderer.render(&buffer).unwrap();

        let written = String::from_utf8_lossy(&renderer.writer()[before..]).into_owned();
        assert!(written.contains('Z'));
        assert!(!written.contains('a'));
        assert!(!written.contains('f'));
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = DiffRenderer::new(Vec::new());
        renderer.render(&FrameBuffer::new(3, 3)).unwrap();
        assert!(renderer.has_previous());

        renderer.invalidate();
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
