//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. All drawing operations work on this buffer.
//!
//! # Design Decisions
//!
//! - **Flat storage**: Uses `Vec<Cell>` with row-major indexing for cache efficiency.
//! - **Clipping**: All drawing functions accept an optional `ClipRect`.
//! - **Background passthrough**: `bg: None` keeps whatever background the cell already has.
//! - **Wide characters**: CJK characters use continuation markers (`'\0'`).

use crate::layout::{char_width, string_width};
use crate::types::{Attr, BorderStyle, Cell, ClipRect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Text content of one row, continuation cells skipped.
    ///
    /// Handy for asserting on frames without a terminal.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|cell| cell.ch != '\0')
            .map(|cell| cell.ch)
            .collect()
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    #[allow(clippy::too_many_arguments)]
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.ch = ch;
        cell.fg = fg;
        if let Some(bg) = bg {
            cell.bg = bg;
        }
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        bg: Rgba,
        clip: Option<&ClipRect>,
    ) {
        let area = ClipRect::new(x, y, width, height);
        let Some(area) = area.intersect(&self.bounds()) else {
            return;
        };
        let area = match clip {
            Some(clip) => match area.intersect(clip) {
                Some(area) => area,
                None => return,
            },
            None => area,
        };

        for row in area.y..area.y + area.height {
            let row_start = self.index(area.x, row);
            let row_end = row_start + area.width as usize;
            for cell in &mut self.cells[row_start..row_end] {
                cell.ch = ' ';
                cell.bg = bg;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used (handles wide characters).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let width = char_width(ch);
            if width == 0 {
                continue;
            }

            if self.set_cell(col, y, ch, fg, bg, attrs, clip) && width == 2 {
                let next_visible = clip.map_or(true, |c| c.contains(col + 1, y));
                if next_visible {
                    if let Some(next) = self.get_mut(col + 1, y) {
                        next.ch = '\0';
                        next.fg = fg;
                        if let Some(bg) = bg {
                            next.bg = bg;
                        }
                        next.attrs = attrs;
                    }
                }
            }

            col = col.saturating_add(width);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within a width.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let text_width = string_width(text);
        if text_width >= width {
            return self.draw_text(x, y, text, fg, bg, attrs, clip);
        }
        let offset = (width - text_width) / 2;
        self.draw_text(x.saturating_add(offset), y, text, fg, bg, attrs, clip)
    }

    /// Draw a border around a rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_border(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        style: BorderStyle,
        color: Rgba,
        bg: Option<Rgba>,
        clip: Option<&ClipRect>,
    ) {
        if width < 2 || height < 2 || style == BorderStyle::None {
            return;
        }
        if x >= self.width || y >= self.height {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let x2 = x.saturating_add(width - 1);
        let y2 = y.saturating_add(height - 1);

        self.set_cell(x, y, tl, color, bg, Attr::NONE, clip);
        self.set_cell(x2, y, tr, color, bg, Attr::NONE, clip);
        self.set_cell(x2, y2, br, color, bg, Attr::NONE, clip);
        self.set_cell(x, y2, bl, color, bg, Attr::NONE, clip);

        for col in x.saturating_add(1)..x2 {
            self.set_cell(col, y, horiz, color, bg, Attr::NONE, clip);
            self.set_cell(col, y2, horiz, color, bg, Attr::NONE, clip);
        }

        for row in y.saturating_add(1)..y2 {
            self.set_cell(x, row, vert, color, bg, Attr::NONE, clip);
            self.set_cell(x2, row, vert, color, bg, Attr::NONE, clip);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
