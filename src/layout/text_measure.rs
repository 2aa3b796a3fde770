//! Text Measurement
//!
//! Display widths in terminal cells, via `unicode-width`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of one character (0 for control characters).
#[inline]
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Display width of a string in cells.
pub fn string_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Longest prefix of `s` that fits in `max_width` cells.
pub fn truncate_to_width(s: &str, max_width: u16) -> &str {
    let mut used = 0u16;
    for (byte_idx, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > max_width {
            return &s[..byte_idx];
        }
        used += w;
    }
    s
}
