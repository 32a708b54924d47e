#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, and frames.
//!
//! # Role in tray
//! `tray-render` is the surface the reorder widgets draw into. A
//! [`Frame`](frame::Frame) wraps a [`Buffer`](buffer::Buffer) of styled
//! cells for one render pass.
//!
//! Output is plain text plus per-cell style flags; presenting it to a real
//! terminal is the host's concern.

pub mod buffer;
pub mod cell;
pub mod frame;

/// Display width of a single character in cells.
#[inline]
pub(crate) fn char_width(ch: char) -> usize {
    unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Display width of a string in cells.
#[inline]
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("Soups"), 5);
        assert_eq!(display_width("寿司"), 4);
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('\u{0301}'), 0);
    }
}
