#![forbid(unsafe_code)]

//! Frame: the render target for one pass.
//!
//! Widgets draw into [`Frame::buffer`]. Pointer hit testing is not the
//! frame's job; hosts resolve positions against the same layout the widgets
//! were drawn from.
//!
//! # Usage
//!
//! ```
//! use tray_render::frame::Frame;
//!
//! let mut frame = Frame::new(20, 4);
//! frame.buffer.set_string(0, 0, "⠿ Soups", Default::default(), 20);
//! assert_eq!(frame.buffer.row_text(0).trim_end(), "⠿ Soups");
//! ```

use tray_core::geometry::Rect;

use crate::buffer::Buffer;

/// Render target handed to widgets.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset the buffer for the next render pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
