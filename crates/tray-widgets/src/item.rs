#![forbid(unsafe_code)]

//! A single draggable row.
//!
//! Only the handle starts a drag. The handle cells are
//! [`DraggableItem::handle_rect`], the same rectangle
//! [`BoardLayout`](crate::layout::BoardLayout) arms drags from, so the rest of
//! the row stays free for the host's own clicks.
//! While the item is the active drag source the whole row is drawn dim and
//! italic (the terminal stand-in for a faded, tilted card).

use tray_core::geometry::Rect;
use tray_render::cell::CellFlags;
use tray_render::frame::Frame;

use crate::Widget;
use crate::context::DragContext;
use crate::id::DragKind;
use crate::layout::HANDLE_WIDTH;

/// Handle glyph used when none is configured.
pub const DEFAULT_HANDLE: &str = "⠿";

/// Attributes applied to the row being dragged.
pub const DRAGGING_FLAGS: CellFlags = CellFlags::DIM.union(CellFlags::ITALIC);

/// A draggable item row.
#[derive(Debug, Clone)]
pub struct DraggableItem<'a> {
    id: &'a str,
    label: &'a str,
    context: &'a DragContext,
    handle_glyph: &'a str,
}

impl<'a> DraggableItem<'a> {
    pub fn new(id: &'a str, label: &'a str, context: &'a DragContext) -> Self {
        Self {
            id,
            label,
            context,
            handle_glyph: DEFAULT_HANDLE,
        }
    }

    #[must_use]
    pub fn handle_glyph(mut self, glyph: &'a str) -> Self {
        self.handle_glyph = glyph;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.context.is_active(DragKind::Item, self.id)
    }

    /// Handle cells of a row drawn at `area`.
    pub fn handle_rect(area: Rect) -> Rect {
        Rect::new(area.x, area.y, HANDLE_WIDTH.min(area.width), area.height.min(1))
    }
}

impl Widget for DraggableItem<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let row = Rect::new(area.x, area.y, area.width, 1);
        let handle = Self::handle_rect(row);

        frame
            .buffer
            .set_string(row.x, row.y, self.handle_glyph, CellFlags::DIM, handle.width);
        let label_x = row.x.saturating_add(HANDLE_WIDTH);
        let label_width = row.width.saturating_sub(HANDLE_WIDTH);
        frame
            .buffer
            .set_string(label_x, row.y, self.label, CellFlags::empty(), label_width);

        if self.is_dragging() {
            frame.buffer.apply_flags(row, DRAGGING_FLAGS);
        }
    }
}
