#![forbid(unsafe_code)]

//! Floating drag preview drawn near the pointer.
//!
//! The preview shows `Name (n)` for a container and the label for an item.
//! It is clamped to the viewport, is never a drop target, and exists only
//! while a drag is active.

use tray_core::geometry::Rect;
use tray_core::semantic_event::Position;
use tray_render::cell::{Cell, CellFlags};
use tray_render::display_width;
use tray_render::frame::Frame;

use crate::Widget;
use crate::board::Board;
use crate::config::ReorderConfig;
use crate::id::{DragId, DragKind};

/// Text shown for the dragged element, or `None` if it is not on the board.
pub fn preview_label(board: &Board, active: &DragId) -> Option<String> {
    match active.kind {
        DragKind::Container => board
            .container(&active.id)
            .map(|c| format!("{} ({})", c.name, c.items.len())),
        DragKind::Item => board.item(&active.id).map(|i| i.label.clone()),
    }
}

/// Where a preview of `width` cells lands for a pointer at `cursor`.
///
/// Returns `None` if nothing of it would be visible.
pub fn preview_rect(
    width: u16,
    cursor: Position,
    viewport: Rect,
    config: &ReorderConfig,
) -> Option<Rect> {
    let width = width.min(config.preview_width).min(viewport.width);
    if width == 0 || viewport.is_empty() {
        return None;
    }
    let raw_x = i32::from(cursor.x) + i32::from(config.preview_offset_x);
    let raw_y = i32::from(cursor.y) + i32::from(config.preview_offset_y);

    let max_x = i32::from(viewport.right().saturating_sub(width));
    let max_y = i32::from(viewport.bottom().saturating_sub(1));
    let x = raw_x.clamp(i32::from(viewport.x), max_x);
    let y = raw_y.clamp(i32::from(viewport.y), max_y);

    Some(Rect::new(x as u16, y as u16, width, 1))
}

/// Overlay widget for the active drag.
#[derive(Debug, Clone)]
pub struct DragPreview<'a> {
    label: &'a str,
    cursor: Position,
    config: &'a ReorderConfig,
}

impl<'a> DragPreview<'a> {
    pub fn new(label: &'a str, cursor: Position, config: &'a ReorderConfig) -> Self {
        Self {
            label,
            cursor,
            config,
        }
    }

    /// Rectangle the preview occupies inside `viewport`.
    pub fn rect(&self, viewport: Rect) -> Option<Rect> {
        let text_width = display_width(self.label).saturating_add(2);
        preview_rect(
            u16::try_from(text_width).unwrap_or(u16::MAX),
            self.cursor,
            viewport,
            self.config,
        )
    }
}

impl Widget for DragPreview<'_> {
    /// `area` is the viewport the preview is clamped to.
    fn render(&self, area: Rect, frame: &mut Frame) {
        let Some(rect) = self.rect(area) else {
            return;
        };
        let flags = CellFlags::REVERSE | CellFlags::BOLD;
        frame.buffer.fill(rect, Cell::from_char(' ').with_flags(flags));
        frame.buffer.set_string(
            rect.x.saturating_add(1),
            rect.y,
            self.label,
            flags,
            rect.width.saturating_sub(2),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Container;

    fn board() -> Board {
        Board::new(vec![
            Container::new("c1", "Starters")
                .with_item("i1", "Soup")
                .with_item("i2", "Salad"),
        ])
        .unwrap()
    }

    #[test]
    fn labels_by_kind() {
        let b = board();
        assert_eq!(preview_label(&b, &DragId::container("c1")).as_deref(), Some("Starters (2)"));
        assert_eq!(preview_label(&b, &DragId::item("i2")).as_deref(), Some("Salad"));
        assert_eq!(preview_label(&b, &DragId::item("c1")), None);
    }

    #[test]
    fn rect_offsets_from_cursor() {
        let config = ReorderConfig::default();
        let rect = preview_rect(6, Position::new(3, 2), Rect::new(0, 0, 40, 10), &config);
        assert_eq!(rect, Some(Rect::new(4, 3, 6, 1)));
    }

    #[test]
    fn rect_clamps_to_viewport() {
        let config = ReorderConfig::default();
        let viewport = Rect::new(0, 0, 20, 5);
        let rect = preview_rect(8, Position::new(19, 4), viewport, &config);
        assert_eq!(rect, Some(Rect::new(12, 4, 8, 1)));
        let wide = preview_rect(100, Position::new(0, 0), viewport, &config);
        assert_eq!(wide.map(|r| r.width), Some(20));
        assert_eq!(preview_rect(0, Position::new(0, 0), viewport, &config), None);
    }

    #[test]
    fn negative_offset_clamps_at_origin() {
        let config = ReorderConfig::default().with_preview(-5, -5, 24);
        let rect = preview_rect(4, Position::new(2, 1), Rect::new(0, 0, 20, 5), &config);
        assert_eq!(rect, Some(Rect::new(0, 0, 4, 1)));
    }

    #[test]
    fn renders_reversed_label() {
        let config = ReorderConfig::default();
        let mut frame = Frame::new(20, 4);
        let preview = DragPreview::new("Soup", Position::new(0, 0), &config);
        preview.render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(1), "  Soup");
        assert!(frame.buffer.get(1, 1).is_some_and(|c| c.flags.contains(CellFlags::REVERSE)));
    }
}
