#![forbid(unsafe_code)]

//! The whole board: every container, the drop line, and the drag preview.
//!
//! Everything is drawn from the same [`BoardLayout`] the coordinator
//! hit-tests, so a handle on screen is always a handle the coordinator arms.

use tray_core::geometry::Rect;
use tray_render::frame::Frame;

use crate::Widget;
use crate::board::Board;
use crate::container::DraggableContainer;
use crate::coordinator::ReorderCoordinator;
use crate::layout::BoardLayout;

/// Renders a board laid out by [`BoardLayout`] with the coordinator's state.
#[derive(Debug, Clone, Copy)]
pub struct SortableBoard<'a> {
    board: &'a Board,
    layout: &'a BoardLayout,
    coordinator: &'a ReorderCoordinator,
    actions: &'a [&'a str],
}

impl<'a> SortableBoard<'a> {
    pub fn new(
        board: &'a Board,
        layout: &'a BoardLayout,
        coordinator: &'a ReorderCoordinator,
    ) -> Self {
        Self {
            board,
            layout,
            coordinator,
            actions: &[],
        }
    }

    /// Header actions drawn on every container.
    #[must_use]
    pub fn actions(mut self, actions: &'a [&'a str]) -> Self {
        self.actions = actions;
        self
    }
}

impl Widget for SortableBoard<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let context = self.coordinator.context();
        let config = self.coordinator.config();

        for slot in &self.layout.containers {
            let Some(container) = self.board.containers().get(slot.index) else {
                continue;
            };
            if slot.rect.intersection_opt(&area).is_none() {
                continue;
            }
            DraggableContainer::new(container, &context)
                .collapsed(slot.collapsed)
                .actions(self.actions)
                .handle_glyph(&config.handle_glyph)
                .placeholder(&config.empty_placeholder)
                .render(slot.rect, frame);
        }

        if let Some(line) = self.coordinator.drop_line(self.board, self.layout) {
            line.render(area, frame);
        }
        if let Some((label, pointer)) = self.coordinator.preview_state(self.board) {
            self.coordinator.preview(&label, pointer).render(area, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Container;
    use crate::config::ReorderConfig;
    use crate::layout::CollapsedSet;
    use crate::id::DragId;
    use tray_core::semantic_event::Position;
    use tray_render::cell::CellFlags;

    fn board() -> Board {
        Board::new(vec![
            Container::new("c1", "Starters")
                .with_item("i1", "Soup")
                .with_item("i2", "Salad"),
            Container::new("c2", "Mains").with_item("i3", "Steak"),
            Container::new("c3", "Desserts"),
        ])
        .unwrap()
    }

    fn render(board: &Board, layout: &BoardLayout, coord: &ReorderCoordinator) -> Frame {
        let mut frame = Frame::new(30, 12);
        SortableBoard::new(board, layout, coord).render(frame.bounds(), &mut frame);
        frame
    }

    #[test]
    fn idle_board_snapshot() {
        let b = board();
        let l = BoardLayout::compute(&b, Rect::new(0, 0, 30, 12), &CollapsedSet::default(), &ReorderConfig::default());
        let frame = render(&b, &l, &ReorderCoordinator::default());
        assert_eq!(
            frame.buffer.to_lines()[..9],
            [
                "⠿ ▾ Starters (2)",
                "  ⠿ Soup",
                "  ⠿ Salad",
                "",
                "⠿ ▾ Mains (1)",
                "  ⠿ Steak",
                "",
                "⠿ ▾ Desserts (0)",
                "  No items yet",
            ]
        );
    }

    #[test]
    fn handles_are_drawn_where_the_layout_arms_drags() {
        let b = board();
        let l = BoardLayout::compute(&b, Rect::new(0, 0, 30, 12), &CollapsedSet::default(), &ReorderConfig::default());
        let frame = render(&b, &l, &ReorderCoordinator::default());
        let glyph_at = |x, y| frame.buffer.get(x, y).and_then(|c| c.content.as_char());

        for slot in &l.items {
            assert_eq!(glyph_at(slot.handle.x, slot.handle.y), Some('⠿'));
            let armed = l.handle_at(slot.handle.x, slot.handle.y).map(|(id, _)| id);
            assert_eq!(armed, Some(DragId::item(slot.id.clone())));
            // The label beside the handle is not a grab point.
            assert!(l.handle_at(slot.rect.x + 3, slot.rect.y).is_none());
        }
        for slot in &l.containers {
            assert_eq!(glyph_at(slot.handle.x, slot.handle.y), Some('⠿'));
            let armed = l.handle_at(slot.handle.x, slot.handle.y).map(|(id, _)| id);
            assert_eq!(armed, Some(DragId::container(slot.id.clone())));
            assert_eq!(glyph_at(slot.toggle.x, slot.toggle.y), Some('▾'));
            assert_eq!(l.toggle_at(slot.toggle.x, slot.toggle.y), Some(slot.id.as_str()));
        }
    }

    #[test]
    fn collapsed_container_keeps_header_handle() {
        let b = board();
        let collapsed: CollapsedSet = ["c1".to_string()].into_iter().collect();
        let l = BoardLayout::compute(&b, Rect::new(0, 0, 30, 12), &collapsed, &ReorderConfig::default());
        let frame = render(&b, &l, &ReorderCoordinator::default());
        let c1 = l.container_slot("c1").unwrap();
        assert_eq!(frame.buffer.row_text(c1.rect.y), "⠿ ▸ Starters (2)");
        assert!(l.handle_at(2, c1.rect.y + 1).is_none());
        let c2 = l.container_slot("c2").unwrap();
        assert_eq!(
            l.handle_at(0, c2.rect.y).map(|(id, _)| id),
            Some(DragId::container("c2"))
        );
    }

    #[test]
    fn dragging_draws_preview_and_drop_line() {
        let b = board();
        let l = BoardLayout::compute(&b, Rect::new(0, 0, 30, 12), &CollapsedSet::default(), &ReorderConfig::default());
        let mut coord = ReorderCoordinator::default();
        coord.begin(DragId::item("i1"), Position::new(2, 1), Rect::new(2, 1, 28, 1), &mut ());
        coord.drag_move(Position::new(2, 2), &l);
        let frame = render(&b, &l, &coord);
        // Source row dimmed.
        assert!(frame.buffer.get(4, 1).is_some_and(|c| c.flags.contains(CellFlags::DIM)));
        // Drop line under i2.
        assert!(frame.buffer.get(10, 2).is_some_and(|c| c.flags.contains(CellFlags::UNDERLINE)));
        // Preview at pointer + (1, 1).
        assert_eq!(frame.buffer.get(4, 3).and_then(|c| c.content.as_char()), Some('S'));
        assert!(frame.buffer.get(3, 3).is_some_and(|c| c.flags.contains(CellFlags::REVERSE)));
    }
}
