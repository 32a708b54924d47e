#![forbid(unsafe_code)]

//! Insertion indicator for item drags.
//!
//! Within one container the line sits below the target row when the item
//! moves down and above it when the item moves up, matching where the item
//! will land. For a cross-container drop it marks the append position of the
//! target container.
//!
//! Terminals cannot draw between rows, so the line is the underline of the
//! row just above the boundary.

use tray_core::geometry::Rect;
use tray_render::cell::CellFlags;
use tray_render::frame::Frame;

use crate::Widget;
use crate::board::Board;
use crate::id::{DragId, DragKind};
use crate::layout::{BoardLayout, HANDLE_WIDTH};

/// Where the indicator sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlacement {
    /// Above the target row (item moving up).
    Above,
    /// Below the target row (item moving down).
    Below,
    /// After the last item of another container.
    Append,
}

/// A horizontal insertion indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropLine {
    pub placement: DropPlacement,
    /// Container the item would land in.
    pub container: String,
    /// Row boundary: the line sits between rows `boundary - 1` and `boundary`.
    pub boundary: u16,
    pub x: u16,
    pub width: u16,
}

impl DropLine {
    /// Compute the indicator for `active` hovering `over`.
    ///
    /// Returns `None` for container drags, self-drops, drops that change
    /// nothing, and ids missing from the board or layout.
    pub fn compute(
        board: &Board,
        layout: &BoardLayout,
        active: &DragId,
        over: Option<&DragId>,
    ) -> Option<Self> {
        if active.kind != DragKind::Item {
            return None;
        }
        let over = over?;
        let from = board.locate_item(&active.id)?;

        let target_container = match over.kind {
            DragKind::Item => {
                let to = board.locate_item(&over.id)?;
                if to.container == from.container {
                    if to.index == from.index {
                        return None;
                    }
                    let slot = layout.item_slot(&over.id)?;
                    let (placement, boundary) = if to.index > from.index {
                        (DropPlacement::Below, slot.rect.bottom())
                    } else {
                        (DropPlacement::Above, slot.rect.y)
                    };
                    return Some(Self {
                        placement,
                        container: board.containers()[to.container].id.clone(),
                        boundary,
                        x: slot.rect.x,
                        width: slot.rect.width,
                    });
                }
                to.container
            }
            DragKind::Container => {
                let ci = board.container_position(&over.id)?;
                if ci == from.container {
                    return None;
                }
                ci
            }
        };

        let container = &board.containers()[target_container];
        let slot = layout.container_slot(&container.id)?;
        let boundary = layout
            .items_of(slot.index)
            .last()
            .map_or(slot.header.bottom(), |item| item.rect.bottom());
        Some(Self {
            placement: DropPlacement::Append,
            container: container.id.clone(),
            boundary,
            x: slot.rect.x.saturating_add(HANDLE_WIDTH),
            width: slot.rect.width.saturating_sub(HANDLE_WIDTH),
        })
    }

    /// The row whose underline draws this line, if there is one.
    pub fn row(&self) -> Option<Rect> {
        let y = self.boundary.checked_sub(1)?;
        Some(Rect::new(self.x, y, self.width, 1))
    }
}

impl Widget for DropLine {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if let Some(row) = self.row() {
            frame
                .buffer
                .apply_flags(row.intersection(&area), CellFlags::UNDERLINE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Container;
    use crate::config::ReorderConfig;
    use crate::layout::CollapsedSet;

    fn fixture(collapsed: &[&str]) -> (Board, BoardLayout) {
        let board = Board::new(vec![
            Container::new("c1", "Starters")
                .with_item("i1", "Soup")
                .with_item("i2", "Salad")
                .with_item("i3", "Bread"),
            Container::new("c2", "Mains").with_item("i4", "Steak"),
            Container::new("c3", "Desserts"),
        ])
        .unwrap();
        let set: CollapsedSet = collapsed.iter().map(|s| s.to_string()).collect();
        let layout =
            BoardLayout::compute(&board, Rect::new(0, 0, 20, 30), &set, &ReorderConfig::default());
        (board, layout)
    }

    #[test]
    fn moving_down_places_line_below_target() {
        let (b, l) = fixture(&[]);
        let line = DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::item("i2"))).unwrap();
        assert_eq!(line.placement, DropPlacement::Below);
        // i2 occupies row 2; the boundary is below it.
        assert_eq!(line.boundary, 3);
        assert_eq!(line.row(), Some(Rect::new(2, 2, 18, 1)));
    }

    #[test]
    fn moving_up_places_line_above_target() {
        let (b, l) = fixture(&[]);
        let line = DropLine::compute(&b, &l, &DragId::item("i3"), Some(&DragId::item("i1"))).unwrap();
        assert_eq!(line.placement, DropPlacement::Above);
        assert_eq!(line.boundary, 1);
        // Underlines the header row.
        assert_eq!(line.row().map(|r| r.y), Some(0));
    }

    #[test]
    fn cross_container_appends() {
        let (b, l) = fixture(&[]);
        let onto_item =
            DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::item("i4"))).unwrap();
        let onto_container =
            DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::container("c2"))).unwrap();
        assert_eq!(onto_item, onto_container);
        assert_eq!(onto_item.placement, DropPlacement::Append);
        assert_eq!(onto_item.container, "c2");
        // c2 starts at row 5: header 5, i4 at 6.
        assert_eq!(onto_item.boundary, 7);
    }

    #[test]
    fn append_to_empty_or_collapsed_sits_under_header() {
        let (b, l) = fixture(&["c2"]);
        let empty =
            DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::container("c3"))).unwrap();
        let c3 = l.container_slot("c3").unwrap();
        assert_eq!(empty.boundary, c3.header.bottom());
        let collapsed =
            DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::container("c2"))).unwrap();
        assert_eq!(collapsed.boundary, 6);
    }

    #[test]
    fn no_line_for_noops_and_container_drags() {
        let (b, l) = fixture(&[]);
        assert!(DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::item("i1"))).is_none());
        assert!(DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::container("c1"))).is_none());
        assert!(DropLine::compute(&b, &l, &DragId::item("i1"), None).is_none());
        assert!(
            DropLine::compute(&b, &l, &DragId::container("c1"), Some(&DragId::container("c2")))
                .is_none()
        );
    }

    #[test]
    fn renders_as_underline() {
        let (b, l) = fixture(&[]);
        let line = DropLine::compute(&b, &l, &DragId::item("i1"), Some(&DragId::item("i2"))).unwrap();
        let mut frame = Frame::new(20, 10);
        line.render(frame.bounds(), &mut frame);
        assert!(frame.buffer.get(5, 2).is_some_and(|c| c.flags.contains(CellFlags::UNDERLINE)));
        assert!(frame.buffer.get(1, 2).is_some_and(|c| c.flags.is_empty()));
        assert!(frame.buffer.get(5, 3).is_some_and(|c| c.flags.is_empty()));
    }
}
