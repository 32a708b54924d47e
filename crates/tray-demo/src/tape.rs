#![forbid(unsafe_code)]

//! Scripted gesture tapes.
//!
//! A [`Gesture`] names what the user does ("drag soup onto salad"); the tape
//! turns it into the raw pointer and key events a terminal would deliver,
//! using the current layout for coordinates. Gestures are resolved one at a
//! time because every applied intent changes the layout.

use tray_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tray_core::geometry::Rect;
use tray_widgets::{BoardLayout, DragId};

/// One user action in a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Press a handle, drag onto `target`, release.
    Drag { source: DragId, target: DragId },
    /// Like `Drag`, but press Escape before releasing.
    CancelledDrag { source: DragId, target: DragId },
    /// Drag `source` below the last category and release there.
    DropInEmptySpace(DragId),
    /// Click a category's collapse toggle.
    Toggle(String),
    Undo,
    Redo,
}

impl Gesture {
    pub fn drag(source: DragId, target: DragId) -> Self {
        Self::Drag { source, target }
    }

    /// Short human-readable caption.
    pub fn caption(&self) -> String {
        match self {
            Self::Drag { source, target } => format!("drag {source} onto {target}"),
            Self::CancelledDrag { source, target } => {
                format!("drag {source} toward {target}, then Esc")
            }
            Self::DropInEmptySpace(source) => format!("drag {source} into empty space"),
            Self::Toggle(category) => format!("toggle {category}"),
            Self::Undo => "undo".to_owned(),
            Self::Redo => "redo".to_owned(),
        }
    }

    /// Raw events for this gesture against `layout`.
    ///
    /// Returns `None` when a referenced id is not laid out (for example an
    /// item inside a collapsed category).
    pub fn events(&self, layout: &BoardLayout, threshold: u16) -> Option<Vec<Event>> {
        match self {
            Self::Drag { source, target } => drag_events(layout, source, target, threshold, false),
            Self::CancelledDrag { source, target } => {
                drag_events(layout, source, target, threshold, true)
            }
            Self::DropInEmptySpace(source) => {
                let source_rect = layout.rect_of(source)?;
                let below = layout.area.y.saturating_add(layout.content_height);
                Some(drag_path(source_rect.x, source_rect.y, source_rect.x, below, threshold, false))
            }
            Self::Toggle(category) => {
                let toggle = layout.container_slot(category)?.toggle;
                Some(vec![
                    mouse(MouseEventKind::Down(MouseButton::Left), toggle.x, toggle.y),
                    mouse(MouseEventKind::Up(MouseButton::Left), toggle.x, toggle.y),
                ])
            }
            Self::Undo => Some(vec![Event::Key(KeyEvent::new(KeyCode::Char('u')))]),
            Self::Redo => Some(vec![Event::Key(KeyEvent::new(KeyCode::Char('r')))]),
        }
    }
}

fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(kind, x, y))
}

fn center(rect: Rect) -> (i32, i32) {
    (
        i32::from(rect.x) + i32::from(rect.width) / 2,
        i32::from(rect.y) + i32::from(rect.height) / 2,
    )
}

fn clamp_cell(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}

/// Press on the source handle, nudge sideways past the threshold, then move
/// so the dragged rectangle's center lands on the target's center.
fn drag_events(
    layout: &BoardLayout,
    source: &DragId,
    target: &DragId,
    threshold: u16,
    cancel: bool,
) -> Option<Vec<Event>> {
    let source_rect = layout.rect_of(source)?;
    let target_rect = layout.rect_of(target)?;
    let (hx, hy) = (source_rect.x, source_rect.y);

    let (sx, sy) = center(source_rect);
    let (tx, ty) = center(target_rect);
    let end_x = clamp_cell(i32::from(hx) + tx - sx);
    let end_y = clamp_cell(i32::from(hy) + ty - sy);
    Some(drag_path(hx, hy, end_x, end_y, threshold, cancel))
}

fn drag_path(hx: u16, hy: u16, end_x: u16, end_y: u16, threshold: u16, cancel: bool) -> Vec<Event> {
    let mut events = vec![
        mouse(MouseEventKind::Down(MouseButton::Left), hx, hy),
        mouse(
            MouseEventKind::Drag(MouseButton::Left),
            hx.saturating_add(threshold.max(1)),
            hy,
        ),
        mouse(MouseEventKind::Drag(MouseButton::Left), end_x, end_y),
    ];
    if cancel {
        events.push(Event::Key(KeyEvent::new(KeyCode::Escape)));
    }
    events.push(mouse(MouseEventKind::Up(MouseButton::Left), end_x, end_y));
    events
}

/// The session replayed by the demo binary.
pub fn demo_script() -> Vec<Gesture> {
    vec![
        Gesture::drag(DragId::item("soup"), DragId::item("salad")),
        Gesture::drag(DragId::item("steak"), DragId::container("desserts")),
        Gesture::Toggle("mains".to_owned()),
        Gesture::drag(DragId::item("tiramisu"), DragId::container("mains")),
        Gesture::drag(DragId::container("drinks"), DragId::container("starters")),
        Gesture::CancelledDrag {
            source: DragId::item("bruschetta"),
            target: DragId::container("desserts"),
        },
        Gesture::DropInEmptySpace(DragId::item("salad")),
        Gesture::Undo,
        Gesture::Undo,
        Gesture::Redo,
        Gesture::Toggle("mains".to_owned()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_builder::{MenuBuilder, sample_menu};
    use tray_widgets::{ReorderConfig, ReorderIntent};
    use web_time::Instant;

    fn builder() -> MenuBuilder {
        MenuBuilder::new(
            sample_menu().unwrap(),
            ReorderConfig::default(),
            Rect::new(0, 0, 40, 30),
        )
    }

    fn perform(b: &mut MenuBuilder, gesture: &Gesture) -> Vec<ReorderIntent> {
        let threshold = b.coordinator().config().drag_threshold;
        let events = gesture.events(b.layout(), threshold).unwrap();
        let t0 = Instant::now();
        events
            .iter()
            .flat_map(|e| b.handle_event_at(e, t0).unwrap())
            .collect()
    }

    fn dishes(b: &MenuBuilder, category: &str) -> Vec<String> {
        b.board()
            .container(category)
            .map(|c| c.items.iter().map(|i| i.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn drag_onto_sibling_reorders() {
        let mut b = builder();
        let applied = perform(&mut b, &Gesture::drag(DragId::item("soup"), DragId::item("salad")));
        assert_eq!(
            applied,
            vec![ReorderIntent::ItemReorder {
                container_id: "starters".into(),
                from_index: 0,
                to_index: 1,
            }]
        );
    }

    #[test]
    fn drag_onto_other_category_moves() {
        let mut b = builder();
        let applied = perform(
            &mut b,
            &Gesture::drag(DragId::item("steak"), DragId::container("desserts")),
        );
        assert_eq!(
            applied,
            vec![ReorderIntent::ItemMove {
                item_id: "steak".into(),
                from_container: "mains".into(),
                to_container: "desserts".into(),
            }]
        );
        assert_eq!(dishes(&b, "desserts"), ["tiramisu", "steak"]);
    }

    #[test]
    fn category_drag_reorders_categories() {
        let mut b = builder();
        let applied = perform(
            &mut b,
            &Gesture::drag(DragId::container("drinks"), DragId::container("starters")),
        );
        assert_eq!(
            applied,
            vec![ReorderIntent::ContainerReorder {
                from_index: 3,
                to_index: 0,
            }]
        );
    }

    #[test]
    fn cancelled_drag_applies_nothing() {
        let mut b = builder();
        let applied = perform(
            &mut b,
            &Gesture::CancelledDrag {
                source: DragId::item("bruschetta"),
                target: DragId::container("desserts"),
            },
        );
        assert!(applied.is_empty());
        assert_eq!(b.board(), &sample_menu().unwrap());
        assert!(!b.coordinator().is_dragging());
    }

    #[test]
    fn release_below_the_menu_applies_nothing() {
        let mut b = builder();
        let before = b.board().clone();
        for source in [DragId::item("salad"), DragId::container("mains")] {
            let applied = perform(&mut b, &Gesture::DropInEmptySpace(source));
            assert!(applied.is_empty());
            assert!(!b.coordinator().is_dragging());
        }
        assert_eq!(b.board(), &before);
        assert_eq!(b.history_len(), 0);
    }

    #[test]
    fn hidden_items_have_no_events() {
        let mut b = builder();
        b.toggle_collapse("mains");
        let gesture = Gesture::drag(DragId::item("steak"), DragId::container("desserts"));
        assert!(gesture.events(b.layout(), 3).is_none());
    }

    #[test]
    fn full_script_runs_to_a_consistent_menu() {
        let mut b = builder();
        for gesture in demo_script() {
            perform(&mut b, &gesture);
        }
        let order: Vec<_> = b.board().containers().iter().map(|c| c.id.as_str()).collect();
        // The category reorder was undone and stays on the redo stack.
        assert_eq!(order, ["starters", "mains", "desserts", "drinks"]);
        assert!(b.can_redo());
        assert_eq!(dishes(&b, "starters"), ["salad", "soup", "bruschetta"]);
        assert_eq!(dishes(&b, "mains"), ["risotto", "tiramisu"]);
        assert_eq!(dishes(&b, "desserts"), ["steak"]);
        assert!(!b.is_collapsed("mains"));
        assert_eq!(b.board().item_count(), 6);
    }
}
