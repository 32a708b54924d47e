#![forbid(unsafe_code)]

//! Turning a completed gesture into at most one intent.
//!
//! Rules, given the dragged id and the id it was dropped on:
//!
//! 1. Container onto container: reorder if both are found and distinct.
//! 2. Item onto container: move if the container differs from the owner.
//! 3. Item onto item: reorder within a shared container, otherwise move to
//!    the target's container.
//! 4. Anything else (no target, failed lookup, container onto item): none.

use crate::board::Board;
use crate::id::{DragId, DragKind};
use crate::intent::ReorderIntent;

/// Classify a drop. Returns `None` when the gesture changes nothing.
pub fn classify(board: &Board, active: &DragId, over: Option<&DragId>) -> Option<ReorderIntent> {
    let over = over?;
    match (active.kind, over.kind) {
        (DragKind::Container, DragKind::Container) => {
            let from_index = board.container_position(&active.id)?;
            let to_index = board.container_position(&over.id)?;
            (from_index != to_index).then_some(ReorderIntent::ContainerReorder {
                from_index,
                to_index,
            })
        }
        (DragKind::Item, DragKind::Container) => {
            let source = board.owner_of(&active.id)?;
            let target = board.container(&over.id)?;
            (source.id != target.id).then(|| ReorderIntent::ItemMove {
                item_id: active.id.clone(),
                from_container: source.id.clone(),
                to_container: target.id.clone(),
            })
        }
        (DragKind::Item, DragKind::Item) => {
            let from = board.locate_item(&active.id)?;
            let to = board.locate_item(&over.id)?;
            let source = &board.containers()[from.container];
            if from.container == to.container {
                (from.index != to.index).then(|| ReorderIntent::ItemReorder {
                    container_id: source.id.clone(),
                    from_index: from.index,
                    to_index: to.index,
                })
            } else {
                let target = &board.containers()[to.container];
                Some(ReorderIntent::ItemMove {
                    item_id: active.id.clone(),
                    from_container: source.id.clone(),
                    to_container: target.id.clone(),
                })
            }
        }
        (DragKind::Container, DragKind::Item) => None,
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
            Container::new("c2", "Mains").with_item("i3", "Steak"),
            Container::new("c3", "Desserts"),
        ])
        .unwrap()
    }

    #[test]
    fn item_onto_sibling_reorders() {
        let intent = classify(&board(), &DragId::item("i1"), Some(&DragId::item("i2")));
        assert_eq!(
            intent,
            Some(ReorderIntent::ItemReorder {
                container_id: "c1".into(),
                from_index: 0,
                to_index: 1,
            })
        );
    }

    #[test]
    fn item_onto_itself_is_noop() {
        assert_eq!(
            classify(&board(), &DragId::item("i1"), Some(&DragId::item("i1"))),
            None
        );
    }

    #[test]
    fn item_onto_other_container_moves() {
        assert_eq!(
            classify(&board(), &DragId::item("i1"), Some(&DragId::container("c2"))),
            Some(ReorderIntent::ItemMove {
                item_id: "i1".into(),
                from_container: "c1".into(),
                to_container: "c2".into(),
            })
        );
    }

    #[test]
    fn item_onto_own_container_is_noop() {
        assert_eq!(
            classify(&board(), &DragId::item("i2"), Some(&DragId::container("c1"))),
            None
        );
    }

    #[test]
    fn item_onto_item_in_other_container_moves() {
        assert_eq!(
            classify(&board(), &DragId::item("i3"), Some(&DragId::item("i1"))),
            Some(ReorderIntent::ItemMove {
                item_id: "i3".into(),
                from_container: "c2".into(),
                to_container: "c1".into(),
            })
        );
    }

    #[test]
    fn container_onto_container_reorders() {
        assert_eq!(
            classify(&board(), &DragId::container("c3"), Some(&DragId::container("c1"))),
            Some(ReorderIntent::ContainerReorder {
                from_index: 2,
                to_index: 0,
            })
        );
        assert_eq!(
            classify(&board(), &DragId::container("c2"), Some(&DragId::container("c2"))),
            None
        );
    }

    #[test]
    fn container_onto_item_is_noop() {
        assert_eq!(
            classify(&board(), &DragId::container("c1"), Some(&DragId::item("i3"))),
            None
        );
    }

    #[test]
    fn missing_target_or_unknown_ids_are_noops() {
        let b = board();
        assert_eq!(classify(&b, &DragId::item("i1"), None), None);
        assert_eq!(classify(&b, &DragId::item("ghost"), Some(&DragId::item("i1"))), None);
        assert_eq!(classify(&b, &DragId::item("i1"), Some(&DragId::container("ghost"))), None);
        assert_eq!(
            classify(&b, &DragId::container("ghost"), Some(&DragId::container("c1"))),
            None
        );
    }

    #[test]
    fn raw_id_overlap_does_not_confuse_spaces() {
        let b = Board::new(vec![
            Container::new("x", "Shared").with_item("x", "Same raw id"),
            Container::new("y", "Other"),
        ])
        .unwrap();
        assert_eq!(
            classify(&b, &DragId::item("x"), Some(&DragId::container("y"))),
            Some(ReorderIntent::ItemMove {
                item_id: "x".into(),
                from_container: "x".into(),
                to_container: "y".into(),
            })
        );
        assert_eq!(
            classify(&b, &DragId::container("x"), Some(&DragId::container("y"))),
            Some(ReorderIntent::ContainerReorder {
                from_index: 0,
                to_index: 1,
            })
        );
    }
}
