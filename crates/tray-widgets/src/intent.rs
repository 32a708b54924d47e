#![forbid(unsafe_code)]

//! Reorder intents and the handler contract.
//!
//! A completed gesture resolves to at most one [`ReorderIntent`]. The
//! coordinator reports it through a caller-supplied [`ReorderHandler`],
//! bracketed by `on_drag_start` / `on_drag_end`.

use crate::id::DragId;

/// A mutation the caller should apply to its data.
///
/// Indices are positions before the move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ReorderIntent {
    /// An item moved to a different container. `from_container != to_container`.
    ItemMove {
        item_id: String,
        from_container: String,
        to_container: String,
    },
    /// An item moved within its container. `from_index != to_index`.
    ItemReorder {
        container_id: String,
        from_index: usize,
        to_index: usize,
    },
    /// A container moved. `from_index != to_index`.
    ContainerReorder { from_index: usize, to_index: usize },
}

impl ReorderIntent {
    /// Invoke the matching handler callback.
    pub fn dispatch<H: ReorderHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            Self::ItemMove {
                item_id,
                from_container,
                to_container,
            } => handler.on_item_move(item_id, from_container, to_container),
            Self::ItemReorder {
                container_id,
                from_index,
                to_index,
            } => handler.on_item_reorder(container_id, *from_index, *to_index),
            Self::ContainerReorder {
                from_index,
                to_index,
            } => handler.on_container_reorder(*from_index, *to_index),
        }
    }
}

/// Callbacks the coordinator drives. Every method defaults to a no-op.
///
/// For one gesture the order is always: `on_drag_start`, at most one
/// mutation callback, `on_drag_end`.
pub trait ReorderHandler {
    /// A drag session started.
    fn on_drag_start(&mut self, _active: &DragId) {}

    /// An item was dropped into a different container.
    fn on_item_move(&mut self, _item_id: &str, _from_container: &str, _to_container: &str) {}

    /// An item was dropped onto another item in its own container.
    fn on_item_reorder(&mut self, _container_id: &str, _from_index: usize, _to_index: usize) {}

    /// A container was dropped onto another container.
    fn on_container_reorder(&mut self, _from_index: usize, _to_index: usize) {}

    /// The drag session ended, whatever the outcome.
    fn on_drag_end(&mut self) {}

    /// A container's collapse toggle was clicked.
    fn on_collapse_toggle(&mut self, _container_id: &str) {}
}

/// A handler that ignores everything.
impl ReorderHandler for () {}

/// One recorded handler callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderEvent {
    DragStart(DragId),
    Intent(ReorderIntent),
    DragEnd,
    CollapseToggle(String),
}

/// A handler that records every callback in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentLog {
    pub events: Vec<ReorderEvent>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutation intents recorded so far.
    pub fn intents(&self) -> impl Iterator<Item = &ReorderIntent> {
        self.events.iter().filter_map(|e| match e {
            ReorderEvent::Intent(intent) => Some(intent),
            _ => None,
        })
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<ReorderEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ReorderHandler for IntentLog {
    fn on_drag_start(&mut self, active: &DragId) {
        self.events.push(ReorderEvent::DragStart(active.clone()));
    }

    fn on_item_move(&mut self, item_id: &str, from_container: &str, to_container: &str) {
        self.events.push(ReorderEvent::Intent(ReorderIntent::ItemMove {
            item_id: item_id.to_owned(),
            from_container: from_container.to_owned(),
            to_container: to_container.to_owned(),
        }));
    }

    fn on_item_reorder(&mut self, container_id: &str, from_index: usize, to_index: usize) {
        self.events.push(ReorderEvent::Intent(ReorderIntent::ItemReorder {
            container_id: container_id.to_owned(),
            from_index,
            to_index,
        }));
    }

    fn on_container_reorder(&mut self, from_index: usize, to_index: usize) {
        self.events.push(ReorderEvent::Intent(ReorderIntent::ContainerReorder {
            from_index,
            to_index,
        }));
    }

    fn on_drag_end(&mut self) {
        self.events.push(ReorderEvent::DragEnd);
    }

    fn on_collapse_toggle(&mut self, container_id: &str) {
        self.events
            .push(ReorderEvent::CollapseToggle(container_id.to_owned()));
    }
}
