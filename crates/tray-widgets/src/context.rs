#![forbid(unsafe_code)]

//! Read-only view of the active drag, passed down to widgets.

use crate::id::{DragId, DragKind};

/// What is being dragged and what it is over.
///
/// The coordinator owns the session; widgets only ever see this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragContext {
    pub active: Option<DragId>,
    pub over: Option<DragId>,
}

impl DragContext {
    /// No drag in progress.
    pub const fn idle() -> Self {
        Self {
            active: None,
            over: None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active(&self, kind: DragKind, id: &str) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.kind == kind && a.id == id)
    }

    pub fn is_over(&self, kind: DragKind, id: &str) -> bool {
        self.over
            .as_ref()
            .is_some_and(|o| o.kind == kind && o.id == id)
    }
}
