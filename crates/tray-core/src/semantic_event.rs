#![forbid(unsafe_code)]

//! High-level pointer intentions derived from raw input.
//!
//! [`SemanticEvent`] represents what the user meant rather than which button
//! went down where. The [`GestureRecognizer`](crate::gesture::GestureRecognizer)
//! converts raw [`Event`](crate::event::Event) sequences into these.
//!
//! ## Invariants
//! 1. Every drag sequence is well-formed: `DragStart` → zero or more
//!    `DragMove` → exactly one of `DragEnd` or `DragCancel`.
//! 2. A press/release pair yields either a `Click` or a drag sequence, never
//!    both.

use crate::event::MouseButton;

/// A 2D cell position (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        (self.x as i32 - other.x as i32).unsigned_abs()
            + (self.y as i32 - other.y as i32).unsigned_abs()
    }

    /// Signed offset from `origin` to `self`.
    #[must_use]
    pub fn offset_from(self, origin: Self) -> (i32, i32) {
        (
            self.x as i32 - origin.x as i32,
            self.y as i32 - origin.y as i32,
        )
    }
}

impl From<(u16, u16)> for Position {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// Pointer intentions produced by the gesture recognizer.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticEvent {
    /// Press and release without crossing the drag threshold.
    Click { pos: Position, button: MouseButton },

    /// Pointer moved beyond the drag threshold while a button was held.
    ///
    /// `pos` is where the button originally went down.
    DragStart { pos: Position, button: MouseButton },

    /// Ongoing drag movement.
    DragMove {
        start: Position,
        current: Position,
        /// Movement since the previous `DragMove` (dx, dy).
        delta: (i16, i16),
    },

    /// Button released after a drag.
    DragEnd { start: Position, end: Position },

    /// Drag abandoned (Escape pressed, focus lost).
    DragCancel,
}

impl SemanticEvent {
    /// Returns true if this is part of a drag sequence.
    #[must_use]
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragStart { .. } | Self::DragMove { .. } | Self::DragEnd { .. } | Self::DragCancel
        )
    }

    /// The pointer position carried by the event, if any.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Click { pos, .. } | Self::DragStart { pos, .. } => Some(*pos),
            Self::DragMove { current, .. } => Some(*current),
            Self::DragEnd { end, .. } => Some(*end),
            Self::DragCancel => None,
        }
    }
}
