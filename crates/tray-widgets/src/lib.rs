#![forbid(unsafe_code)]

//! Drag-and-drop reordering for ordered containers of items.
//!
//! # Role in tray
//! `tray-widgets` is the engine. It reads caller-owned [`Board`] data,
//! senses pointer gestures through a [`ReorderCoordinator`], and reports
//! each completed gesture as at most one [`ReorderIntent`]: reorder items
//! within a container, move an item to another container, or reorder the
//! containers. The caller applies the intent and re-renders; the engine never
//! mutates the board itself.
//!
//! # Primary pieces
//! - [`DragId`]: tagged item/container identifiers.
//! - [`Board`]: containers, items, and a membership index.
//! - [`classify`](classify::classify): gesture outcome to intent.
//! - [`collision`]: per-source collision strategies.
//! - [`BoardLayout`]: geometry shared by hit testing and rendering.
//! - [`DraggableItem`], [`DraggableContainer`], [`SortableBoard`],
//!   [`DragPreview`], [`DropLine`]: widgets.

pub mod board;
pub mod classify;
pub mod collision;
pub mod config;
pub mod container;
pub mod context;
pub mod coordinator;
pub mod drop_line;
pub mod error;
pub mod id;
pub mod intent;
pub mod item;
pub mod layout;
pub mod preview;
pub mod sortable_board;

use tray_core::geometry::Rect;
use tray_render::frame::Frame;

pub use board::{Board, Container, Item, ItemLocation};
pub use config::ReorderConfig;
pub use container::DraggableContainer;
pub use context::DragContext;
pub use coordinator::{DragSession, ReorderCoordinator};
pub use drop_line::{DropLine, DropPlacement};
pub use error::{BoardError, ConfigError, DragIdError};
pub use id::{DragId, DragKind};
pub use intent::{IntentLog, ReorderEvent, ReorderHandler, ReorderIntent};
pub use item::DraggableItem;
pub use layout::{BoardLayout, CollapsedSet};
pub use preview::DragPreview;
pub use sortable_board::SortableBoard;

/// A `Widget` draws itself into a frame area.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}
