#![forbid(unsafe_code)]

//! Vertical stacking of containers and their items.
//!
//! Each expanded container takes one header row, then one row per item (or
//! one placeholder row when it has none). A collapsed container takes
//! `collapsed_min_height` rows, so it keeps a real drop area. Containers are
//! separated by `container_gap` blank rows.
//!
//! ```text
//! ⠿ ▾ Starters (2)        [Edit]    <- header: handle, toggle, name, badge, actions
//!   ⠿ Soup                          <- item rows, indented by HANDLE_WIDTH
//!   ⠿ Salad
//!                                   <- gap
//! ⠿ ▸ Mains (1)                     <- collapsed: header + blank rows
//!
//! ```
//!
//! The layout is computed once per render pass. The coordinator hit-tests
//! against it and the widgets draw into it, so both agree on geometry.

use ahash::AHashSet;
use tray_core::geometry::Rect;

use crate::board::Board;
use crate::collision::DropTarget;
use crate::config::ReorderConfig;
use crate::id::DragId;

/// Cells reserved for a handle glyph and its trailing space.
pub const HANDLE_WIDTH: u16 = 2;
/// Cells reserved for the collapse toggle glyph and its trailing space.
pub const TOGGLE_WIDTH: u16 = 2;

/// Ids of containers that are currently collapsed.
pub type CollapsedSet = AHashSet<String>;

/// Row of the item at `index` inside an expanded container block.
pub fn item_row(container: Rect, index: usize) -> Rect {
    let offset = u16::try_from(index).unwrap_or(u16::MAX).saturating_add(1);
    Rect::new(
        container.x.saturating_add(HANDLE_WIDTH),
        container.y.saturating_add(offset),
        container.width.saturating_sub(HANDLE_WIDTH),
        1,
    )
}

/// Geometry of one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSlot {
    pub id: String,
    /// Position in the board.
    pub index: usize,
    /// Whole block; this is the drop target.
    pub rect: Rect,
    pub header: Rect,
    pub handle: Rect,
    pub toggle: Rect,
    /// Rows below the header. Empty when collapsed.
    pub body: Rect,
    pub collapsed: bool,
}

/// Geometry of one item row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSlot {
    pub id: String,
    /// Position of the owning container in the board.
    pub container: usize,
    /// Position within the container.
    pub index: usize,
    pub rect: Rect,
    pub handle: Rect,
}

/// Computed geometry for a whole board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub area: Rect,
    pub containers: Vec<ContainerSlot>,
    pub items: Vec<ItemSlot>,
    /// Rows used, starting at `area.y`. May exceed `area.height`.
    pub content_height: u16,
}

impl BoardLayout {
    /// Lay out `board` top to bottom inside `area`.
    pub fn compute(
        board: &Board,
        area: Rect,
        collapsed: &CollapsedSet,
        config: &ReorderConfig,
    ) -> Self {
        let mut containers = Vec::with_capacity(board.len());
        let mut items = Vec::with_capacity(board.item_count());
        let mut y = area.y;

        for (ci, container) in board.containers().iter().enumerate() {
            let is_collapsed = collapsed.contains(&container.id);
            let height = if is_collapsed {
                config.collapsed_min_height.max(1)
            } else {
                let rows = u16::try_from(container.items.len()).unwrap_or(u16::MAX);
                rows.max(1).saturating_add(1)
            };

            let rect = Rect::new(area.x, y, area.width, height);
            let header = Rect::new(area.x, y, area.width, 1);
            let handle = Rect::new(area.x, y, HANDLE_WIDTH.min(area.width), 1);
            let toggle_x = area.x.saturating_add(HANDLE_WIDTH);
            let toggle = Rect::new(
                toggle_x,
                y,
                TOGGLE_WIDTH.min(area.right().saturating_sub(toggle_x)),
                1,
            );
            let body = if is_collapsed {
                Rect::new(area.x, y.saturating_add(1), area.width, 0)
            } else {
                Rect::new(area.x, y.saturating_add(1), area.width, height - 1)
            };

            if !is_collapsed {
                for (index, item) in container.items.iter().enumerate() {
                    let row = item_row(rect, index);
                    items.push(ItemSlot {
                        id: item.id.clone(),
                        container: ci,
                        index,
                        rect: row,
                        handle: Rect::new(row.x, row.y, HANDLE_WIDTH.min(row.width), 1),
                    });
                }
            }

            containers.push(ContainerSlot {
                id: container.id.clone(),
                index: ci,
                rect,
                header,
                handle,
                toggle,
                body,
                collapsed: is_collapsed,
            });

            y = y.saturating_add(height).saturating_add(config.container_gap);
        }

        let content_height = if containers.is_empty() {
            0
        } else {
            (y - area.y).saturating_sub(config.container_gap)
        };

        Self {
            area,
            containers,
            items,
            content_height,
        }
    }

    /// Drop targets in registration order: each container, then its items.
    pub fn drop_targets(&self) -> Vec<DropTarget> {
        let mut targets = Vec::with_capacity(self.containers.len() + self.items.len());
        let mut items = self.items.iter().peekable();
        for slot in &self.containers {
            targets.push(DropTarget::new(DragId::container(&slot.id), slot.rect));
            while let Some(item) = items.next_if(|i| i.container == slot.index) {
                targets.push(DropTarget::new(DragId::item(&item.id), item.rect));
            }
        }
        targets
    }

    pub fn container_slot(&self, id: &str) -> Option<&ContainerSlot> {
        self.containers.iter().find(|s| s.id == id)
    }

    pub fn item_slot(&self, id: &str) -> Option<&ItemSlot> {
        self.items.iter().find(|s| s.id == id)
    }

    /// Items laid out for the container at board position `container`.
    pub fn items_of(&self, container: usize) -> impl Iterator<Item = &ItemSlot> {
        self.items.iter().filter(move |s| s.container == container)
    }

    /// Drop-target rectangle of a drag id.
    pub fn rect_of(&self, id: &DragId) -> Option<Rect> {
        if id.is_container() {
            self.container_slot(&id.id).map(|s| s.rect)
        } else {
            self.item_slot(&id.id).map(|s| s.rect)
        }
    }

    /// The drag source whose grab handle covers (x, y), with its rectangle.
    pub fn handle_at(&self, x: u16, y: u16) -> Option<(DragId, Rect)> {
        if let Some(item) = self.items.iter().find(|s| s.handle.contains(x, y)) {
            return Some((DragId::item(&item.id), item.rect));
        }
        self.containers
            .iter()
            .find(|s| s.handle.contains(x, y))
            .map(|s| (DragId::container(&s.id), s.rect))
    }

    /// The container whose collapse toggle covers (x, y).
    pub fn toggle_at(&self, x: u16, y: u16) -> Option<&str> {
        self.containers
            .iter()
            .find(|s| s.toggle.contains(x, y))
            .map(|s| s.id.as_str())
    }
}
