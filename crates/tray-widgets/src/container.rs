#![forbid(unsafe_code)]

//! A draggable, collapsible container of items.
//!
//! # Layout
//!
//! ```text
//! ⠿ ▾ Starters (2)     [Edit] [Delete]
//!   ⠿ Soup
//!   ⠿ Salad
//! ```
//!
//! The header carries the grab handle, the collapse toggle, the name, an
//! item-count badge, and right-aligned caller actions. The body lists the
//! items, or a placeholder line when there are none. A collapsed container
//! draws only its header; the rest of its block stays blank but remains a
//! drop target.
//!
//! # Visual states
//!
//! - Pointer over this container during a drag: header drawn reversed.
//! - This container is the drag source: whole block dimmed.
//!
//! Handle and toggle cells match the rectangles in
//! [`ContainerSlot`](crate::layout::ContainerSlot), which is what presses are
//! resolved against.

use tray_core::geometry::Rect;
use tray_render::cell::CellFlags;
use tray_render::display_width;
use tray_render::frame::Frame;

use crate::Widget;
use crate::board::Container;
use crate::context::DragContext;
use crate::id::DragKind;
use crate::item::{DEFAULT_HANDLE, DraggableItem};
use crate::layout::{HANDLE_WIDTH, TOGGLE_WIDTH, item_row};

const EXPANDED_GLYPH: &str = "▾";
const COLLAPSED_GLYPH: &str = "▸";
const DEFAULT_PLACEHOLDER: &str = "No items yet";

/// A container block with header and item list.
#[derive(Debug, Clone)]
pub struct DraggableContainer<'a> {
    container: &'a Container,
    context: &'a DragContext,
    collapsed: bool,
    actions: &'a [&'a str],
    handle_glyph: &'a str,
    placeholder: &'a str,
}

impl<'a> DraggableContainer<'a> {
    pub fn new(container: &'a Container, context: &'a DragContext) -> Self {
        Self {
            container,
            context,
            collapsed: false,
            actions: &[],
            handle_glyph: DEFAULT_HANDLE,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Labels of header actions, drawn right-aligned as `[label]`.
    #[must_use]
    pub fn actions(mut self, actions: &'a [&'a str]) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn handle_glyph(mut self, glyph: &'a str) -> Self {
        self.handle_glyph = glyph;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    fn is_dragging(&self) -> bool {
        self.context.is_active(DragKind::Container, &self.container.id)
    }

    fn is_drop_highlighted(&self) -> bool {
        self.context.is_dragging()
            && !self.is_dragging()
            && self.context.is_over(DragKind::Container, &self.container.id)
    }

    fn render_header(&self, header: Rect, frame: &mut Frame) {
        let buf = &mut frame.buffer;
        let mut x = header.x;
        let right = header.right();

        buf.set_string(x, header.y, self.handle_glyph, CellFlags::DIM, HANDLE_WIDTH.min(header.width));
        x = x.saturating_add(HANDLE_WIDTH);

        let toggle = if self.collapsed {
            COLLAPSED_GLYPH
        } else {
            EXPANDED_GLYPH
        };
        buf.set_string(x, header.y, toggle, CellFlags::empty(), TOGGLE_WIDTH.min(right.saturating_sub(x)));
        x = x.saturating_add(TOGGLE_WIDTH);

        // Actions claim space from the right edge first; the name gets the rest.
        let mut action_x = right;
        let mut labels = Vec::with_capacity(self.actions.len());
        for action in self.actions.iter().rev() {
            let label = format!("[{action}]");
            let width = display_width(&label) as u16;
            let start = action_x.saturating_sub(width);
            // Keep at least one cell between the name area and the actions.
            if start <= x || width == 0 {
                break;
            }
            action_x = start.saturating_sub(1);
            labels.push((start, label, width));
        }
        labels.reverse();
        for (start, label, width) in &labels {
            buf.set_string(*start, header.y, label, CellFlags::empty(), *width);
        }
        let name_limit = labels.first().map_or(right, |(start, _, _)| start.saturating_sub(1));

        let name_width = name_limit.saturating_sub(x);
        let written = buf.set_string(x, header.y, &self.container.name, CellFlags::BOLD, name_width);
        x = x.saturating_add(written);

        let badge = format!(" ({})", self.container.items.len());
        buf.set_string(x, header.y, &badge, CellFlags::DIM, name_limit.saturating_sub(x));
    }
}

impl Widget for DraggableContainer<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let header = Rect::new(area.x, area.y, area.width, 1);
        self.render_header(header, frame);

        if !self.collapsed && area.height > 1 {
            if self.container.items.is_empty() {
                let row = item_row(area, 0);
                frame.buffer.set_string(
                    row.x,
                    row.y,
                    self.placeholder,
                    CellFlags::DIM | CellFlags::ITALIC,
                    row.width,
                );
            }
            for (index, item) in self.container.items.iter().enumerate() {
                let row = item_row(area, index);
                if row.y >= area.bottom() {
                    break;
                }
                DraggableItem::new(&item.id, &item.label, self.context)
                    .handle_glyph(self.handle_glyph)
                    .render(row, frame);
            }
        }

        if self.is_drop_highlighted() {
            frame.buffer.apply_flags(header, CellFlags::REVERSE);
        }
        if self.is_dragging() {
            frame.buffer.apply_flags(area, CellFlags::DIM);
        }
    }
}
