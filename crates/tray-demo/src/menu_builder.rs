#![forbid(unsafe_code)]

//! Menu builder screen: restaurant categories and their dishes.
//!
//! The screen owns the authoritative [`Board`]. It forwards input to the
//! [`ReorderCoordinator`], applies every reported intent with
//! [`Board::apply`], tracks which categories are collapsed, and keeps an
//! undo/redo history of applied intents.
//!
//! # Keybindings
//!
//! - Mouse: drag a `⠿` handle to reorder; click `▾`/`▸` to collapse.
//! - `u` / `r`: undo / redo (ignored while dragging).
//! - `Esc`: cancel the active drag.

use tracing::{debug, info};
use tray_core::event::{Event, KeyEventKind};
use tray_core::geometry::Rect;
use tray_render::frame::Frame;
use tray_widgets::{
    Board, BoardError, BoardLayout, CollapsedSet, Container, IntentLog, ItemLocation,
    ReorderConfig, ReorderCoordinator, ReorderEvent, ReorderIntent, SortableBoard, Widget,
};
use web_time::Instant;

const LOG_TARGET: &str = "tray::menu";

/// Header actions drawn on every category.
pub const CATEGORY_ACTIONS: &[&str] = &["Edit"];

/// The menu the demo starts with.
pub fn sample_menu() -> Result<Board, BoardError> {
    Board::new(vec![
        Container::new("starters", "Starters")
            .with_item("soup", "Tomato Soup")
            .with_item("salad", "Caesar Salad")
            .with_item("bruschetta", "Bruschetta"),
        Container::new("mains", "Mains")
            .with_item("steak", "Ribeye Steak")
            .with_item("risotto", "Mushroom Risotto"),
        Container::new("desserts", "Desserts").with_item("tiramisu", "Tiramisu"),
        Container::new("drinks", "Drinks"),
    ])
}

/// An applied intent plus what is needed to revert it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    intent: ReorderIntent,
    /// Where a moved item sat before a cross-container move.
    origin: Option<ItemLocation>,
}

/// The menu builder screen.
#[derive(Debug)]
pub struct MenuBuilder {
    board: Board,
    collapsed: CollapsedSet,
    coordinator: ReorderCoordinator,
    layout: BoardLayout,
    area: Rect,
    history: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl MenuBuilder {
    pub fn new(board: Board, config: ReorderConfig, area: Rect) -> Self {
        let collapsed = CollapsedSet::default();
        let layout = BoardLayout::compute(&board, area, &collapsed, &config);
        Self {
            board,
            collapsed,
            coordinator: ReorderCoordinator::new(config),
            layout,
            area,
            history: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    #[inline]
    pub fn coordinator(&self) -> &ReorderCoordinator {
        &self.coordinator
    }

    #[inline]
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn is_collapsed(&self, category: &str) -> bool {
        self.collapsed.contains(category)
    }

    /// Number of applied intents that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Feed one event, using the current time.
    pub fn handle_event(&mut self, event: &Event) -> Result<Vec<ReorderIntent>, BoardError> {
        self.handle_event_at(event, Instant::now())
    }

    /// Feed one event. Returns the intents applied as a result.
    pub fn handle_event_at(
        &mut self,
        event: &Event,
        now: Instant,
    ) -> Result<Vec<ReorderIntent>, BoardError> {
        match event {
            Event::Resize { width, height } => {
                self.area = Rect::new(self.area.x, self.area.y, *width, *height);
                self.relayout();
            }
            Event::Key(key) if key.kind == KeyEventKind::Press && !self.coordinator.is_dragging() => {
                if key.is_char('u') {
                    self.undo()?;
                } else if key.is_char('r') {
                    self.redo()?;
                }
            }
            _ => {}
        }

        let mut pending = IntentLog::new();
        self.coordinator
            .handle_event_at(event, now, &self.board, &self.layout, &mut pending);

        let mut applied = Vec::new();
        for reported in pending.drain() {
            match reported {
                ReorderEvent::Intent(intent) => {
                    self.apply(&intent)?;
                    applied.push(intent);
                }
                ReorderEvent::CollapseToggle(category) => {
                    self.toggle_collapse(&category);
                }
                ReorderEvent::DragStart(_) | ReorderEvent::DragEnd => {}
            }
        }
        Ok(applied)
    }

    /// Apply an intent and record it for undo. Clears the redo stack.
    pub fn apply(&mut self, intent: &ReorderIntent) -> Result<(), BoardError> {
        let entry = self.commit(intent)?;
        self.history.push(entry);
        self.redo_stack.clear();
        Ok(())
    }

    /// Collapse or expand a category. Returns the new collapsed state.
    pub fn toggle_collapse(&mut self, category: &str) -> bool {
        if self.board.container(category).is_none() {
            return false;
        }
        let collapsed = if self.collapsed.remove(category) {
            false
        } else {
            self.collapsed.insert(category.to_owned());
            true
        };
        debug!(target: LOG_TARGET, category, collapsed, "category toggled");
        self.relayout();
        collapsed
    }

    /// Revert the last applied intent. Returns `false` if there was none.
    pub fn undo(&mut self) -> Result<bool, BoardError> {
        let Some(entry) = self.history.pop() else {
            return Ok(false);
        };
        match &entry.intent {
            ReorderIntent::ItemMove {
                item_id,
                from_container,
                ..
            } => {
                let at = entry.origin.map(|loc| loc.index);
                self.board.move_item(item_id, from_container, at)?;
            }
            ReorderIntent::ItemReorder {
                container_id,
                from_index,
                to_index,
            } => self.board.reorder_items(container_id, *to_index, *from_index)?,
            ReorderIntent::ContainerReorder {
                from_index,
                to_index,
            } => self.board.reorder_containers(*to_index, *from_index)?,
        }
        info!(target: LOG_TARGET, intent = ?entry.intent, "intent undone");
        self.relayout();
        self.redo_stack.push(entry);
        Ok(true)
    }

    /// Re-apply the last undone intent. Returns `false` if there was none.
    pub fn redo(&mut self) -> Result<bool, BoardError> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(false);
        };
        let entry = self.commit(&entry.intent)?;
        self.history.push(entry);
        Ok(true)
    }

    /// Draw the menu into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        SortableBoard::new(&self.board, &self.layout, &self.coordinator)
            .actions(CATEGORY_ACTIONS)
            .render(self.area, frame);
    }

    fn commit(&mut self, intent: &ReorderIntent) -> Result<HistoryEntry, BoardError> {
        let origin = match intent {
            ReorderIntent::ItemMove { item_id, .. } => Some(
                self.board
                    .locate_item(item_id)
                    .ok_or_else(|| BoardError::UnknownItem(item_id.clone()))?,
            ),
            _ => None,
        };
        self.board.apply(intent)?;
        info!(target: LOG_TARGET, ?intent, "intent applied");
        self.relayout();
        Ok(HistoryEntry {
            intent: intent.clone(),
            origin,
        })
    }

    fn relayout(&mut self) {
        self.layout = BoardLayout::compute(
            &self.board,
            self.area,
            &self.collapsed,
            self.coordinator.config(),
        );
    }
}
