#![forbid(unsafe_code)]

//! The reorder coordinator: one gesture session at a time.
//!
//! The coordinator owns the active drag, picks the collision strategy for
//! it, and turns a completed gesture into at most one
//! [`ReorderIntent`], reported through a [`ReorderHandler`].
//!
//! # State Machine
//!
//! ```text
//! idle ──press on handle + threshold──▶ dragging ──release──▶ classify ──▶ idle
//!                                          │
//!                                          └──Esc / focus lost──▶ idle (no intent)
//! ```
//!
//! # Invariants
//!
//! 1. `on_drag_start` and `on_drag_end` fire exactly once per session, in
//!    that order, with at most one mutation callback between them.
//! 2. The session is cleared when the gesture ends, whatever the outcome.
//! 3. A second `drag_start` while a session is active is rejected.
//! 4. Collision candidates are computed only while dragging.
//!
//! # Driving it
//!
//! Hosts either feed raw events to [`ReorderCoordinator::handle_event`]
//! (which runs the gesture recognizer and hit-tests handles against a
//! [`BoardLayout`]) or call the programmatic `drag_start` / `drag_move` /
//! `drag_over` / `drag_end` / `drag_cancel` directly.

use tray_core::event::{Event, MouseButton, MouseEventKind};
use tray_core::geometry::Rect;
use tray_core::gesture::GestureRecognizer;
use tray_core::semantic_event::{Position, SemanticEvent};
use tracing::{debug, info, warn};
use web_time::Instant;

use crate::board::Board;
use crate::classify::classify;
use crate::collision::CollisionStrategy;
use crate::config::ReorderConfig;
use crate::context::DragContext;
use crate::drop_line::DropLine;
use crate::id::DragId;
use crate::intent::{ReorderHandler, ReorderIntent};
use crate::layout::BoardLayout;
use crate::preview::{DragPreview, preview_label};

/// Log target for coordinator events.
pub const LOG_TARGET: &str = "tray::reorder";

/// An active drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub active: DragId,
    pub over: Option<DragId>,
    pub strategy: CollisionStrategy,
    /// Pointer position where the drag began.
    pub origin: Position,
    pub pointer: Position,
    /// Rectangle of the source when the drag began.
    pub initial_rect: Rect,
    pub started_at: Instant,
}

impl DragSession {
    /// The source rectangle moved along with the pointer.
    pub fn dragged_rect(&self) -> Rect {
        let (dx, dy) = self.pointer.offset_from(self.origin);
        self.initial_rect.translate(dx, dy)
    }
}

/// A press on a handle waiting for the recognizer to confirm a drag.
#[derive(Debug, Clone)]
struct ArmedSource {
    id: DragId,
    rect: Rect,
}

/// Gesture-sensing boundary around a board.
#[derive(Debug)]
pub struct ReorderCoordinator {
    config: ReorderConfig,
    recognizer: GestureRecognizer,
    armed: Option<ArmedSource>,
    session: Option<DragSession>,
}

impl Default for ReorderCoordinator {
    fn default() -> Self {
        Self::new(ReorderConfig::default())
    }
}

impl ReorderCoordinator {
    pub fn new(config: ReorderConfig) -> Self {
        Self {
            recognizer: GestureRecognizer::new(config.gesture_config()),
            config,
            armed: None,
            session: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Replace the config. The gesture thresholds apply from the next press.
    pub fn set_config(&mut self, config: ReorderConfig) {
        self.recognizer.set_config(config.gesture_config());
        self.config = config;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Snapshot of the active drag for widgets.
    pub fn context(&self) -> DragContext {
        match &self.session {
            Some(s) => DragContext {
                active: Some(s.active.clone()),
                over: s.over.clone(),
            },
            None => DragContext::idle(),
        }
    }

    // ── Programmatic API ────────────────────────────────────────────────

    /// Begin a session for `active`. Returns `false` if one is already active.
    pub fn drag_start<H: ReorderHandler + ?Sized>(&mut self, active: DragId, handler: &mut H) -> bool {
        self.begin(active, Position::default(), Rect::default(), handler)
    }

    /// Begin a session with geometry, so [`drag_move`](Self::drag_move) can
    /// run collision detection.
    pub fn begin<H: ReorderHandler + ?Sized>(
        &mut self,
        active: DragId,
        origin: Position,
        initial_rect: Rect,
        handler: &mut H,
    ) -> bool {
        if let Some(current) = &self.session {
            warn!(
                target: LOG_TARGET,
                active = %current.active,
                rejected = %active,
                "drag start rejected: a session is already active"
            );
            return false;
        }
        let strategy = CollisionStrategy::for_active(&active);
        info!(target: LOG_TARGET, active = %active, ?strategy, "drag session started");
        handler.on_drag_start(&active);
        self.session = Some(DragSession {
            active,
            over: None,
            strategy,
            origin,
            pointer: origin,
            initial_rect,
            started_at: Instant::now(),
        });
        true
    }

    /// Move the pointer and recompute the drop target from `layout`.
    pub fn drag_move(&mut self, pointer: Position, layout: &BoardLayout) -> Option<&DragId> {
        let session = self.session.as_mut()?;
        session.pointer = pointer;
        let targets = layout.drop_targets();
        let over = session
            .strategy
            .detect(session.dragged_rect(), pointer, &targets)
            .map(|t| t.id.clone());
        if over != session.over {
            debug!(
                target: LOG_TARGET,
                active = %session.active,
                over = ?over,
                "drop target changed"
            );
            session.over = over;
        }
        session.over.as_ref()
    }

    /// Set the drop target directly, bypassing collision detection.
    pub fn drag_over(&mut self, over: Option<DragId>) {
        if let Some(session) = self.session.as_mut() {
            session.over = over;
        }
    }

    /// Complete the gesture: classify, report, and clear the session.
    pub fn drag_end<H: ReorderHandler + ?Sized>(
        &mut self,
        board: &Board,
        handler: &mut H,
    ) -> Option<ReorderIntent> {
        let session = self.session.take()?;
        let intent = classify(board, &session.active, session.over.as_ref());
        let elapsed_ms = session.started_at.elapsed().as_millis() as u64;
        match &intent {
            Some(intent) => {
                info!(
                    target: LOG_TARGET,
                    active = %session.active,
                    ?intent,
                    elapsed_ms,
                    "drag resolved"
                );
                intent.dispatch(handler);
            }
            None => info!(
                target: LOG_TARGET,
                active = %session.active,
                over = ?session.over,
                elapsed_ms,
                "drag ended without a mutation"
            ),
        }
        handler.on_drag_end();
        intent
    }

    /// Abandon the gesture without a mutation.
    pub fn drag_cancel<H: ReorderHandler + ?Sized>(&mut self, handler: &mut H) {
        if let Some(session) = self.session.take() {
            info!(target: LOG_TARGET, active = %session.active, "drag cancelled");
            handler.on_drag_end();
        }
    }

    // ── Event-driven API ────────────────────────────────────────────────

    /// Feed one input event, using the current time.
    pub fn handle_event<H: ReorderHandler + ?Sized>(
        &mut self,
        event: &Event,
        board: &Board,
        layout: &BoardLayout,
        handler: &mut H,
    ) -> Option<ReorderIntent> {
        self.handle_event_at(event, Instant::now(), board, layout, handler)
    }

    /// Feed one input event at an explicit timestamp.
    pub fn handle_event_at<H: ReorderHandler + ?Sized>(
        &mut self,
        event: &Event,
        now: Instant,
        board: &Board,
        layout: &BoardLayout,
        handler: &mut H,
    ) -> Option<ReorderIntent> {
        if let Event::Mouse(mouse) = event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.session.is_none()
            && !self.recognizer.is_pressed()
        {
            self.armed = layout
                .handle_at(mouse.x, mouse.y)
                .map(|(id, rect)| ArmedSource { id, rect });
        }

        let mut result = None;
        for semantic in self.recognizer.process(event, now) {
            match semantic {
                SemanticEvent::DragStart { pos, .. } => {
                    if let Some(armed) = self.armed.take() {
                        self.begin(armed.id, pos, armed.rect, handler);
                    }
                }
                SemanticEvent::DragMove { current, .. } => {
                    self.drag_move(current, layout);
                }
                SemanticEvent::DragEnd { end, .. } => {
                    if self.session.is_some() {
                        self.drag_move(end, layout);
                        result = self.drag_end(board, handler);
                    }
                }
                SemanticEvent::DragCancel => self.drag_cancel(handler),
                SemanticEvent::Click { pos, button } => {
                    self.armed = None;
                    if button == MouseButton::Left
                        && let Some(container_id) = layout.toggle_at(pos.x, pos.y)
                    {
                        debug!(target: LOG_TARGET, container = container_id, "collapse toggled");
                        handler.on_collapse_toggle(container_id);
                    }
                }
            }
        }

        if !self.recognizer.is_pressed() {
            self.armed = None;
        }
        result
    }

    // ── Overlays ────────────────────────────────────────────────────────

    /// Preview label and pointer for the active drag.
    pub fn preview_state(&self, board: &Board) -> Option<(String, Position)> {
        let session = self.session.as_ref()?;
        preview_label(board, &session.active).map(|label| (label, session.pointer))
    }

    /// Build the preview widget from a label obtained via
    /// [`preview_state`](Self::preview_state).
    pub fn preview<'a>(&'a self, label: &'a str, pointer: Position) -> DragPreview<'a> {
        DragPreview::new(label, pointer, &self.config)
    }

    /// Insertion indicator for the active drag, if it has one.
    pub fn drop_line(&self, board: &Board, layout: &BoardLayout) -> Option<DropLine> {
        let session = self.session.as_ref()?;
        DropLine::compute(board, layout, &session.active, session.over.as_ref())
    }
}
