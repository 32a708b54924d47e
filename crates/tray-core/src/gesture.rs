#![forbid(unsafe_code)]

//! Gesture recognition: turns raw pointer/key events into drag intentions.
//!
//! [`GestureRecognizer`] is a small state machine fed one [`Event`] at a time.
//! It emits [`SemanticEvent`]s describing clicks and drag sequences.
//!
//! # State Machine
//!
//! ```text
//! idle ──down──▶ pressed ──move ≥ threshold (and delay elapsed)──▶ dragging
//!   ▲              │                                                │
//!   │            up│ (Click)                          up (DragEnd) / Esc, blur (DragCancel)
//!   └──────────────┴────────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Drag and Click never both emit for one press/release pair.
//! 2. A `DragStart` is always followed by exactly one `DragEnd` or
//!    `DragCancel` (or by `reset()`, which the caller owns).
//! 3. Only one press is tracked at a time; a second button pressed during a
//!    press or drag is ignored.
//!
//! # Failure Modes
//!
//! - A `Drag` event without a preceding press arms a tracker at that
//!   position, so terminals that drop the press report still produce drags.
//! - Focus loss during a drag emits `DragCancel`.

use web_time::{Duration, Instant};

use crate::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crate::semantic_event::{Position, SemanticEvent};

use crate::logging::{debug, trace};

/// Default manhattan distance (cells) before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: u16 = 3;

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Minimum manhattan distance (cells) before a drag starts (default: 3).
    pub drag_threshold: u16,
    /// Minimum time the button must be held before movement can start a
    /// drag (default: zero).
    pub start_delay: Duration,
    /// Whether Escape cancels an active drag (default: true).
    pub cancel_on_escape: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            start_delay: Duration::ZERO,
            cancel_on_escape: true,
        }
    }
}

impl GestureConfig {
    /// Set the drag threshold.
    #[must_use]
    pub fn with_threshold(mut self, cells: u16) -> Self {
        self.drag_threshold = cells;
        self
    }

    /// Set the press-and-hold delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Keep drags alive when Escape is pressed.
    #[must_use]
    pub fn no_escape_cancel(mut self) -> Self {
        self.cancel_on_escape = false;
        self
    }
}

/// Tracks an ongoing or potential drag.
#[derive(Debug, Clone)]
struct DragTracker {
    start_pos: Position,
    button: MouseButton,
    pressed_at: Instant,
    last_pos: Position,
    started: bool,
}

/// Stateful recognizer for clicks and drag sequences.
pub struct GestureRecognizer {
    config: GestureConfig,
    drag: Option<DragTracker>,
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("pressed", &self.drag.is_some())
            .field("dragging", &self.is_dragging())
            .finish()
    }
}

impl GestureRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config, drag: None }
    }

    /// Process a raw event, returning any semantic events produced.
    ///
    /// Most events produce zero or one semantic event. The first movement
    /// past the threshold produces `DragStart` followed by `DragMove`.
    pub fn process(&mut self, event: &Event, now: Instant) -> Vec<SemanticEvent> {
        let mut out = Vec::with_capacity(2);

        match event {
            Event::Mouse(mouse) => {
                let pos = Position::new(mouse.x, mouse.y);
                match mouse.kind {
                    MouseEventKind::Down(button) => self.on_mouse_down(pos, button, now),
                    MouseEventKind::Up(button) => self.on_mouse_up(pos, button, &mut out),
                    MouseEventKind::Drag(button) => {
                        self.on_mouse_drag(pos, button, now, &mut out);
                    }
                    _ => {}
                }
            }
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Escape
                    && self.config.cancel_on_escape
                {
                    if self.cancel(&mut out) {
                        debug!("drag cancelled by escape");
                    }
                }
            }
            Event::Focus(false) => {
                if self.cancel(&mut out) {
                    debug!("drag cancelled by focus loss");
                }
            }
            _ => {}
        }

        out
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|d| d.started)
    }

    /// Whether a button is held (pressed or dragging).
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.drag.is_some()
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.drag = None;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next press.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

impl GestureRecognizer {
    fn on_mouse_down(&mut self, pos: Position, button: MouseButton, now: Instant) {
        if self.drag.is_some() {
            trace!(x = pos.x, y = pos.y, "second press ignored while a press is tracked");
            return;
        }
        self.drag = Some(DragTracker {
            start_pos: pos,
            button,
            pressed_at: now,
            last_pos: pos,
            started: false,
        });
    }

    fn on_mouse_up(&mut self, pos: Position, button: MouseButton, out: &mut Vec<SemanticEvent>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.button != button {
            // Release of some other button; keep tracking the original press.
            self.drag = Some(drag);
            return;
        }
        if drag.started {
            debug!(
                start_x = drag.start_pos.x,
                start_y = drag.start_pos.y,
                end_x = pos.x,
                end_y = pos.y,
                "drag ended"
            );
            out.push(SemanticEvent::DragEnd {
                start: drag.start_pos,
                end: pos,
            });
        } else {
            out.push(SemanticEvent::Click { pos, button });
        }
    }

    fn on_mouse_drag(
        &mut self,
        pos: Position,
        button: MouseButton,
        now: Instant,
        out: &mut Vec<SemanticEvent>,
    ) {
        let Some(ref mut drag) = self.drag else {
            self.drag = Some(DragTracker {
                start_pos: pos,
                button,
                pressed_at: now,
                last_pos: pos,
                started: false,
            });
            return;
        };
        if drag.button != button {
            return;
        }

        if !drag.started {
            let distance = drag.start_pos.manhattan_distance(pos);
            let held = now.saturating_duration_since(drag.pressed_at);
            if distance >= u32::from(self.config.drag_threshold) && held >= self.config.start_delay
            {
                drag.started = true;
                debug!(x = drag.start_pos.x, y = drag.start_pos.y, "drag started");
                out.push(SemanticEvent::DragStart {
                    pos: drag.start_pos,
                    button: drag.button,
                });
            }
        }

        if drag.started {
            let delta = (
                pos.x as i16 - drag.last_pos.x as i16,
                pos.y as i16 - drag.last_pos.y as i16,
            );
            out.push(SemanticEvent::DragMove {
                start: drag.start_pos,
                current: pos,
                delta,
            });
        }

        drag.last_pos = pos;
    }

    /// Drop any tracked press. Returns true if an active drag was cancelled.
    fn cancel(&mut self, out: &mut Vec<SemanticEvent>) -> bool {
        match self.drag.take() {
            Some(drag) if drag.started => {
                out.push(SemanticEvent::DragCancel);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEvent, MouseEvent};

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(kind, x, y))
    }

    fn down(x: u16, y: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    fn drag(x: u16, y: u16) -> Event {
        mouse(MouseEventKind::Drag(MouseButton::Left), x, y)
    }

    fn up(x: u16, y: u16) -> Event {
        mouse(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    fn esc() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Escape))
    }

    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn press_release_in_place_is_click() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();

        assert!(gr.process(&down(5, 5), t).is_empty());
        let events = gr.process(&up(5, 5), t + MS_50);
        assert_eq!(
            events,
            vec![SemanticEvent::Click {
                pos: Position::new(5, 5),
                button: MouseButton::Left,
            }]
        );
    }

    #[test]
    fn drag_starts_after_threshold() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();

        gr.process(&down(5, 5), t);
        assert!(gr.process(&drag(6, 5), t + MS_50).is_empty());
        assert!(!gr.is_dragging());

        let events = gr.process(&drag(10, 5), t + MS_100);
        assert!(matches!(
            events[0],
            SemanticEvent::DragStart {
                pos: Position { x: 5, y: 5 },
                ..
            }
        ));
        assert!(matches!(
            events[1],
            SemanticEvent::DragMove {
                current: Position { x: 10, y: 5 },
                delta: (4, 0),
                ..
            }
        ));
        assert!(gr.is_dragging());
    }

    #[test]
    fn release_after_drag_is_drag_end_not_click() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();

        gr.process(&down(5, 5), t);
        gr.process(&drag(5, 9), t + MS_50);
        let events = gr.process(&up(5, 10), t + MS_100);
        assert_eq!(
            events,
            vec![SemanticEvent::DragEnd {
                start: Position::new(5, 5),
                end: Position::new(5, 10),
            }]
        );
        assert!(!gr.is_dragging());
        assert!(!gr.is_pressed());
    }

    #[test]
    fn escape_cancels_active_drag() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();

        gr.process(&down(5, 5), t);
        gr.process(&drag(10, 5), t + MS_50);
        assert_eq!(gr.process(&esc(), t + MS_100), vec![SemanticEvent::DragCancel]);
        assert!(!gr.is_dragging());

        // The release after a cancel is swallowed.
        assert!(gr.process(&up(10, 5), t + MS_100).is_empty());
    }

    #[test]
    fn escape_without_drag_emits_nothing() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&down(5, 5), t);
        assert!(gr.process(&esc(), t).is_empty());
        assert!(!gr.is_pressed());
    }

    #[test]
    fn escape_ignored_when_disabled() {
        let mut gr = GestureRecognizer::new(GestureConfig::default().no_escape_cancel());
        let t = Instant::now();
        gr.process(&down(5, 5), t);
        gr.process(&drag(10, 5), t + MS_50);
        assert!(gr.process(&esc(), t + MS_100).is_empty());
        assert!(gr.is_dragging());
    }

    #[test]
    fn focus_loss_cancels_drag() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&down(5, 5), t);
        gr.process(&drag(10, 5), t + MS_50);
        assert_eq!(
            gr.process(&Event::Focus(false), t + MS_100),
            vec![SemanticEvent::DragCancel]
        );
    }

    #[test]
    fn start_delay_holds_back_drag() {
        let config = GestureConfig::default().with_delay(Duration::from_millis(200));
        let mut gr = GestureRecognizer::new(config);
        let t = Instant::now();

        gr.process(&down(5, 5), t);
        assert!(gr.process(&drag(12, 5), t + MS_50).is_empty());
        let events = gr.process(&drag(13, 5), t + Duration::from_millis(250));
        assert!(matches!(events[0], SemanticEvent::DragStart { .. }));
    }

    #[test]
    fn drag_without_press_arms_tracker() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();
        assert!(gr.process(&drag(0, 0), t).is_empty());
        assert!(gr.is_pressed());
        let events = gr.process(&drag(0, 4), t + MS_50);
        assert!(matches!(events[0], SemanticEvent::DragStart { .. }));
    }

    #[test]
    fn other_button_release_is_ignored() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&down(5, 5), t);
        gr.process(&drag(10, 5), t + MS_50);
        let events = gr.process(
            &mouse(MouseEventKind::Up(MouseButton::Right), 10, 5),
            t + MS_100,
        );
        assert!(events.is_empty());
        assert!(gr.is_dragging());
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut gr = GestureRecognizer::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&down(5, 5), t);
        gr.process(&drag(10, 5), t + MS_50);
        gr.reset();
        assert!(!gr.is_dragging());
        assert!(gr.process(&up(10, 5), t + MS_100).is_empty());
    }
}
