#![forbid(unsafe_code)]

//! Core: input events, geometry, and gesture recognition.
//!
//! # Role in tray
//! `tray-core` is the input layer. It owns the normalized event types the
//! reorder engine consumes, the [`Rect`](geometry::Rect) primitive every
//! layout and collision computation is expressed in, and the
//! [`GestureRecognizer`](gesture::GestureRecognizer) that turns raw pointer
//! traffic into drag sequences.
//!
//! # How it fits in the system
//! `tray-widgets` feeds `tray-core::Event` values through the recognizer and
//! maps the resulting [`SemanticEvent`](semantic_event::SemanticEvent)s onto
//! drag ids and drop targets. `tray-render` only depends on geometry.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod semantic_event;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
