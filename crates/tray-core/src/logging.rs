#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, the same names resolve to no-op macros so call sites
//! never need their own `cfg` guards.
//!
//! The `tracing-json` feature adds [`init_json`], which installs a JSON
//! subscriber filtered by the `TRAY_LOG` environment variable.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// Stand-in for `tracing::Span` when tracing is compiled out.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NoopSpan;

    impl NoopSpan {
        /// Matches `tracing::Span::entered`.
        #[must_use]
        pub fn entered(self) -> Self {
            self
        }

        /// Matches `tracing::Span::in_scope`.
        pub fn in_scope<F: FnOnce() -> T, T>(&self, f: F) -> T {
            f()
        }
    }

    macro_rules! noop_event {
        ($($t:tt)*) => {{}};
    }

    macro_rules! noop_span {
        ($($t:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    pub(crate) use noop_event;
    pub(crate) use noop_span;
}

#[cfg(not(feature = "tracing"))]
pub use noop::NoopSpan;

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use noop::{
    noop_event as debug, noop_event as error, noop_event as info, noop_event as trace,
    noop_event as warn, noop_span as debug_span, noop_span as error_span, noop_span as info_span,
    noop_span as trace_span, noop_span as warn_span,
};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TRAY_LOG";

/// Install a JSON-formatted global subscriber.
///
/// The filter comes from `TRAY_LOG` (falling back to `info`). Returns an
/// error if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(true))
        .try_init()
}
