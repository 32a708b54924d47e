#![forbid(unsafe_code)]

//! Menu builder demo for the tray reorder engine.
//!
//! [`MenuBuilder`](menu_builder::MenuBuilder) is a complete caller: it owns
//! the menu, applies the intents the engine reports, and keeps undo/redo
//! history. The `tray-demo` binary replays a scripted gesture tape against
//! it and prints each frame and each applied intent.

pub mod cli;
pub mod error;
pub mod menu_builder;
pub mod replay;
pub mod tape;

pub use cli::run_from_env;
pub use error::DemoError;
