#![forbid(unsafe_code)]

//! Error types for board construction, id parsing, and config loading.
//!
//! Gesture resolution itself never errors: a failed lookup while classifying
//! a drop degrades to "no mutation". These types cover the caller-facing
//! edges around it.

use std::fmt;

/// Errors from building or mutating a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Two containers share an id.
    DuplicateContainer(String),
    /// An item id appears twice, in the same or in different containers.
    DuplicateItem {
        item_id: String,
        first_container: String,
        second_container: String,
    },
    /// No container with this id.
    UnknownContainer(String),
    /// No item with this id.
    UnknownItem(String),
    /// A position outside the sequence it indexes.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateContainer(id) => write!(f, "duplicate container id {id:?}"),
            Self::DuplicateItem {
                item_id,
                first_container,
                second_container,
            } => write!(
                f,
                "item {item_id:?} appears in both {first_container:?} and {second_container:?}"
            ),
            Self::UnknownContainer(id) => write!(f, "unknown container {id:?}"),
            Self::UnknownItem(id) => write!(f, "unknown item {id:?}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Errors from [`DragId::parse`](crate::id::DragId::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragIdError {
    /// The string has neither the `item-` nor the `container-` prefix.
    MissingNamespace(String),
    /// The prefix is present but nothing follows it.
    EmptyId,
}

impl fmt::Display for DragIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNamespace(raw) => {
                write!(f, "drag id {raw:?} has no item-/container- namespace")
            }
            Self::EmptyId => f.write_str("drag id is empty after its namespace"),
        }
    }
}

impl std::error::Error for DragIdError {}

/// Errors that can occur when loading a [`ReorderConfig`](crate::config::ReorderConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// The config parsed but failed validation.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
