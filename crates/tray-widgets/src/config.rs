#![forbid(unsafe_code)]

//! Tunables for the reorder engine.
//!
//! [`ReorderConfig`] gathers the gesture thresholds, layout constants, and
//! preview placement used across the coordinator and widgets. With the
//! `policy-config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! drag_threshold = 2
//! collapsed_min_height = 3
//! empty_placeholder = "Drop dishes here"
//! ```
//!
//! ```rust,ignore
//! let config = ReorderConfig::from_toml_file("tray.toml")?;
//! ```
//!
//! `ReorderConfig::default()` matches the built-in constants.

#[cfg(feature = "policy-config")]
use std::path::Path;

use tray_core::gesture::{DEFAULT_DRAG_THRESHOLD, GestureConfig};
use web_time::Duration;

#[cfg(feature = "policy-config")]
use crate::error::ConfigError;

/// Default rows a collapsed container keeps so it stays a drop target.
pub const DEFAULT_COLLAPSED_MIN_HEIGHT: u16 = 2;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderConfig {
    /// Manhattan distance (cells) before a press on a handle becomes a drag.
    pub drag_threshold: u16,
    /// Milliseconds the button must be held before a drag may start.
    pub start_delay_ms: u64,
    /// Whether Escape cancels an active drag.
    pub cancel_on_escape: bool,
    /// Minimum rows of a collapsed container, header included.
    pub collapsed_min_height: u16,
    /// Blank rows between stacked containers.
    pub container_gap: u16,
    /// Preview offset from the pointer, in cells.
    pub preview_offset_x: i16,
    pub preview_offset_y: i16,
    /// Maximum preview width in cells.
    pub preview_width: u16,
    /// Grab-handle glyph. Must be one cell wide.
    pub handle_glyph: String,
    /// Text shown in a container with no items.
    pub empty_placeholder: String,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            start_delay_ms: 0,
            cancel_on_escape: true,
            collapsed_min_height: DEFAULT_COLLAPSED_MIN_HEIGHT,
            container_gap: 1,
            preview_offset_x: 1,
            preview_offset_y: 1,
            preview_width: 24,
            handle_glyph: "⠿".to_owned(),
            empty_placeholder: "No items yet".to_owned(),
        }
    }
}

impl ReorderConfig {
    #[must_use]
    pub fn with_threshold(mut self, cells: u16) -> Self {
        self.drag_threshold = cells;
        self
    }

    #[must_use]
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.start_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn no_escape_cancel(mut self) -> Self {
        self.cancel_on_escape = false;
        self
    }

    #[must_use]
    pub fn with_collapsed_min_height(mut self, rows: u16) -> Self {
        self.collapsed_min_height = rows;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, rows: u16) -> Self {
        self.container_gap = rows;
        self
    }

    #[must_use]
    pub fn with_preview(mut self, offset_x: i16, offset_y: i16, width: u16) -> Self {
        self.preview_offset_x = offset_x;
        self.preview_offset_y = offset_y;
        self.preview_width = width;
        self
    }

    #[must_use]
    pub fn with_handle_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.handle_glyph = glyph.into();
        self
    }

    #[must_use]
    pub fn with_empty_placeholder(mut self, text: impl Into<String>) -> Self {
        self.empty_placeholder = text.into();
        self
    }

    /// Gesture recognizer settings derived from this config.
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            drag_threshold: self.drag_threshold,
            start_delay: Duration::from_millis(self.start_delay_ms),
            cancel_on_escape: self.cancel_on_escape,
        }
    }

    /// Check every field. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.drag_threshold == 0 {
            errors.push("drag_threshold must be > 0".into());
        }
        if self.collapsed_min_height == 0 {
            errors.push("collapsed_min_height must be > 0".into());
        }
        if self.preview_width == 0 {
            errors.push("preview_width must be > 0".into());
        }
        let glyph_width = tray_render::display_width(&self.handle_glyph);
        if glyph_width != 1 {
            errors.push(format!(
                "handle_glyph must be exactly one cell wide, got {glyph_width}"
            ));
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "policy-config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ReorderConfig::default().validate().is_empty());
    }

    #[test]
    fn default_gesture_config_matches_core() {
        assert_eq!(ReorderConfig::default().gesture_config(), GestureConfig::default());
    }

    #[test]
    fn builders_compose() {
        let config = ReorderConfig::default()
            .with_threshold(5)
            .with_delay_ms(120)
            .no_escape_cancel()
            .with_collapsed_min_height(3)
            .with_preview(2, 0, 30);
        let gesture = config.gesture_config();
        assert_eq!(gesture.drag_threshold, 5);
        assert_eq!(gesture.start_delay, Duration::from_millis(120));
        assert!(!gesture.cancel_on_escape);
        assert_eq!(config.collapsed_min_height, 3);
        assert_eq!(config.preview_width, 30);
    }

    #[test]
    fn validate_catches_zero_threshold() {
        let errors = ReorderConfig::default().with_threshold(0).validate();
        assert!(errors.iter().any(|e| e.contains("drag_threshold")));
    }

    #[test]
    fn validate_catches_wide_handle() {
        let errors = ReorderConfig::default().with_handle_glyph("⇕⇕").validate();
        assert!(errors.iter().any(|e| e.contains("handle_glyph")));
        let errors = ReorderConfig::default().with_handle_glyph("").validate();
        assert!(errors.iter().any(|e| e.contains("got 0")));
    }

    #[test]
    fn validate_catches_zero_min_height() {
        let errors = ReorderConfig::default()
            .with_collapsed_min_height(0)
            .validate();
        assert_eq!(errors.len(), 1);
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn toml_partial_overrides_defaults() {
        let config = ReorderConfig::from_toml_str(
            "drag_threshold = 2\nempty_placeholder = \"Drop dishes here\"\n",
        )
        .unwrap();
        assert_eq!(config.drag_threshold, 2);
        assert_eq!(config.empty_placeholder, "Drop dishes here");
        assert_eq!(config.collapsed_min_height, DEFAULT_COLLAPSED_MIN_HEIGHT);
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn json_invalid_values_are_rejected() {
        let err = ReorderConfig::from_json_str(r#"{"preview_width": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = ReorderConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = ReorderConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
