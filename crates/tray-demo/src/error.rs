use thiserror::Error;
use tray_widgets::{BoardError, ConfigError};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid menu: {0}")]
    Board(#[from] BoardError),
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to parse menu JSON: {0}")]
    MenuJson(#[source] serde_json::Error),
    #[error("failed to encode intent: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}

impl DemoError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Board(_) | Self::MenuJson(_) => 65,
            Self::Config(_) => 78,
            Self::Io(_) => 74,
            Self::Encode(_) | Self::Logging(_) => 70,
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
