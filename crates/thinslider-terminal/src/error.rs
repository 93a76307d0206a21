//! Error types for thinslider-terminal.

use std::path::PathBuf;
use thinslider_widgets::ConfigError;
use thiserror::Error;

/// Errors that can occur in the terminal host.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A slider description was rejected.
    #[error("Invalid slider: {0}")]
    Config(#[from] ConfigError),

    /// Config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ReadConfig {
        /// File that was requested
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::DemoConfig`].
    #[error("Invalid config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// Log file could not be created.
    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        /// File that was requested
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// A global logger was already installed.
    #[error("Logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// Final values could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
