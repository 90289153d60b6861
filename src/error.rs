//! Unified error types for the design-tui application.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving or loading preview components.
///
/// Missing artifacts are not errors; they surface as `None` or empty lists.
/// Load results are cached and shared between callers, hence `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Failed to load {key}: {reason}")]
    LoadFailed { key: String, reason: String },

    #[error("Shell component is not renderable: {0}")]
    InvalidShell(String),
}

impl PreviewError {
    /// Create a load failure for a component key
    pub fn load_failed(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::LoadFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for preview operations
pub type PreviewResult<T> = std::result::Result<T, PreviewError>;
