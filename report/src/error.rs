use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error types for report rendering and its inputs
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Failed to read history entry: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Log file not found: {path}")]
    LogNotFound { path: PathBuf },

    #[error("Invalid report '{name}': {message}")]
    InvalidReport { name: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl ReportError {
    /// Create a new invalid report error
    pub fn invalid_report<S: Into<String>>(name: S, message: S) -> Self {
        Self::InvalidReport {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
