//! Error types for the pool configuration system

use thiserror::Error;

/// Main error type for the pool configuration system
#[derive(Error, Debug)]
pub enum PoolConfigError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors when rendering a configuration record
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for pool configuration operations
pub type Result<T> = std::result::Result<T, PoolConfigError>;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl From<serde_json::Error> for PoolConfigError {
    fn from(err: serde_json::Error) -> Self {
        PoolConfigError::Serialization(err.to_string())
    }
}
