//! Shared types for the pool configuration system
//!
//! This crate contains the deployment environment identifier and the error
//! taxonomy shared by the configuration crate and the command line tool.

pub mod environment;
pub mod error;

// Re-export commonly used types
pub use environment::Environment;
pub use error::{ConfigError, PoolConfigError, Result};
