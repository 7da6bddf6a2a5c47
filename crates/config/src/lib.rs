//! Configuration management for the mining pool dashboard
//!
//! This crate resolves the dashboard configuration record for a deployment
//! environment, layers YAML and environment variable overlays on top of it,
//! validates the result and renders it for the front-end build.

pub mod export;
pub mod loader;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use export::{to_ember_json, to_ember_string};
pub use loader::ConfigLoader;
pub use resolver::EnvironmentResolver;
pub use schema::*;
pub use validation::*;
