//! Environment resolution
//!
//! Builds the configuration record for a deployment environment by starting
//! from the base record and applying at most one environment override.

use crate::schema::{Config, LocationType};
use tracing::debug;
use types::Environment;

/// Override applied on top of the base record
pub type Override = fn(&mut Config);

/// API URL used while working on the dashboard locally
pub const DEVELOPMENT_API_URL: &str = "http://localhost:8080/";

/// Root element the test harness mounts the application into
pub const TEST_ROOT_ELEMENT: &str = "#ember-testing";

/// Resolves configuration records from environment names
#[derive(Debug, Clone, Default)]
pub struct EnvironmentResolver;

impl EnvironmentResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve the configuration for an environment name.
    ///
    /// Unrecognized names are accepted and receive the base record.
    pub fn resolve(&self, environment: &str) -> Config {
        self.resolve_environment(Environment::parse(environment))
    }

    /// Resolve the configuration for a parsed environment
    pub fn resolve_environment(&self, environment: Environment) -> Config {
        let overrides = Self::override_for(&environment);
        let mut config = Self::base(environment);

        match overrides {
            Some(apply) => {
                apply(&mut config);
                debug!(environment = %config.environment, "Applied environment overrides");
            }
            None => {
                debug!(
                    environment = %config.environment,
                    "Unrecognized environment, using base configuration"
                );
            }
        }

        config
    }

    /// Base record with the environment field set
    pub fn base(environment: Environment) -> Config {
        Config::base(environment)
    }

    /// Override table keyed by environment
    pub fn override_for(environment: &Environment) -> Option<Override> {
        match environment {
            Environment::Development => Some(apply_development),
            Environment::Test => Some(apply_test),
            Environment::Production => Some(apply_production),
            Environment::Unknown(_) => None,
        }
    }
}

/// Point the dashboard at a locally running API.
///
/// The router logging toggles stay unset here; they can be enabled through a
/// configuration overlay.
fn apply_development(config: &mut Config) {
    config.app.api_url = DEVELOPMENT_API_URL.to_string();
}

fn apply_test(config: &mut Config) {
    config.base_url = "/".to_string();
    config.location_type = LocationType::None;

    // quiet test output
    config.app.log_active_generation = Some(false);
    config.app.log_view_lookups = Some(false);

    config.app.root_element = Some(TEST_ROOT_ELEMENT.to_string());
}

/// Production uses the base record unchanged.
fn apply_production(_config: &mut Config) {}
