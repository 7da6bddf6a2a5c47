//! Configuration loader implementation

use crate::resolver::EnvironmentResolver;
use crate::schema::Config;
use crate::validation::ConfigValidator;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use std::path::Path;
use tracing::{info, warn};
use types::{ConfigError, Environment, PoolConfigError};

/// Prefix for environment variable overrides, nested keys split on `__`
pub const ENV_PREFIX: &str = "POOL_";

/// Configuration loader that layers overlays on top of the resolved record
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for an environment from an optional YAML overlay
    /// and `POOL_` environment variables
    pub fn load<P: AsRef<Path>>(environment: &str, overlay_path: Option<P>) -> Result<Config> {
        let config = Self::load_unvalidated(environment, overlay_path)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Merge the layers without validating the result
    pub fn load_unvalidated<P: AsRef<Path>>(
        environment: &str,
        overlay_path: Option<P>,
    ) -> Result<Config> {
        let environment = Environment::parse(environment);
        let mut figment = Self::base_figment(&environment);

        if let Some(path) = overlay_path {
            let path = path.as_ref();

            // Check if overlay file exists
            if !path.exists() {
                return Err(PoolConfigError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
                .into());
            }

            info!("Applying configuration overlay from {}", path.display());
            figment = figment.merge(Yaml::file(path));
        }

        // the environment is chosen by the caller, never by a variable
        let env_layer = Env::prefixed(ENV_PREFIX).ignore(&["environment"]).split("__");

        let config: Config = figment
            .merge(env_layer)
            .extract()
            .context("Failed to parse configuration")?;

        Ok(Self::pin_environment(environment, config))
    }

    /// Load configuration from a YAML overlay string (for testing)
    pub fn load_from_str(environment: &str, yaml_content: &str) -> Result<Config> {
        let environment = Environment::parse(environment);
        let config: Config = Self::base_figment(&environment)
            .merge(Yaml::string(yaml_content))
            .extract()
            .context("Failed to parse configuration from string")?;

        let config = Self::pin_environment(environment, config);
        Self::validate(&config)?;
        Ok(config)
    }

    fn base_figment(environment: &Environment) -> Figment {
        let resolved = EnvironmentResolver::new().resolve_environment(environment.clone());
        Figment::from(Serialized::defaults(resolved))
    }

    fn pin_environment(environment: Environment, mut config: Config) -> Config {
        if config.environment != environment {
            warn!(
                requested = %environment,
                overlay = %config.environment,
                "Overlay cannot change the environment, keeping the requested one"
            );
            config.environment = environment;
        }

        config
    }

    /// Validate configuration, failing on the first error
    fn validate(config: &Config) -> Result<()> {
        let report = ConfigValidator::validate(config);

        for warning in &report.warnings {
            warn!(field = %warning.field, "{}", warning.message);
        }

        if let Some(error) = report.errors.first() {
            return Err(PoolConfigError::Config(ConfigError::ValidationError {
                field: error.field.clone(),
                message: error.message.clone(),
            })
            .into());
        }

        Ok(())
    }

    /// Create example overlay file holding the resolved record for an environment
    pub fn create_example<P: AsRef<Path>>(environment: &str, path: P) -> Result<()> {
        let config = EnvironmentResolver::new().resolve(environment);
        let yaml_content = serde_yaml::to_string(&config)
            .context("Failed to serialize resolved configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}
