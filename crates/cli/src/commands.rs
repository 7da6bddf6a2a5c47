//! Subcommand implementations

use crate::OutputFormat;
use anyhow::{bail, Context, Result};
use config::{to_ember_string, Config, ConfigLoader, ConfigValidator, ValidationReport};
use std::path::Path;
use tracing::info;

/// Print the resolved configuration
pub fn resolve(environment: &str, overlay: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = ConfigLoader::load(environment, overlay).context("Failed to load configuration")?;

    println!("{}", render(&config, format)?);
    Ok(())
}

/// Render a configuration record in the requested format
pub fn render(config: &Config, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Ember => {
            to_ember_string(config).context("Failed to render dashboard configuration")?
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to render configuration as JSON")?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(config).context("Failed to render configuration as YAML")?
        }
    };

    Ok(output)
}

/// Validate the configuration and print the report.
///
/// Layers are merged without the loader's fail-fast validation so every
/// issue is reported at once.
pub fn validate(environment: &str, overlay: Option<&Path>) -> Result<()> {
    let config = ConfigLoader::load_unvalidated(environment, overlay)
        .context("Failed to load configuration")?;

    let report = ConfigValidator::validate(&config);
    print!("{}", format_report(&config, &report));

    if report.has_errors() {
        bail!("Configuration for '{}' is invalid", config.environment);
    }

    info!("{}", report.summary());
    Ok(())
}

/// Write an example overlay file
pub fn init(environment: &str, path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Refusing to overwrite existing file: {}", path.display());
    }

    ConfigLoader::create_example(environment, path)?;
    println!("Wrote {} configuration to {}", environment, path.display());
    Ok(())
}

/// Human readable validation report
pub fn format_report(config: &Config, report: &ValidationReport) -> String {
    let mut out = format!(
        "Environment: {}\n{}\n",
        config.environment,
        report.summary()
    );

    for issue in &report.errors {
        out.push_str(&format!("  error   {}: {}\n", issue.field, issue.message));
    }
    for issue in &report.warnings {
        out.push_str(&format!("  warning {}: {}\n", issue.field, issue.message));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::EnvironmentResolver;
    use tempfile::TempDir;

    #[test]
    fn test_render_formats() {
        let config = EnvironmentResolver::new().resolve("test");

        let ember = render(&config, OutputFormat::Ember).unwrap();
        assert!(ember.contains("\"modulePrefix\": \"pool\""));
        assert!(ember.contains("\"rootElement\": \"#ember-testing\""));

        let json = render(&config, OutputFormat::Json).unwrap();
        assert!(json.contains("\"module_prefix\": \"pool\""));
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let yaml = render(&config, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("location_type: none"));
    }

    #[test]
    fn test_format_report() {
        let mut config = EnvironmentResolver::new().resolve("production");
        config.app.block_time = -1.0;
        let report = ConfigValidator::validate(&config);

        let text = format_report(&config, &report);
        assert!(text.starts_with("Environment: production\n"));
        assert!(text.contains("error   app.block_time:"));
        assert!(text.contains("warning app.api_url:"));
    }

    #[test]
    fn test_validate_reports_invalid_overlay() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.yaml");
        std::fs::write(&path, "app:\n  pool_fee: \"lots\"\n  block_time: 0\n").unwrap();

        assert!(validate("development", Some(path.as_path())).is_err());
    }

    #[test]
    fn test_init_writes_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.yaml");

        init("production", &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("environment: production"));

        assert!(init("production", &path).is_err());
    }
}
