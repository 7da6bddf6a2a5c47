//! Configuration validation utilities

use crate::schema::{Config, LocationType};
use types::Environment;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_application(config, &mut report);
        Self::validate_api(config, &mut report);
        Self::validate_endpoints(config, &mut report);
        Self::validate_economics(config, &mut report);
        Self::validate_analytics(config, &mut report);
        Self::validate_environment(config, &mut report);

        report
    }

    fn validate_application(config: &Config, report: &mut ValidationReport) {
        if config.module_prefix.is_empty() {
            report.add_error("module_prefix", "Module prefix cannot be empty");
        }

        if !config.base_url.starts_with('/') {
            report.add_error(
                "base_url",
                &format!("Base URL must start with '/': {}", config.base_url),
            );
        }

        if config.features.keys().any(|name| name.trim().is_empty()) {
            report.add_error("features", "Feature flag names cannot be empty");
        }
    }

    fn validate_api(config: &Config, report: &mut ValidationReport) {
        let api_url = &config.app.api_url;
        if api_url.is_empty() {
            report.add_error("app.api_url", "API URL cannot be empty");
        } else if !api_url.starts_with("http://")
            && !api_url.starts_with("https://")
            && !api_url.starts_with("//")
        {
            report.add_error(
                "app.api_url",
                "API URL must start with http://, https://, or // (protocol-relative)",
            );
        }
    }

    fn validate_endpoints(config: &Config, report: &mut ValidationReport) {
        if config.app.http_host.is_empty() {
            report.add_error("app.http_host", "HTTP mining host cannot be empty");
        }

        if config.app.http_port == 0 {
            report.add_error("app.http_port", "HTTP mining port cannot be 0");
        }

        if config.app.stratum_host.is_empty() {
            report.add_error("app.stratum_host", "Stratum host cannot be empty");
        }

        if config.app.stratum_port == 0 {
            report.add_error("app.stratum_port", "Stratum port cannot be 0");
        }
    }

    fn validate_economics(config: &Config, report: &mut ValidationReport) {
        match config.pool_fee_percent() {
            Ok(fee) if !(0.0..=100.0).contains(&fee) => {
                report.add_error(
                    "app.pool_fee",
                    &format!("Pool fee must be between 0% and 100%: {}", config.app.pool_fee),
                );
            }
            Ok(fee) if fee > 10.0 => {
                report.add_warning("app.pool_fee", &format!("Pool fee is very high ({}%)", fee));
            }
            Ok(_) => {}
            Err(e) => report.add_error("app.pool_fee", &e),
        }

        match config.payout_threshold() {
            Ok(threshold) if !(threshold.amount > 0.0 && threshold.amount.is_finite()) => {
                report.add_error(
                    "app.payout_threshold",
                    &format!(
                        "Payout threshold must be a positive amount: {}",
                        config.app.payout_threshold
                    ),
                );
            }
            Ok(_) => {}
            Err(e) => report.add_error("app.payout_threshold", &e),
        }

        let block_time = config.app.block_time;
        if !block_time.is_finite() || block_time <= 0.0 {
            report.add_error(
                "app.block_time",
                &format!("Block time must be a positive number of seconds: {}", block_time),
            );
        }
    }

    fn validate_analytics(config: &Config, report: &mut ValidationReport) {
        let code = config.app.analytics_code.as_str();
        if !code.is_empty() && !is_analytics_code(code) {
            report.add_warning(
                "app.analytics_code",
                &format!("Analytics code '{}' does not look like UA-<n>-<n> or G-<id>", code),
            );
        }
    }

    fn validate_environment(config: &Config, report: &mut ValidationReport) {
        if let Environment::Unknown(ref name) = config.environment {
            report.add_warning(
                "environment",
                &format!(
                    "Unknown environment '{}', base configuration applies. Recognized: development, test, production",
                    name
                ),
            );
        }

        if config.environment != Environment::Test {
            if config.app.root_element.is_some() {
                report.add_warning(
                    "app.root_element",
                    "Root element is only meant for the test harness",
                );
            }

            if config.location_type == LocationType::None {
                report.add_warning(
                    "location_type",
                    "Location type 'none' disables URL updates outside the test harness",
                );
            }
        }

        if config.environment == Environment::Production {
            let api_url = config.app.api_url.as_str();
            if api_url.contains("localhost") || api_url.contains("127.0.0.1") {
                report.add_warning("app.api_url", "Production API URL points at localhost");
            } else if api_url.contains("example.net") {
                report.add_warning(
                    "app.api_url",
                    "Production API URL still uses the example.net placeholder",
                );
            }

            let app = &config.app;
            let debug_logging = [
                app.log_resolver,
                app.log_active_generation,
                app.log_transitions,
                app.log_transitions_internal,
                app.log_view_lookups,
            ];
            if debug_logging.iter().any(|flag| *flag == Some(true)) {
                report.add_warning("app", "Debug logging toggles are enabled in production");
            }
        }
    }
}

/// Accepts `UA-<digits>-<digits>` and `G-<alphanumeric>`
fn is_analytics_code(code: &str) -> bool {
    if let Some(rest) = code.strip_prefix("UA-") {
        let mut parts = rest.split('-');
        return match (parts.next(), parts.next(), parts.next()) {
            (Some(account), Some(property), None) => {
                is_digits(account) && is_digits(property)
            }
            _ => false,
        };
    }

    if let Some(id) = code.strip_prefix("G-") {
        return !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric());
    }

    false
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::EnvironmentResolver;

    fn has_field(issues: &[ValidationIssue], field: &str) -> bool {
        issues.iter().any(|issue| issue.field == field)
    }

    #[test]
    fn test_resolved_records_are_valid() {
        let resolver = EnvironmentResolver::new();
        for name in ["development", "test", "production", "staging"] {
            let report = ConfigValidator::validate(&resolver.resolve(name));
            assert!(report.is_valid(), "{}: {:?}", name, report.errors);
        }
    }

    #[test]
    fn test_development_has_no_warnings() {
        let report = ConfigValidator::validate(&EnvironmentResolver::new().resolve("development"));
        assert!(!report.has_warnings(), "{:?}", report.warnings);
    }

    #[test]
    fn test_test_environment_allows_harness_settings() {
        let report = ConfigValidator::validate(&EnvironmentResolver::new().resolve("test"));
        assert!(!has_field(&report.warnings, "app.root_element"));
        assert!(!has_field(&report.warnings, "location_type"));
    }

    #[test]
    fn test_production_placeholder_warning() {
        let report = ConfigValidator::validate(&EnvironmentResolver::new().resolve("production"));
        assert!(has_field(&report.warnings, "app.api_url"));

        let mut config = EnvironmentResolver::new().resolve("production");
        config.app.api_url = "http://localhost:8080/".to_string();
        let report = ConfigValidator::validate(&config);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.message.contains("localhost")));
    }

    #[test]
    fn test_unknown_environment_warning() {
        let report = ConfigValidator::validate(&EnvironmentResolver::new().resolve("staging"));
        assert!(has_field(&report.warnings, "environment"));
    }

    #[test]
    fn test_field_errors() {
        let mut config = EnvironmentResolver::new().resolve("development");
        config.module_prefix = String::new();
        config.base_url = "pool/".to_string();
        config.app.api_url = "example.net".to_string();
        config.app.http_port = 0;
        config.app.stratum_host = String::new();
        config.app.pool_fee = "150%".to_string();
        config.app.payout_threshold = "0 WEB".to_string();
        config.app.block_time = 0.0;
        config.features.insert(" ".to_string(), true);

        let report = ConfigValidator::validate(&config);
        for field in [
            "module_prefix",
            "base_url",
            "app.api_url",
            "app.http_port",
            "app.stratum_host",
            "app.pool_fee",
            "app.payout_threshold",
            "app.block_time",
            "features",
        ] {
            assert!(has_field(&report.errors, field), "missing error for {}", field);
        }
        assert_eq!(report.summary(), "Validation: 9 errors, 0 warnings");
    }

    #[test]
    fn test_high_fee_warning() {
        let mut config = EnvironmentResolver::new().resolve("development");
        config.app.pool_fee = "25%".to_string();
        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());
        assert!(has_field(&report.warnings, "app.pool_fee"));
    }

    #[test]
    fn test_harness_settings_outside_test() {
        let mut config = EnvironmentResolver::new().resolve("development");
        config.app.root_element = Some("#app".to_string());
        config.location_type = LocationType::None;

        let report = ConfigValidator::validate(&config);
        assert!(has_field(&report.warnings, "app.root_element"));
        assert!(has_field(&report.warnings, "location_type"));
    }

    #[test]
    fn test_debug_logging_in_production() {
        let mut config = EnvironmentResolver::new().resolve("production");
        config.app.log_transitions = Some(true);
        let report = ConfigValidator::validate(&config);
        assert!(has_field(&report.warnings, "app"));
    }

    #[test]
    fn test_analytics_code_shapes() {
        assert!(is_analytics_code("UA-1111111-00"));
        assert!(is_analytics_code("G-ABC123XYZ"));
        assert!(!is_analytics_code("UA-abc-00"));
        assert!(!is_analytics_code("UA-1111111"));
        assert!(!is_analytics_code("G-"));
        assert!(!is_analytics_code("tracking"));

        let mut config = EnvironmentResolver::new().resolve("development");
        config.app.analytics_code = String::new();
        assert!(!ConfigValidator::validate(&config).has_warnings());

        config.app.analytics_code = "tracking".to_string();
        assert!(has_field(
            &ConfigValidator::validate(&config).warnings,
            "app.analytics_code"
        ));
    }
}
