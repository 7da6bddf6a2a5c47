//! Configuration schema definitions

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use types::Environment;

/// Front-end configuration record for one deployment environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application module prefix
    #[serde(default = "default_module_prefix", deserialize_with = "string_or_scalar")]
    pub module_prefix: String,
    /// Environment this record was built for
    #[serde(default, deserialize_with = "environment_or_scalar")]
    pub environment: Environment,
    /// Base URL the application is served from
    #[serde(default = "default_base_url", deserialize_with = "string_or_scalar")]
    pub base_url: String,
    /// Router location strategy
    #[serde(default)]
    pub location_type: LocationType,
    /// Experimental feature flags
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    /// Pool settings read by the dashboard
    #[serde(default)]
    pub app: AppConfig,
}

/// Router location strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// URL fragment routing
    #[default]
    Hash,
    /// No URL updates, used under the test harness
    None,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Hash => "hash",
            LocationType::None => "none",
        }
    }
}

/// Pool endpoints, economics and dashboard toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pool API base URL
    #[serde(default = "default_api_url", deserialize_with = "string_or_scalar")]
    pub api_url: String,
    /// HTTP mining endpoint host
    #[serde(default = "default_pool_host", deserialize_with = "string_or_scalar")]
    pub http_host: String,
    /// HTTP mining endpoint port
    #[serde(default = "default_pool_port")]
    pub http_port: u16,
    /// Stratum mining endpoint host
    #[serde(default = "default_pool_host", deserialize_with = "string_or_scalar")]
    pub stratum_host: String,
    /// Stratum mining endpoint port
    #[serde(default = "default_pool_port")]
    pub stratum_port: u16,
    /// Pool fee, e.g. "1%"
    #[serde(default = "default_pool_fee", deserialize_with = "string_or_scalar")]
    pub pool_fee: String,
    /// Minimum balance before payout, e.g. "5 WEB"
    #[serde(default = "default_payout_threshold", deserialize_with = "string_or_scalar")]
    pub payout_threshold: String,
    /// Average block interval in seconds, used for network hashrate
    #[serde(default = "default_block_time")]
    pub block_time: f64,
    /// Analytics tracking code
    #[serde(default = "default_analytics_code", deserialize_with = "string_or_scalar")]
    pub analytics_code: String,
    /// Log route resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_resolver: Option<bool>,
    /// Log generated controllers and routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_active_generation: Option<bool>,
    /// Log route transitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_transitions: Option<bool>,
    /// Log internal steps of route transitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_transitions_internal: Option<bool>,
    /// Log view and template lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_view_lookups: Option<bool>,
    /// Root element selector, only set under the test harness
    #[serde(
        default,
        deserialize_with = "optional_string_or_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub root_element: Option<String>,
}

/// Parsed payout threshold
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutThreshold {
    pub amount: f64,
    pub currency: String,
}

// Default value functions
fn default_module_prefix() -> String {
    "pool".to_string()
}

fn default_base_url() -> String {
    "/".to_string()
}

fn default_api_url() -> String {
    "//example.net/".to_string()
}

fn default_pool_host() -> String {
    "example.net".to_string()
}

fn default_pool_port() -> u16 {
    3333
}

fn default_pool_fee() -> String {
    "1%".to_string()
}

fn default_payout_threshold() -> String {
    "5 WEB".to_string()
}

fn default_block_time() -> f64 {
    12.0
}

fn default_analytics_code() -> String {
    "UA-1111111-00".to_string()
}

// Environment variable overlays arrive type-inferred, so "12345" is a number
// by the time it reaches a string field.
struct ScalarString(String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> de::Visitor<'de> for ScalarVisitor {
            type Value = ScalarString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ScalarString(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn string_or_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    ScalarString::deserialize(deserializer).map(|s| s.0)
}

fn optional_string_or_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<ScalarString>::deserialize(deserializer).map(|s| s.map(|s| s.0))
}

fn environment_or_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Environment, D::Error> {
    string_or_scalar(deserializer).map(Environment::from)
}

impl Config {
    /// Base record for an environment, before any override is applied
    pub fn base(environment: Environment) -> Self {
        Self {
            module_prefix: default_module_prefix(),
            environment,
            base_url: default_base_url(),
            location_type: LocationType::Hash,
            features: BTreeMap::new(),
            app: AppConfig::default(),
        }
    }

    /// Parse the pool fee as a percentage
    pub fn pool_fee_percent(&self) -> Result<f64, String> {
        let fee = self.app.pool_fee.trim();
        let number = fee
            .strip_suffix('%')
            .ok_or_else(|| format!("Pool fee must end with '%': {}", fee))?;

        number
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid pool fee {}: {}", fee, e))
    }

    /// Parse the payout threshold into amount and currency
    pub fn payout_threshold(&self) -> Result<PayoutThreshold, String> {
        let threshold = self.app.payout_threshold.trim();
        let mut parts = threshold.split_whitespace();

        let (amount, currency) = match (parts.next(), parts.next(), parts.next()) {
            (Some(amount), Some(currency), None) => (amount, currency),
            _ => {
                return Err(format!(
                    "Payout threshold must be '<amount> <currency>': {}",
                    threshold
                ))
            }
        };

        let amount = amount
            .parse::<f64>()
            .map_err(|e| format!("Invalid payout amount {}: {}", amount, e))?;

        Ok(PayoutThreshold {
            amount,
            currency: currency.to_string(),
        })
    }

    /// HTTP mining endpoint as host:port
    pub fn http_endpoint(&self) -> String {
        format!("{}:{}", self.app.http_host, self.app.http_port)
    }

    /// Stratum mining endpoint as host:port
    pub fn stratum_endpoint(&self) -> String {
        format!("{}:{}", self.app.stratum_host, self.app.stratum_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::base(Environment::default())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            http_host: default_pool_host(),
            http_port: default_pool_port(),
            stratum_host: default_pool_host(),
            stratum_port: default_pool_port(),
            pool_fee: default_pool_fee(),
            payout_threshold: default_payout_threshold(),
            block_time: default_block_time(),
            analytics_code: default_analytics_code(),
            log_resolver: None,
            log_active_generation: None,
            log_transitions: None,
            log_transitions_internal: None,
            log_view_lookups: None,
            root_element: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_literals() {
        let config = Config::base(Environment::Production);
        assert_eq!(config.module_prefix, "pool");
        assert_eq!(config.base_url, "/");
        assert_eq!(config.location_type, LocationType::Hash);
        assert!(config.features.is_empty());
        assert_eq!(config.app.api_url, "//example.net/");
        assert_eq!(config.app.pool_fee, "1%");
        assert_eq!(config.app.payout_threshold, "5 WEB");
        assert_eq!(config.app.block_time, 12.0);
        assert_eq!(config.app.analytics_code, "UA-1111111-00");
        assert_eq!(config.app.root_element, None);
    }

    #[test]
    fn test_pool_fee_percent() {
        let mut config = Config::default();
        assert_eq!(config.pool_fee_percent().unwrap(), 1.0);

        config.app.pool_fee = "0.5 %".to_string();
        assert_eq!(config.pool_fee_percent().unwrap(), 0.5);

        config.app.pool_fee = "1".to_string();
        assert!(config.pool_fee_percent().is_err());

        config.app.pool_fee = "abc%".to_string();
        assert!(config.pool_fee_percent().is_err());
    }

    #[test]
    fn test_payout_threshold() {
        let mut config = Config::default();
        let threshold = config.payout_threshold().unwrap();
        assert_eq!(threshold.amount, 5.0);
        assert_eq!(threshold.currency, "WEB");

        config.app.payout_threshold = "0.1 ETH".to_string();
        assert_eq!(config.payout_threshold().unwrap().amount, 0.1);

        config.app.payout_threshold = "5".to_string();
        assert!(config.payout_threshold().is_err());

        config.app.payout_threshold = "five WEB".to_string();
        assert!(config.payout_threshold().is_err());

        config.app.payout_threshold = "5 WEB extra".to_string();
        assert!(config.payout_threshold().is_err());
    }

    #[test]
    fn test_endpoints() {
        let config = Config::default();
        assert_eq!(config.http_endpoint(), "example.net:3333");
        assert_eq!(config.stratum_endpoint(), "example.net:3333");
    }

    #[test]
    fn test_numeric_values_for_string_fields() {
        let yaml = r#"
environment: 42
module_prefix: 7
app:
  http_host: 10
  analytics_code: 12345
  pool_fee: true
  root_element: 1
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.environment, Environment::Unknown("42".to_string()));
        assert_eq!(config.module_prefix, "7");
        assert_eq!(config.app.http_host, "10");
        assert_eq!(config.app.analytics_code, "12345");
        assert_eq!(config.app.pool_fee, "true");
        assert_eq!(config.app.root_element.as_deref(), Some("1"));
        assert_eq!(config.app.stratum_host, "example.net");
    }

    #[test]
    fn test_structured_value_for_string_field_is_rejected() {
        let result = serde_yaml::from_str::<Config>("app:\n  api_url: [a, b]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unset_toggles_are_not_serialized() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("api_url:"));
        assert!(!yaml.contains("log_resolver"));
        assert!(!yaml.contains("root_element"));
    }
}
