//! Deployment environment identifiers

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Deployment target a configuration record is built for.
///
/// Only `development`, `test` and `production` are recognized. Any other name
/// is carried verbatim in `Unknown` and receives the base configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
    Unknown(String),
}

impl Environment {
    /// Parse an environment name. Matching is exact and never fails.
    pub fn parse(name: &str) -> Self {
        match name {
            "development" => Environment::Development,
            "test" => Environment::Test,
            "production" => Environment::Production,
            other => Environment::Unknown(other.to_string()),
        }
    }

    /// The name this environment was parsed from
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
            Environment::Unknown(name) => name,
        }
    }

    /// Whether this is one of the recognized environments
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Environment::Unknown(_))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Environment::parse(s))
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Environment::parse(name)
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Environment::parse(&name)
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}
