//! Ferry Configuration
//!
//! TOML-based configuration loading for the topic bridge. A config file
//! declares the cluster clients the bridge may connect through and the
//! routes it should compile; both feed straight into the route registry.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use ferry_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[clients.east]\ncluster = \"cluster_a\"").unwrap();
//! assert!(config.routes.is_empty());
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [clients.east]
//! cluster = "cluster_a"
//! endpoints = ["broker-a1:9092"]
//!
//! [clients.west]
//! cluster = "cluster_b"
//! endpoints = ["broker-b1:9092"]
//!
//! [[routes]]
//! upstream_client = "east"
//! upstream_topics = ["orders", "payments"]
//! downstream_client = "west"
//! downstream_topic = "mirrored"
//! ```
//!
//! Feeding the parsed file into the registry is two calls: the client map
//! is the cluster resolver, and the route section converts to the
//! registry's input form.
//!
//! ```
//! use ferry_config::Config;
//! use ferry_routing::{RouteRegistry, TracingAlerts};
//! use std::str::FromStr;
//!
//! # let toml = r#"
//! # [clients.east]
//! # cluster = "cluster_a"
//! # [clients.west]
//! # cluster = "cluster_b"
//! # [[routes]]
//! # upstream_client = "east"
//! # upstream_topics = "orders"
//! # downstream_client = "west"
//! # downstream_topic = "orders_copy"
//! # "#;
//! let config = Config::from_str(toml).unwrap();
//! let registry = RouteRegistry::new();
//! registry
//!     .init(&config.routes.to_raw(), &config.clients, &TracingAlerts)
//!     .unwrap();
//! assert_eq!(registry.route_count(), 1);
//! ```

mod clients;
mod error;
mod logging;
mod routes;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use clients::{ClientConfig, ClientsConfig};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use routes::RoutesConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional; an empty file is a valid bridge that
/// connects nowhere and routes nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Cluster clients, by client id
    pub clients: ClientsConfig,

    /// Route descriptions, still in raw form
    pub routes: RoutesConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks for:
    /// - Enabled clients naming a non-empty cluster
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Get list of enabled client ids
    pub fn enabled_clients(&self) -> Vec<&str> {
        self.clients
            .iter()
            .filter(|(_, client)| client.is_enabled())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.clients.is_empty());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_minimal_config() {
        let toml = r#"
[clients.east]
cluster = "cluster_a"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.clients.len(), 1);
        assert!(config.clients.get("east").unwrap().is_enabled()); // enabled by default
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[clients.east]
cluster = "cluster_a"
endpoints = ["broker-a1:9092", "broker-a2:9092"]

[clients.west]
cluster = "cluster_b"
endpoints = ["broker-b1:9092"]
enabled = false

[[routes]]
upstream_client = "east"
upstream_topics = ["orders", "payments"]
downstream_client = "west"
downstream_topic = "mirrored"
compression = "gzip"

[[routes]]
upstream_client = "west"
upstream_topics = "audit"
downstream_client = "east"
downstream_topic = "audit_copy"
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.clients.len(), 2);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.enabled_clients(), vec!["east"]);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_routes_must_be_an_array() {
        // A scalar routes key is a broken file, not a skippable route.
        let result = Config::from_str(r#"routes = "east => west""#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
