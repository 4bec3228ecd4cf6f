//! Cluster client configuration
//!
//! Named client declarations, one per connection handle the bridge may use
//! as the upstream or downstream side of a route. Each client names the
//! physical cluster it points at; several clients may share one cluster,
//! which is how the route compiler knows two handles are really the same
//! backend.
//!
//! # Example
//!
//! ```toml
//! [clients.east]
//! cluster = "cluster_a"
//! endpoints = ["broker-a1:9092", "broker-a2:9092"]
//!
//! [clients.west]
//! cluster = "cluster_b"
//! endpoints = ["broker-b1:9092"]
//! request_timeout_ms = 5000
//! ```

use std::collections::HashMap;

use ferry_routing::{ClusterName, ClusterResolver};
use serde::Deserialize;

/// Container for all configured clients
///
/// Clients are stored as a map of name -> config. The name is the client
/// id that route descriptions reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientsConfig {
    /// Named client instances
    #[serde(flatten)]
    clients: HashMap<String, ClientConfig>,
}

impl ClientsConfig {
    /// Get a client config by id
    pub fn get(&self, id: &str) -> Option<&ClientConfig> {
        self.clients.get(id)
    }

    /// Check if a client id is declared (enabled or not)
    pub fn contains(&self, id: &str) -> bool {
        self.clients.contains_key(id)
    }

    /// Iterate over all clients
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClientConfig)> {
        self.clients.iter()
    }

    /// Get the number of configured clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Check if no clients are configured
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Get all client ids
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.clients.keys()
    }

    /// Get clients pointing at the given cluster
    pub fn by_cluster(&self, cluster: &str) -> impl Iterator<Item = (&String, &ClientConfig)> {
        self.clients
            .iter()
            .filter(move |(_, c)| c.cluster == cluster)
    }
}

/// The route compiler resolves client ids directly against the client map.
///
/// A disabled client does not count as configured: every route through it
/// fails validation with an unknown-client fault, so disabling a client
/// disables its routes without editing them out.
impl ClusterResolver for ClientsConfig {
    fn is_configured(&self, client: &str) -> bool {
        self.clients.get(client).is_some_and(|c| c.enabled)
    }

    fn cluster_of(&self, client: &str) -> Option<ClusterName> {
        self.clients
            .get(client)
            .filter(|c| c.enabled)
            .map(|c| ClusterName::new(c.cluster.as_str()))
    }
}

/// Configuration for a single cluster client
///
/// `cluster` and `endpoints` are what this layer understands; everything
/// else is kept as raw values for the connection manager to parse.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Name of the physical cluster this client connects to
    pub cluster: String,

    /// Bootstrap endpoints, host:port
    #[serde(default)]
    pub endpoints: Vec<String>,

    /// Whether this client is enabled
    /// Default: true
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Raw client-specific settings (timeouts, TLS, ...)
    /// Parsed by the connection manager
    #[serde(flatten)]
    pub settings: toml::Value,
}

fn default_enabled() -> bool {
    true
}

impl ClientConfig {
    /// Check if this client is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
