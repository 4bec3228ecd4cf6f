//! Test utilities for driving route compilation without live connections
//!
//! These are real implementations over fixed data, not mocks:
//! [`StaticResolver`] is a complete resolver backed by a map, and
//! [`RecordingAlerts`] is a complete alert sink that keeps everything it
//! is told. Production code never constructs them; tests in this crate
//! and downstream crates do.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::alerts::RouteAlerts;
use crate::error::RouteError;
use crate::ids::ClusterName;
use crate::raw::RawValue;
use crate::resolver::ClusterResolver;

/// Resolver over a fixed client-to-cluster map
///
/// # Example
///
/// ```
/// use ferry_routing::ClusterResolver;
/// use ferry_routing::test_utils::StaticResolver;
///
/// let resolver = StaticResolver::new()
///     .client("east", "cluster_a")
///     .client("west", "cluster_b");
///
/// assert!(resolver.is_configured("east"));
/// assert!(!resolver.is_configured("north"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    clusters: HashMap<String, ClusterName>,
}

impl StaticResolver {
    /// Create a resolver with no clients
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client id resolving to the given cluster
    #[must_use]
    pub fn client(mut self, id: impl Into<String>, cluster: impl Into<ClusterName>) -> Self {
        self.clusters.insert(id.into(), cluster.into());
        self
    }
}

impl ClusterResolver for StaticResolver {
    fn is_configured(&self, client: &str) -> bool {
        self.clusters.contains_key(client)
    }

    fn cluster_of(&self, client: &str) -> Option<ClusterName> {
        self.clusters.get(client).cloned()
    }
}

/// One alert captured by [`RecordingAlerts`]
#[derive(Debug, Clone)]
pub struct SkippedRoute {
    /// The route description exactly as supplied
    pub payload: RawValue,

    /// Every reason the route was rejected
    pub errors: Vec<RouteError>,
}

/// Alert sink that records every skip for later assertions
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    skipped: Mutex<Vec<SkippedRoute>>,
}

impl RecordingAlerts {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of routes skipped so far
    pub fn count(&self) -> usize {
        self.skipped.lock().len()
    }

    /// Snapshot of every captured alert, in arrival order
    pub fn skips(&self) -> Vec<SkippedRoute> {
        self.skipped.lock().clone()
    }
}

impl RouteAlerts for RecordingAlerts {
    fn skipped_route(&self, payload: &RawValue, errors: &[RouteError]) {
        self.skipped.lock().push(SkippedRoute {
            payload: payload.clone(),
            errors: errors.to_vec(),
        });
    }
}
