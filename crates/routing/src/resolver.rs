//! Cluster resolution seam
//!
//! Route compilation needs two facts about a client id: whether anything
//! is configured under that id, and which physical cluster it points at.
//! Connection management itself lives elsewhere; this trait is the whole
//! surface the registry sees, so tests can drive compilation with a
//! static map instead of live connections.

use crate::ids::ClusterName;

/// Resolves client ids to the clusters they are configured against
pub trait ClusterResolver {
    /// Whether `client` names a configured client id
    fn is_configured(&self, client: &str) -> bool;

    /// Cluster the client id points at
    ///
    /// Returns `None` when the id is unknown or its configuration does
    /// not name a cluster. Callers treat `None` as a per-route fault, not
    /// a fatal one.
    fn cluster_of(&self, client: &str) -> Option<ClusterName>;
}
