//! Route registry
//!
//! The registry holds the compiled routing table: one entry per
//! (upstream client, upstream topic) pair, mapping to the downstream
//! endpoint and options. It is populated once from raw route
//! descriptions, read concurrently while the bridge runs, and torn down
//! on shutdown or before a configuration reload.
//!
//! # Design
//!
//! Compilation builds a fresh table and commits it in one assignment at
//! the end, so readers never observe a half-built table and a panic
//! mid-compile leaves the registry uninitialized rather than corrupt.
//! Bad routes do not stop the batch: each one is reported through
//! [`RouteAlerts`] and skipped.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::alerts::RouteAlerts;
use crate::checks;
use crate::error::{self, RegistryError, Result, RouteError};
use crate::raw::RawValue;
use crate::resolver::ClusterResolver;
use crate::route::{Route, RouteKey};
use crate::schema::{self, RouteCandidate};

/// Thread-safe table of compiled routes
///
/// # Example
///
/// ```
/// use ferry_routing::{RawRoute, RawValue, RouteRegistry, TracingAlerts};
/// use ferry_routing::test_utils::StaticResolver;
///
/// let resolver = StaticResolver::new()
///     .client("east", "cluster_a")
///     .client("west", "cluster_b");
///
/// let routes = vec![
///     RawRoute::new()
///         .field("upstream_client", RawValue::text("east"))
///         .field("upstream_topics", RawValue::text("orders"))
///         .field("downstream_client", RawValue::text("west"))
///         .field("downstream_topic", RawValue::text("orders_copy"))
///         .build(),
/// ];
///
/// let registry = RouteRegistry::new();
/// let summary = registry.init(&routes, &resolver, &TracingAlerts).unwrap();
/// assert_eq!(summary.inserted, 1);
///
/// let route = registry.lookup("east", "orders").unwrap();
/// assert_eq!(route.downstream.topic.as_str(), "orders_copy");
/// ```
#[derive(Debug, Default)]
pub struct RouteRegistry {
    /// `None` until `init`, `Some` while live. The write lock also
    /// serializes racing initializers.
    inner: RwLock<Option<HashMap<RouteKey, Route>>>,
}

/// Outcome counts for one `init` batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitSummary {
    /// Table entries created, after topic-list expansion
    pub inserted: usize,

    /// Raw route descriptions skipped and alerted on
    pub skipped: usize,
}

impl RouteRegistry {
    /// Create a registry with no table
    ///
    /// All reads answer the empty case until [`init`](Self::init) runs.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile raw route descriptions into the lookup table
    ///
    /// Each description is validated against the schema, checked for
    /// loopbacks and duplicate upstream mappings, expanded one entry per
    /// upstream topic, and inserted. Descriptions that fail are handed to
    /// `alerts` with their full fault list and skipped; the rest of the
    /// batch still compiles.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyInitialized`] when a live table
    /// exists. This is a caller bug, not a configuration problem, so it
    /// fails the operation instead of producing an alert.
    pub fn init(
        &self,
        routes: &[RawValue],
        resolver: &dyn ClusterResolver,
        alerts: &dyn RouteAlerts,
    ) -> Result<InitSummary> {
        let mut inner = self.inner.write();
        if inner.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }

        // Compile into a fresh table first; commit only after the whole
        // batch has been walked.
        let mut table: HashMap<RouteKey, Route> = HashMap::new();
        let mut summary = InitSummary::default();

        for entry in routes {
            match compile_entry(entry, &table, resolver) {
                Ok(candidate) => {
                    for route in candidate.expand() {
                        tracing::debug!(route = %route, "adding route");
                        if table.insert(route.key(), route).is_none() {
                            summary.inserted += 1;
                        }
                    }
                }
                Err(errors) => {
                    alerts.skipped_route(entry, &errors);
                    summary.skipped += 1;
                }
            }
        }

        *inner = Some(table);
        tracing::info!(
            inserted = summary.inserted,
            skipped = summary.skipped,
            "route registry initialized"
        );

        Ok(summary)
    }

    /// Look up the route consuming `upstream_topic` through `upstream_client`
    ///
    /// Returns `None` for unmapped pairs and whenever no table is live;
    /// an uninitialized registry is indistinguishable from an empty one
    /// on the read path.
    pub fn lookup(&self, upstream_client: &str, upstream_topic: &str) -> Option<Route> {
        let inner = self.inner.read();
        let table = inner.as_ref()?;
        table
            .get(&RouteKey::new(upstream_client, upstream_topic))
            .cloned()
    }

    /// Snapshot of every compiled route, in no particular order
    pub fn all(&self) -> Vec<Route> {
        match self.inner.read().as_ref() {
            Some(table) => table.values().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Number of compiled routes
    #[inline]
    pub fn route_count(&self) -> usize {
        self.inner.read().as_ref().map_or(0, HashMap::len)
    }

    /// Whether a compiled table is live
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Drop the compiled table
    ///
    /// Idempotent; destroying an uninitialized registry does nothing.
    /// After `destroy`, [`init`](Self::init) may run again.
    pub fn destroy(&self) {
        let mut inner = self.inner.write();
        if inner.take().is_some() {
            tracing::info!("route registry destroyed");
        }
    }
}

/// Validate and cross-check one raw description against the table so far
fn compile_entry(
    entry: &RawValue,
    table: &HashMap<RouteKey, Route>,
    resolver: &dyn ClusterResolver,
) -> std::result::Result<RouteCandidate, Vec<RouteError>> {
    let Some(pairs) = entry.as_pairs() else {
        return Err(vec![RouteError::bad_route_shape(entry.kind())]);
    };

    let candidate = schema::validate_route(pairs, resolver)?;

    // Duplicate detection runs against the table before this candidate's
    // own expansion lands, so a repeated topic inside one description
    // collapses instead of conflicting with itself.
    let mut conflicts = Vec::new();
    for topic in &candidate.upstream_topics {
        conflicts.extend(checks::duplicate_upstream(
            &candidate.upstream_client,
            topic,
            table.values(),
            resolver,
        ));
    }

    if conflicts.is_empty() {
        Ok(candidate)
    } else {
        Err(error::dedup(conflicts))
    }
}

/// Shared registry for multi-threaded access
pub type SharedRouteRegistry = Arc<RouteRegistry>;
