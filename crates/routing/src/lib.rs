//! Ferry - Route compilation and lookup
//!
//! Compiles loosely structured route descriptions into a validated,
//! queryable table mapping each (upstream client, upstream topic) pair to
//! the downstream endpoint it bridges to.
//!
//! # Design
//!
//! All validation happens at compile time, not per-message. A route
//! description passes the declarative schema, then the loopback and
//! duplicate-upstream checks, and only then lands in the table; lookups
//! on the message path are a single map probe over immutable data.
//!
//! Bad descriptions never abort the batch. Each one is reported through
//! [`RouteAlerts`] with its complete fault list and skipped, so one typo
//! in a fleet-wide route file degrades a single bridge instead of the
//! whole service.
//!
//! # Example
//!
//! ```
//! use ferry_routing::{RawRoute, RawValue, RouteRegistry, TracingAlerts};
//! use ferry_routing::test_utils::StaticResolver;
//!
//! let resolver = StaticResolver::new()
//!     .client("east", "cluster_a")
//!     .client("west", "cluster_b");
//!
//! // At startup: compile the table from configuration.
//! let routes = vec![
//!     RawRoute::new()
//!         .field("upstream_client", RawValue::text("east"))
//!         .field("upstream_topics", RawValue::list([RawValue::text("t1"), RawValue::text("t2")]))
//!         .field("downstream_client", RawValue::text("west"))
//!         .field("downstream_topic", RawValue::text("t_merged"))
//!         .build(),
//! ];
//! let registry = RouteRegistry::new();
//! let summary = registry.init(&routes, &resolver, &TracingAlerts).unwrap();
//! assert_eq!(summary.inserted, 2);
//!
//! // Message path: one lookup per consumed topic.
//! let route = registry.lookup("east", "t2").unwrap();
//! assert_eq!(route.downstream.client.as_str(), "west");
//! ```

mod alerts;
mod checks;
mod error;
mod ids;
mod options;
mod raw;
mod registry;
mod resolver;
mod route;
mod schema;
mod topic;

/// Test utilities for driving compilation from fixed data
pub mod test_utils;


pub use alerts::{RouteAlerts, TracingAlerts};
pub use checks::{direct_loopback, duplicate_upstream};
pub use error::{RegistryError, Result, RouteError};
pub use ids::{ClientId, ClusterName};
pub use options::{
    BeginOffset, Compression, DEFAULT_MAX_PARTITIONS_PER_GROUP_MEMBER, RepartitioningStrategy,
    RouteOptions,
};
pub use raw::{RawRoute, RawValue};
pub use registry::{InitSummary, RouteRegistry, SharedRouteRegistry};
pub use resolver::ClusterResolver;
pub use route::{Route, RouteEnd, RouteKey};
pub use schema::{RouteCandidate, validate_route};
pub use topic::{TopicName, normalize_topic, normalize_topics};
