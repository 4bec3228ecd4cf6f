//! End-to-end tests for the config-to-registry bridge
//!
//! These tests drive the full startup path: parse a TOML document, use the
//! client map as the cluster resolver, and compile the route section into
//! a live registry, verifying lookups and skip alerts at the end.

use std::str::FromStr;

use ferry_config::{Config, ConfigError};
use ferry_routing::test_utils::RecordingAlerts;
use ferry_routing::{Compression, InitSummary, RouteError, RouteRegistry};

/// Two clusters; east and east_mirror are alternate handles into cluster_a
const CLIENTS: &str = r#"
[clients.east]
cluster = "cluster_a"
endpoints = ["broker-a1:9092"]

[clients.east_mirror]
cluster = "cluster_a"
endpoints = ["broker-a2:9092"]

[clients.west]
cluster = "cluster_b"
endpoints = ["broker-b1:9092"]
"#;

/// Parse `toml` and compile its routes, returning the live registry
fn compile(toml: &str, alerts: &RecordingAlerts) -> (RouteRegistry, InitSummary) {
    let config = Config::from_str(toml).expect("config should parse");
    let registry = RouteRegistry::new();
    let summary = registry
        .init(&config.routes.to_raw(), &config.clients, alerts)
        .expect("first init should succeed");
    (registry, summary)
}

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn test_config_compiles_into_lookup_table() {
    let toml = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "east"
upstream_topics = ["orders", "payments"]
downstream_client = "west"
downstream_topic = "mirrored"
compression = "gzip"
default_begin_offset = "earliest"
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(&toml, &alerts);

    // Two upstream topics expand into two entries sharing the downstream.
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(alerts.count(), 0);

    let orders = registry.lookup("east", "orders").expect("orders mapped");
    let payments = registry.lookup("east", "payments").expect("payments mapped");
    assert_eq!(orders.downstream.client.as_str(), "west");
    assert_eq!(orders.downstream.topic.as_str(), "mirrored");
    assert_eq!(orders.downstream, payments.downstream);
    assert_eq!(orders.options, payments.options);

    // Options flow through to the producer/consumer views the pump reads.
    assert_eq!(orders.options.compression, Compression::Gzip);
    assert!(
        orders
            .options
            .producer_config()
            .contains(&("compression".to_string(), "gzip".to_string()))
    );
    assert!(
        orders
            .options
            .consumer_config()
            .contains(&("begin_offset".to_string(), "earliest".to_string()))
    );

    // Nothing was mapped for the untouched pair.
    assert!(registry.lookup("west", "orders").is_none());
}

#[test]
fn test_empty_config_compiles_an_empty_table() {
    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(CLIENTS, &alerts);

    assert_eq!(summary, InitSummary::default());
    assert!(registry.is_initialized());
    assert_eq!(registry.route_count(), 0);
}

// =============================================================================
// Skip-and-continue
// =============================================================================

#[test]
fn test_unknown_client_route_is_skipped_with_alert() {
    let toml = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "nobody"
upstream_topics = "orders"
downstream_client = "west"
downstream_topic = "orders_copy"

[[routes]]
upstream_client = "east"
upstream_topics = "payments"
downstream_client = "west"
downstream_topic = "payments_copy"
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(&toml, &alerts);

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
    assert!(registry.lookup("east", "payments").is_some());

    let skips = alerts.skips();
    assert_eq!(skips.len(), 1);
    assert!(
        skips[0]
            .errors
            .iter()
            .any(|e| e.to_string().contains("unknown upstream client id 'nobody'"))
    );
    // The alert payload is the route as written.
    assert!(skips[0].payload.to_string().contains("nobody"));
}

#[test]
fn test_non_table_route_entry_is_skipped_as_bad_shape() {
    // Top-level keys must precede the client tables.
    let toml = format!(
        r#"
routes = ["east to west", 42]

{CLIENTS}
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(&toml, &alerts);

    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.skipped, 2);
    assert_eq!(registry.route_count(), 0);

    let skips = alerts.skips();
    assert_eq!(skips[0].errors, vec![RouteError::bad_route_shape("text")]);
    assert_eq!(skips[1].errors, vec![RouteError::bad_route_shape("integer")]);
}

#[test]
fn test_disabling_a_client_disables_its_routes() {
    let toml = r#"
[clients.east]
cluster = "cluster_a"
enabled = false

[clients.west]
cluster = "cluster_b"

[[routes]]
upstream_client = "east"
upstream_topics = "orders"
downstream_client = "west"
downstream_topic = "orders_copy"
"#;

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(toml, &alerts);

    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.skipped, 1);
    assert!(registry.lookup("east", "orders").is_none());
    assert!(
        alerts.skips()[0]
            .errors
            .contains(&RouteError::unknown_upstream_client("east"))
    );
}

// =============================================================================
// Cross-route checks through the client map
// =============================================================================

#[test]
fn test_duplicate_upstream_through_cluster_alias_is_rejected() {
    let toml = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "east"
upstream_topics = "orders"
downstream_client = "west"
downstream_topic = "orders_copy"

[[routes]]
upstream_client = "east_mirror"
upstream_topics = "orders"
downstream_client = "west"
downstream_topic = "orders_again"
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(&toml, &alerts);

    // east and east_mirror resolve to the same cluster, so the second
    // mapping of "orders" loses even though the client ids differ.
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        registry
            .lookup("east", "orders")
            .unwrap()
            .downstream
            .topic
            .as_str(),
        "orders_copy"
    );
    assert!(registry.lookup("east_mirror", "orders").is_none());

    let message = alerts.skips()[0].errors[0].to_string();
    assert!(message.contains("duplicate upstream mapping"));
    assert!(message.contains("cluster_a"));
}

#[test]
fn test_same_topic_name_on_different_clusters_is_fine() {
    let toml = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "east"
upstream_topics = "audit"
downstream_client = "west"
downstream_topic = "audit_from_east"

[[routes]]
upstream_client = "west"
upstream_topics = "audit"
downstream_client = "east"
downstream_topic = "audit_from_west"
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(&toml, &alerts);

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 0);
    assert!(registry.lookup("east", "audit").is_some());
    assert!(registry.lookup("west", "audit").is_some());
}

#[test]
fn test_direct_loopback_route_is_rejected() {
    let toml = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "east"
upstream_topics = ["orders", "orders_copy"]
downstream_client = "east"
downstream_topic = "orders_copy"
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, summary) = compile(&toml, &alerts);

    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(registry.route_count(), 0);
    assert!(matches!(
        alerts.skips()[0].errors[0],
        RouteError::DirectLoopback { .. }
    ));
}

// =============================================================================
// Fatal configuration shapes
// =============================================================================

#[test]
fn test_routes_section_that_is_not_an_array_fails_the_load() {
    // Top-level keys must precede the client tables.
    let toml = format!(
        r#"
routes = "east => west"

{CLIENTS}
"#
    );

    let result = Config::from_str(&toml);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_reinit_over_a_live_registry_is_refused() {
    let alerts = RecordingAlerts::new();
    let (registry, _) = compile(CLIENTS, &alerts);

    let config = Config::from_str(CLIENTS).unwrap();
    let err = registry
        .init(&config.routes.to_raw(), &config.clients, &alerts)
        .unwrap_err();
    assert!(err.to_string().contains("already initialized"));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_destroy_then_reload_with_new_routes() {
    let first = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "east"
upstream_topics = "orders"
downstream_client = "west"
downstream_topic = "orders_copy"
"#
    );
    let second = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "west"
upstream_topics = "audit"
downstream_client = "east"
downstream_topic = "audit_copy"
"#
    );

    let alerts = RecordingAlerts::new();
    let (registry, _) = compile(&first, &alerts);
    assert!(registry.lookup("east", "orders").is_some());

    registry.destroy();

    let config = Config::from_str(&second).unwrap();
    registry
        .init(&config.routes.to_raw(), &config.clients, &alerts)
        .expect("init after destroy should succeed");

    // Only the reloaded routes exist.
    assert!(registry.lookup("east", "orders").is_none());
    assert!(registry.lookup("west", "audit").is_some());
}

#[test]
fn test_from_file_round_trip() {
    use std::io::Write;

    let toml = format!(
        r#"
{CLIENTS}

[[routes]]
upstream_client = "east"
upstream_topics = "orders"
downstream_client = "west"
downstream_topic = "orders_copy"
"#
    );

    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(toml.as_bytes()).expect("write config");

    let config = Config::from_file(file.path()).expect("load from file");
    assert_eq!(config.clients.len(), 3);
    assert_eq!(config.routes.len(), 1);

    let missing = Config::from_file("/nonexistent/ferry.toml");
    assert!(matches!(missing, Err(ConfigError::IoError { .. })));
}
