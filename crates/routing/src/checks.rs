//! Cross-route safety checks
//!
//! Two route mistakes cannot be caught field by field: a route that feeds
//! a topic back into itself, and two routes consuming the same upstream
//! topic from the same cluster. Both would corrupt traffic silently if
//! they ever reached the bridging layer, so the registry refuses them at
//! compile time.

use crate::error::RouteError;
use crate::ids::ClientId;
use crate::resolver::ClusterResolver;
use crate::route::Route;
use crate::topic::TopicName;

/// True when a route would consume and produce the same topic on one client
///
/// Only the exact self-feeding shape counts: same client id on both ends
/// and the downstream topic present in the upstream topic set. Longer
/// cycles through other clusters are legitimate topologies and are not
/// detected here.
#[must_use]
pub fn direct_loopback(upstream_topics: &[TopicName], downstream_topic: &TopicName) -> bool {
    upstream_topics.iter().any(|topic| topic == downstream_topic)
}

/// Find existing routes that already bridge `topic` from the same cluster
///
/// Scoping matters. Two client ids may be alternate handles into one
/// physical cluster, so comparing client ids would miss real duplicates,
/// while comparing topic names globally would reject the same topic name
/// on unrelated clusters. Equality is therefore on the resolved cluster
/// name of the upstream client.
///
/// Returns one error per conflicting route, empty when the mapping is
/// free. An upstream client that no longer resolves is itself reported
/// as a fault.
pub fn duplicate_upstream<'a, I>(
    client: &ClientId,
    topic: &TopicName,
    existing: I,
    resolver: &dyn ClusterResolver,
) -> Vec<RouteError>
where
    I: IntoIterator<Item = &'a Route>,
{
    let Some(candidate_cluster) = resolver.cluster_of(client.as_str()) else {
        return vec![RouteError::unknown_upstream_client(client.as_str())];
    };

    let mut conflicts = Vec::new();

    for route in existing {
        if route.upstream.topic != *topic {
            continue;
        }
        // Same topic name; a conflict only if the clusters coincide.
        if resolver.cluster_of(route.upstream.client.as_str()) == Some(candidate_cluster.clone()) {
            conflicts.push(RouteError::duplicate_upstream_mapping(
                topic.as_str(),
                candidate_cluster.as_str(),
                route.upstream.client.as_str(),
            ));
        }
    }

    conflicts
}
