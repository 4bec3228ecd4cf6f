//! Routing error types

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Reasons one route description was rejected
///
/// These are per-route faults: the registry reports them through
/// [`RouteAlerts`](crate::RouteAlerts), skips the offending route, and
/// keeps compiling the rest of the batch. The set is closed; anything a
/// route can get wrong maps onto one of these kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Route description was not a key-value list at all
    #[error("route description is not a key-value list, got {kind}")]
    BadRouteShape {
        /// Shape the description actually had
        kind: &'static str,
    },

    /// Attribute name not in the route schema
    #[error("unknown attribute '{name}' in route description")]
    UnknownAttribute {
        /// The unrecognized attribute name
        name: String,
    },

    /// Mandatory attribute absent and without a default
    #[error("missing mandatory attribute '{name}'")]
    MissingAttribute {
        /// The absent attribute name
        name: &'static str,
    },

    /// Topic field holding no valid topic names
    #[error("invalid topic name(s) in '{field}': {detail}")]
    InvalidTopicName {
        /// Attribute the bad names appeared under
        field: &'static str,
        /// One description per rejected name
        detail: String,
    },

    /// Option value outside its allowed set or range
    #[error("invalid value for '{field}': {detail}")]
    InvalidOptionValue {
        /// Attribute the bad value appeared under
        field: &'static str,
        /// What was wrong with it
        detail: String,
    },

    /// Client id that no configured client answers to
    #[error("unknown {side} client id '{id}'")]
    UnknownClient {
        /// Which end of the route referenced it
        side: &'static str,
        /// The unresolvable client id
        id: String,
    },

    /// Route that would consume and produce the same topic on one client
    #[error(
        "direct loopback: topic '{topic}' is both consumed and produced through client '{client}'"
    )]
    DirectLoopback {
        /// The client shared by both ends
        client: String,
        /// The topic that would feed itself
        topic: String,
    },

    /// Upstream topic already bridged from the same cluster
    #[error(
        "duplicate upstream mapping: topic '{topic}' on cluster '{cluster}' is already bridged \
         through client '{existing_client}'; an upstream topic bridges to exactly one downstream \
         topic per cluster, so configure a second client with a different cluster name if both \
         bridges are intended"
    )]
    DuplicateUpstreamMapping {
        /// The contested upstream topic
        topic: String,
        /// Cluster both clients resolve to
        cluster: String,
        /// Client already holding the mapping
        existing_client: String,
    },
}

impl RouteError {
    /// Create a BadRouteShape error
    #[inline]
    pub fn bad_route_shape(kind: &'static str) -> Self {
        Self::BadRouteShape { kind }
    }

    /// Create an UnknownAttribute error
    #[inline]
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute { name: name.into() }
    }

    /// Create a MissingAttribute error
    #[inline]
    pub fn missing_attribute(name: &'static str) -> Self {
        Self::MissingAttribute { name }
    }

    /// Create an InvalidTopicName error
    #[inline]
    pub fn invalid_topic_name(field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidTopicName {
            field,
            detail: detail.into(),
        }
    }

    /// Create an InvalidOptionValue error
    #[inline]
    pub fn invalid_option_value(field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidOptionValue {
            field,
            detail: detail.into(),
        }
    }

    /// Create an UnknownClient error for the consuming end
    #[inline]
    pub fn unknown_upstream_client(id: impl Into<String>) -> Self {
        Self::UnknownClient {
            side: "upstream",
            id: id.into(),
        }
    }

    /// Create an UnknownClient error for the producing end
    #[inline]
    pub fn unknown_downstream_client(id: impl Into<String>) -> Self {
        Self::UnknownClient {
            side: "downstream",
            id: id.into(),
        }
    }

    /// Create a DirectLoopback error
    #[inline]
    pub fn direct_loopback(client: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::DirectLoopback {
            client: client.into(),
            topic: topic.into(),
        }
    }

    /// Create a DuplicateUpstreamMapping error
    #[inline]
    pub fn duplicate_upstream_mapping(
        topic: impl Into<String>,
        cluster: impl Into<String>,
        existing_client: impl Into<String>,
    ) -> Self {
        Self::DuplicateUpstreamMapping {
            topic: topic.into(),
            cluster: cluster.into(),
            existing_client: existing_client.into(),
        }
    }
}

/// Deduplicate a fault list, keeping first occurrences in order
///
/// A route with the same mistake spelled twice (say, a repeated invalid
/// topic) should alert once per distinct reason.
pub(crate) fn dedup(errors: Vec<RouteError>) -> Vec<RouteError> {
    let mut out: Vec<RouteError> = Vec::with_capacity(errors.len());
    for error in errors {
        if !out.contains(&error) {
            out.push(error);
        }
    }
    out
}

/// Errors that fail registry operations outright
///
/// Unlike [`RouteError`], these are not skip-and-continue faults: the
/// whole operation is refused.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `init` called while a compiled table is still live
    #[error("route registry is already initialized; destroy it before initializing again")]
    AlreadyInitialized,
}
