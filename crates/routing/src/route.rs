//! Compiled route types
//!
//! A [`Route`] is the fully validated unit the registry stores: one
//! upstream (client, topic) endpoint bridged to one downstream endpoint,
//! plus the options the bridging layer needs. Routes written with a list
//! of upstream topics have already been expanded, one `Route` per topic,
//! before they get here.

use std::fmt;

use crate::ids::ClientId;
use crate::options::RouteOptions;
use crate::topic::TopicName;

/// One endpoint of a route: a client handle plus a topic on its cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEnd {
    /// Configured client the endpoint speaks through
    pub client: ClientId,

    /// Topic on that client's cluster
    pub topic: TopicName,
}

impl RouteEnd {
    /// Create an endpoint
    #[inline]
    #[must_use]
    pub fn new(client: impl Into<ClientId>, topic: TopicName) -> Self {
        Self {
            client: client.into(),
            topic,
        }
    }
}

impl fmt::Display for RouteEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.client, self.topic)
    }
}

/// Registry key: the upstream endpoint a message arrives on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// Upstream client id
    pub client: ClientId,

    /// Upstream topic
    pub topic: TopicName,
}

impl RouteKey {
    /// Create a key from its parts
    ///
    /// No validation happens here; a key built from strings that never
    /// passed the schema simply matches no entry.
    #[inline]
    #[must_use]
    pub fn new(client: impl Into<ClientId>, topic: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            topic: TopicName::new(topic),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.client, self.topic)
    }
}

/// A compiled bridge from one upstream endpoint to one downstream endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Where messages are consumed from
    pub upstream: RouteEnd,

    /// Where messages are produced to
    pub downstream: RouteEnd,

    /// Bridging options, fully populated
    pub options: RouteOptions,
}

impl Route {
    /// Registry key of this route
    #[inline]
    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey {
            client: self.upstream.client.clone(),
            topic: self.upstream.topic.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.upstream, self.downstream)
    }
}
