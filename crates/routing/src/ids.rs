//! Client and cluster identifier types
//!
//! `ClientId` names one configured connection handle; `ClusterName` names
//! the physical cluster a handle points at. Several client ids may resolve
//! to the same cluster, which is why duplicate-mapping checks compare
//! clusters rather than clients.

use std::fmt;

/// Identifier for a configured upstream or downstream client
///
/// Client ids are opaque handles assigned in configuration. Two routes
/// referring to the same id share a connection; equality is exact string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(String);

impl ClientId {
    /// Create a client id from a string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClientId {
    #[inline]
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClientId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ClientId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Name of a physical cluster
///
/// Resolved from a `ClientId` by a [`ClusterResolver`](crate::ClusterResolver).
/// Duplicate upstream detection treats two routes as conflicting only when
/// their clients resolve to equal cluster names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterName(String);

impl ClusterName {
    /// Create a cluster name from a string
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClusterName {
    #[inline]
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClusterName {
    #[inline]
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ClusterName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}
