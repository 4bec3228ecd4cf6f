//! Per-route bridging options
//!
//! Every route carries the same four options. Each has a platform default
//! so a minimal route description can omit all of them; the schema
//! validator fills the gaps before the route reaches the registry.

use std::fmt;

/// Default group-member partition cap applied when a route omits
/// `max_partitions_per_group_member`
pub const DEFAULT_MAX_PARTITIONS_PER_GROUP_MEMBER: u32 = 12;

/// How upstream partitions map onto downstream partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepartitioningStrategy {
    /// Partition N upstream goes to partition N downstream
    #[default]
    StrictMapping,
    /// Downstream partition chosen by message key hash
    KeyHash,
    /// Downstream partition chosen at random
    Random,
}

impl RepartitioningStrategy {
    /// Accepted spellings, in documentation order
    pub const VARIANTS: &'static [&'static str] = &["strict_mapping", "key_hash", "random"];

    /// Parse from the configuration spelling
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strict_mapping" => Some(Self::StrictMapping),
            "key_hash" => Some(Self::KeyHash),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    /// Configuration spelling of this variant
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrictMapping => "strict_mapping",
            Self::KeyHash => "key_hash",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for RepartitioningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a freshly subscribed consumer starts reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeginOffset {
    /// Start from the oldest retained message
    Earliest,
    /// Start from new messages only
    #[default]
    Latest,
}

impl BeginOffset {
    /// Accepted spellings, in documentation order
    pub const VARIANTS: &'static [&'static str] = &["earliest", "latest"];

    /// Parse from the configuration spelling
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "earliest" => Some(Self::Earliest),
            "latest" => Some(Self::Latest),
            _ => None,
        }
    }

    /// Configuration spelling of this variant
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Earliest => "earliest",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for BeginOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compression applied when producing downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// No compression
    #[default]
    None,
    /// Gzip compression
    Gzip,
    /// Snappy compression
    Snappy,
}

impl Compression {
    /// Accepted spellings, in documentation order
    pub const VARIANTS: &'static [&'static str] = &["none", "gzip", "snappy"];

    /// Parse from the configuration spelling
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "gzip" => Some(Self::Gzip),
            "snappy" => Some(Self::Snappy),
            _ => None,
        }
    }

    /// Configuration spelling of this variant
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Snappy => "snappy",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated option set for one route
///
/// Always fully populated: the schema validator substitutes the platform
/// default for any option the route description leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Upstream-to-downstream partition mapping
    pub repartitioning_strategy: RepartitioningStrategy,

    /// Cap on partitions one consumer group member may own
    pub max_partitions_per_group_member: u32,

    /// Consumer start position when no committed offset exists
    pub begin_offset: BeginOffset,

    /// Producer-side compression
    pub compression: Compression,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            repartitioning_strategy: RepartitioningStrategy::default(),
            max_partitions_per_group_member: DEFAULT_MAX_PARTITIONS_PER_GROUP_MEMBER,
            begin_offset: BeginOffset::default(),
            compression: Compression::default(),
        }
    }
}

impl RouteOptions {
    /// Producer-side settings as key-value pairs
    ///
    /// The bridging layer feeds these to its producer constructor verbatim.
    #[must_use]
    pub fn producer_config(&self) -> Vec<(String, String)> {
        vec![(
            "compression".to_string(),
            self.compression.as_str().to_string(),
        )]
    }

    /// Consumer-side settings as key-value pairs
    ///
    /// The bridging layer feeds these to its consumer constructor verbatim.
    #[must_use]
    pub fn consumer_config(&self) -> Vec<(String, String)> {
        vec![
            (
                "begin_offset".to_string(),
                self.begin_offset.as_str().to_string(),
            ),
            (
                "max_partitions_per_group_member".to_string(),
                self.max_partitions_per_group_member.to_string(),
            ),
        ]
    }
}
