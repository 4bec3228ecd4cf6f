//! Loosely structured route input
//!
//! Route descriptions arrive from configuration as ordered key-value
//! lists. The input is loose: values may be text, raw bytes, numbers,
//! booleans, or nested lists, and the same key may appear more than
//! once. The schema validator is what turns this into a typed route;
//! `RawValue` only preserves what was written, in the order it was written.

use std::fmt;

/// One loosely typed configuration value
///
/// `Pairs` keeps duplicate keys and supply order intact so that
/// last-write-wins merging happens in exactly one place, the schema
/// validator, rather than silently at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// UTF-8 text
    Text(String),
    /// Pre-encoded bytes, not yet known to be UTF-8
    Bytes(Vec<u8>),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Ordered list of values
    List(Vec<RawValue>),
    /// Ordered key-value pairs, duplicates allowed
    Pairs(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Create a text value
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a bytes value
    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Create a list value
    #[inline]
    pub fn list(items: impl IntoIterator<Item = RawValue>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Get the text content, if this is a text value
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer value
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the key-value pairs, if this is a pairs value
    #[inline]
    pub fn as_pairs(&self) -> Option<&[(String, RawValue)]> {
        match self {
            Self::Pairs(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Short name of this value's shape, for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::List(_) => "list",
            Self::Pairs(_) => "key-value pairs",
        }
    }
}

impl fmt::Display for RawValue {
    /// Compact single-line rendering, used when alerting on skipped routes
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "\"{}\"", s.escape_debug()),
            Self::Bytes(b) => write!(f, "b\"{}\"", String::from_utf8_lossy(b).escape_debug()),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Pairs(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for RawValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RawValue {
    #[inline]
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for RawValue {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Builder for one raw route description
///
/// Keeps keys in supply order and allows duplicates, matching what a
/// configuration file can express.
///
/// # Example
///
/// ```
/// use ferry_routing::{RawRoute, RawValue};
///
/// let route = RawRoute::new()
///     .field("upstream_client", RawValue::text("east"))
///     .field("upstream_topics", RawValue::list([RawValue::text("t1")]))
///     .field("downstream_client", RawValue::text("west"))
///     .field("downstream_topic", RawValue::text("t1_copy"))
///     .build();
///
/// assert!(route.as_pairs().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawRoute {
    pairs: Vec<(String, RawValue)>,
}

impl RawRoute {
    /// Create an empty route description
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key-value pair
    ///
    /// Repeating a key does not overwrite; both occurrences are kept and
    /// the schema validator resolves them last-write-wins.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: RawValue) -> Self {
        self.pairs.push((key.into(), value));
        self
    }

    /// Finish building, yielding a `RawValue::Pairs`
    #[inline]
    #[must_use]
    pub fn build(self) -> RawValue {
        RawValue::Pairs(self.pairs)
    }
}
