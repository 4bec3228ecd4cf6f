//! Topic name canonicalization
//!
//! Configuration may spell a topic as a bare identifier, a quoted string,
//! or a pre-encoded byte sequence, and may give either one topic or a
//! list of them. `normalize_topics` folds every accepted spelling into
//! canonical [`TopicName`]s and reports every spelling it cannot accept.

use std::fmt;

use crate::raw::RawValue;

/// Canonical topic name
///
/// A valid name is non-empty UTF-8 whose first character is printable
/// ASCII (code points 32 through 126). Comparison is exact; there is no
/// case folding or trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicName(String);

impl TopicName {
    /// Create a topic name without validating it
    ///
    /// Intended for lookups and tests. A name that never passed
    /// [`parse`](Self::parse) simply matches no registry entry.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Parse and validate a topic name from its text form
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the name is empty or its
    /// first character is outside printable ASCII.
    pub fn parse(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        match name.chars().next() {
            None => Err("empty topic name".to_string()),
            Some(' '..='~') => Ok(Self(name)),
            Some(first) => Err(format!(
                "topic \"{}\" starts with {:?}, expected printable ASCII",
                name.escape_debug(),
                first
            )),
        }
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TopicName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a topic field that may name one topic or a list of topics
///
/// Accepted shapes are text, bytes, or a flat list mixing the two. The
/// returned list preserves supply order and keeps duplicates; collapsing
/// repeated names is the registry's concern, not the parser's.
///
/// # Errors
///
/// Returns one description per rejected entry. A list is walked to the
/// end so a single bad name does not hide the others.
pub fn normalize_topics(value: &RawValue) -> Result<Vec<TopicName>, Vec<String>> {
    match value {
        RawValue::List(items) => {
            if items.is_empty() {
                return Err(vec!["topic list is empty".to_string()]);
            }

            let mut names = Vec::with_capacity(items.len());
            let mut problems = Vec::new();

            for item in items {
                match single_name(item) {
                    Ok(name) => names.push(name),
                    Err(problem) => problems.push(problem),
                }
            }

            if problems.is_empty() {
                Ok(names)
            } else {
                Err(problems)
            }
        }
        other => match single_name(other) {
            Ok(name) => Ok(vec![name]),
            Err(problem) => Err(vec![problem]),
        },
    }
}

/// Normalize a topic field that must name exactly one topic
///
/// # Errors
///
/// Returns a description of the problem; lists are rejected here even
/// when every element would be a valid name.
pub fn normalize_topic(value: &RawValue) -> Result<TopicName, Vec<String>> {
    match value {
        RawValue::List(_) => Err(vec![
            "expected a single topic name, got a list".to_string(),
        ]),
        other => single_name(other).map_err(|problem| vec![problem]),
    }
}

/// Canonicalize one non-list value into a topic name
fn single_name(value: &RawValue) -> Result<TopicName, String> {
    match value {
        RawValue::Text(s) => TopicName::parse(s.as_str()),
        RawValue::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => TopicName::parse(s),
            Err(_) => Err(format!(
                "topic bytes b\"{}\" are not valid UTF-8",
                String::from_utf8_lossy(b).escape_debug()
            )),
        },
        other => Err(format!("expected a topic name, got {}", other.kind())),
    }
}
