//! Declarative route schema
//!
//! One route description is validated against a fixed field table: every
//! recognized attribute name paired with the function that checks and
//! stores its value. Validation is total per route; it walks every
//! supplied field and every schema field, collecting faults as it goes,
//! so a skipped route alerts with the complete list of problems instead
//! of the first one found.
//!
//! Duplicate keys are legal in the raw input. They are merged
//! last-write-wins here, in one explicit step, so the outcome does not
//! depend on how the description was assembled upstream. Validators run
//! in supply order over the partial result accumulated so far, which is
//! what allows cross-field rules to see earlier fields.

use crate::checks;
use crate::error::{self, RouteError};
use crate::ids::ClientId;
use crate::options::{
    BeginOffset, Compression, DEFAULT_MAX_PARTITIONS_PER_GROUP_MEMBER, RepartitioningStrategy,
    RouteOptions,
};
use crate::raw::RawValue;
use crate::resolver::ClusterResolver;
use crate::route::{Route, RouteEnd};
use crate::topic::{self, TopicName};

/// A route description that passed the schema, before expansion
///
/// Holds the upstream topics still as a set; the registry expands the
/// candidate into one [`Route`] per upstream topic on insert.
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    /// Validated upstream client id
    pub upstream_client: ClientId,

    /// Canonical upstream topics, order and duplicates as written
    pub upstream_topics: Vec<TopicName>,

    /// Validated downstream client id
    pub downstream_client: ClientId,

    /// Canonical downstream topic
    pub downstream_topic: TopicName,

    /// Options with defaults filled in
    pub options: RouteOptions,
}

impl RouteCandidate {
    /// Expand into one route per upstream topic
    ///
    /// A repeated upstream topic yields a repeated key; inserting the
    /// expansion into a map collapses the repeats onto the last one.
    #[must_use]
    pub fn expand(&self) -> Vec<Route> {
        self.upstream_topics
            .iter()
            .map(|topic| Route {
                upstream: RouteEnd::new(self.upstream_client.clone(), topic.clone()),
                downstream: RouteEnd::new(
                    self.downstream_client.clone(),
                    self.downstream_topic.clone(),
                ),
                options: self.options,
            })
            .collect()
    }
}

/// Context shared by all field validators
struct Cx<'a> {
    resolver: &'a dyn ClusterResolver,
}

/// Fields accumulated while walking one description
///
/// Each slot is filled either by its validator or by the defaults pass.
/// A slot still `None` at the end always has a matching entry in the
/// fault list.
#[derive(Default)]
struct Fields {
    upstream_client: Option<ClientId>,
    upstream_topics: Option<Vec<TopicName>>,
    downstream_client: Option<ClientId>,
    downstream_topic: Option<TopicName>,
    repartitioning_strategy: Option<RepartitioningStrategy>,
    max_partitions_per_group_member: Option<u32>,
    default_begin_offset: Option<BeginOffset>,
    compression: Option<Compression>,
}

impl Fields {
    fn into_candidate(self) -> Option<RouteCandidate> {
        Some(RouteCandidate {
            upstream_client: self.upstream_client?,
            upstream_topics: self.upstream_topics?,
            downstream_client: self.downstream_client?,
            downstream_topic: self.downstream_topic?,
            options: RouteOptions {
                repartitioning_strategy: self.repartitioning_strategy?,
                max_partitions_per_group_member: self.max_partitions_per_group_member?,
                begin_offset: self.default_begin_offset?,
                compression: self.compression?,
            },
        })
    }
}

/// One field validator: checks the raw value and stores the result
type FieldCheck = fn(&Cx<'_>, &mut Fields, &RawValue) -> Result<(), RouteError>;

/// The route schema: every attribute a description may carry
const SCHEMA: &[(&str, FieldCheck)] = &[
    ("upstream_client", check_upstream_client),
    ("downstream_client", check_downstream_client),
    ("upstream_topics", check_upstream_topics),
    ("downstream_topic", check_downstream_topic),
    ("repartitioning_strategy", check_repartitioning_strategy),
    ("max_partitions_per_group_member", check_max_partitions),
    ("default_begin_offset", check_begin_offset),
    ("compression", check_compression),
];

/// Fill `name` from the platform defaults, if it has one
///
/// Returns false for the four mandatory fields, which have no default: a
/// route that does not say where it consumes from and produces to is not
/// a route.
fn apply_default(fields: &mut Fields, name: &str) -> bool {
    match name {
        "repartitioning_strategy" => {
            fields.repartitioning_strategy = Some(RepartitioningStrategy::default());
            true
        }
        "max_partitions_per_group_member" => {
            fields.max_partitions_per_group_member = Some(DEFAULT_MAX_PARTITIONS_PER_GROUP_MEMBER);
            true
        }
        "default_begin_offset" => {
            fields.default_begin_offset = Some(BeginOffset::default());
            true
        }
        "compression" => {
            fields.compression = Some(Compression::default());
            true
        }
        _ => false,
    }
}

/// Validate one route description against the schema
///
/// On success the returned candidate is fully populated, including
/// defaults. On failure the returned list holds every distinct fault:
/// unknown attributes, invalid values, missing mandatory attributes, and
/// the loopback rejection, which runs only once everything else passed.
///
/// # Errors
///
/// Returns the full, deduplicated fault list; it is never empty.
pub fn validate_route(
    pairs: &[(String, RawValue)],
    resolver: &dyn ClusterResolver,
) -> Result<RouteCandidate, Vec<RouteError>> {
    // Merge duplicate keys last-write-wins before any validation runs.
    let mut merged: Vec<(&str, &RawValue)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        if let Some(slot) = merged.iter_mut().find(|(k, _)| *k == key.as_str()) {
            slot.1 = value;
        } else {
            merged.push((key.as_str(), value));
        }
    }

    let cx = Cx { resolver };
    let mut fields = Fields::default();
    let mut errors: Vec<RouteError> = Vec::new();

    for &(key, value) in &merged {
        match SCHEMA.iter().find(|&&(name, _)| name == key) {
            Some(&(_, check)) => {
                if let Err(error) = check(&cx, &mut fields, value) {
                    errors.push(error);
                }
            }
            None => errors.push(RouteError::unknown_attribute(key)),
        }
    }

    // Schema fields the description left out: default or mandatory.
    for &(name, _) in SCHEMA {
        if merged.iter().any(|&(key, _)| key == name) {
            continue;
        }
        if !apply_default(&mut fields, name) {
            errors.push(RouteError::missing_attribute(name));
        }
    }

    match fields.into_candidate() {
        Some(candidate) if errors.is_empty() => {
            // Loopback is a whole-route property, checked only once every
            // field is known to be valid.
            if candidate.upstream_client == candidate.downstream_client
                && checks::direct_loopback(&candidate.upstream_topics, &candidate.downstream_topic)
            {
                return Err(vec![RouteError::direct_loopback(
                    candidate.upstream_client.as_str(),
                    candidate.downstream_topic.as_str(),
                )]);
            }
            Ok(candidate)
        }
        _ => Err(error::dedup(errors)),
    }
}

/// Pull a text value out of a field or say what shape it had instead
fn expect_text<'v>(field: &'static str, value: &'v RawValue) -> Result<&'v str, RouteError> {
    value.as_text().ok_or_else(|| {
        RouteError::invalid_option_value(field, format!("expected text, got {}", value.kind()))
    })
}

fn check_upstream_client(
    cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    let id = expect_text("upstream_client", value)?;
    if !cx.resolver.is_configured(id) {
        return Err(RouteError::unknown_upstream_client(id));
    }
    fields.upstream_client = Some(ClientId::new(id));
    Ok(())
}

fn check_downstream_client(
    cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    let id = expect_text("downstream_client", value)?;
    if !cx.resolver.is_configured(id) {
        return Err(RouteError::unknown_downstream_client(id));
    }
    fields.downstream_client = Some(ClientId::new(id));
    Ok(())
}

fn check_upstream_topics(
    _cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    match topic::normalize_topics(value) {
        Ok(topics) => {
            fields.upstream_topics = Some(topics);
            Ok(())
        }
        Err(problems) => Err(RouteError::invalid_topic_name(
            "upstream_topics",
            problems.join("; "),
        )),
    }
}

fn check_downstream_topic(
    _cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    match topic::normalize_topic(value) {
        Ok(name) => {
            fields.downstream_topic = Some(name);
            Ok(())
        }
        Err(problems) => Err(RouteError::invalid_topic_name(
            "downstream_topic",
            problems.join("; "),
        )),
    }
}

fn check_repartitioning_strategy(
    _cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    let text = expect_text("repartitioning_strategy", value)?;
    match RepartitioningStrategy::parse(text) {
        Some(strategy) => {
            fields.repartitioning_strategy = Some(strategy);
            Ok(())
        }
        None => Err(RouteError::invalid_option_value(
            "repartitioning_strategy",
            format!(
                "'{text}' is not one of {}",
                RepartitioningStrategy::VARIANTS.join(", ")
            ),
        )),
    }
}

fn check_max_partitions(
    _cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    const FIELD: &str = "max_partitions_per_group_member";
    match value.as_int() {
        Some(n) if n > 0 && n <= i64::from(u32::MAX) => {
            fields.max_partitions_per_group_member = Some(n as u32);
            Ok(())
        }
        Some(n) => Err(RouteError::invalid_option_value(
            FIELD,
            format!("{n} is not a positive integer"),
        )),
        None => Err(RouteError::invalid_option_value(
            FIELD,
            format!("expected a positive integer, got {}", value.kind()),
        )),
    }
}

fn check_begin_offset(
    _cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    let text = expect_text("default_begin_offset", value)?;
    match BeginOffset::parse(text) {
        Some(offset) => {
            fields.default_begin_offset = Some(offset);
            Ok(())
        }
        None => Err(RouteError::invalid_option_value(
            "default_begin_offset",
            format!("'{text}' is not one of {}", BeginOffset::VARIANTS.join(", ")),
        )),
    }
}

fn check_compression(
    _cx: &Cx<'_>,
    fields: &mut Fields,
    value: &RawValue,
) -> Result<(), RouteError> {
    let text = expect_text("compression", value)?;
    match Compression::parse(text) {
        Some(compression) => {
            fields.compression = Some(compression);
            Ok(())
        }
        None => Err(RouteError::invalid_option_value(
            "compression",
            format!("'{text}' is not one of {}", Compression::VARIANTS.join(", ")),
        )),
    }
}
