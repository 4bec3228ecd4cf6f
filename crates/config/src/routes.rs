//! Route section of the configuration file
//!
//! Routes are carried as raw TOML values, not typed structs: route
//! validation is the registry's job and happens with skip-and-continue
//! semantics, so one bad route table must not fail the whole file. Only
//! the section shape is enforced at parse time. A `routes` key that is
//! not an array aborts the load before the registry ever runs.
//!
//! # Example
//!
//! ```toml
//! [[routes]]
//! upstream_client = "east"
//! upstream_topics = ["orders", "payments"]
//! downstream_client = "west"
//! downstream_topic = "mirrored"
//! compression = "gzip"
//! ```

use ferry_routing::RawValue;
use serde::Deserialize;

/// The `routes` array, each entry still in raw TOML form
///
/// A `routes` key that is not an array fails deserialization, which makes
/// a malformed section fatal at load time. A non-table *element* survives
/// parsing and is left for the registry to reject entry by entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RoutesConfig {
    entries: Vec<toml::Value>,
}

impl RoutesConfig {
    /// Get the number of route descriptions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no routes are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert every entry into the registry's raw-value form
    ///
    /// The conversion is total: whatever TOML could express comes out the
    /// other side, including shapes the route schema will reject. The
    /// registry alerts on a bad entry with its original payload, which it
    /// can only do if the payload gets there.
    pub fn to_raw(&self) -> Vec<RawValue> {
        self.entries.iter().map(toml_to_raw).collect()
    }
}

/// Map one TOML value onto the registry's input representation
fn toml_to_raw(value: &toml::Value) -> RawValue {
    match value {
        toml::Value::String(s) => RawValue::text(s.as_str()),
        toml::Value::Integer(n) => RawValue::Int(*n),
        toml::Value::Float(x) => RawValue::Float(*x),
        toml::Value::Boolean(b) => RawValue::Bool(*b),
        // TOML has no binary type, so datetimes are the one scalar with no
        // native counterpart; their text form keeps the conversion total.
        toml::Value::Datetime(dt) => RawValue::text(dt.to_string()),
        toml::Value::Array(items) => RawValue::list(items.iter().map(toml_to_raw)),
        toml::Value::Table(table) => RawValue::Pairs(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_raw(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deserialize a `routes = ...` document down to the section value
    fn section(toml: &str) -> Result<RoutesConfig, toml::de::Error> {
        #[derive(Deserialize)]
        struct Doc {
            routes: RoutesConfig,
        }
        toml::from_str::<Doc>(toml).map(|doc| doc.routes)
    }

    #[test]
    fn test_empty_array() {
        let routes = section("routes = []").unwrap();
        assert!(routes.is_empty());
        assert!(routes.to_raw().is_empty());
    }

    #[test]
    fn test_route_table_becomes_pairs() {
        let routes = section(
            r#"
[[routes]]
upstream_client = "east"
upstream_topics = ["t1", "t2"]
downstream_client = "west"
downstream_topic = "merged"
max_partitions_per_group_member = 4
"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 1);
        let raw = routes.to_raw();
        let pairs = raw[0].as_pairs().expect("route should convert to pairs");

        let topics = pairs
            .iter()
            .find(|(key, _)| key == "upstream_topics")
            .map(|(_, value)| value)
            .unwrap();
        assert_eq!(
            *topics,
            RawValue::list([RawValue::text("t1"), RawValue::text("t2")])
        );

        let cap = pairs
            .iter()
            .find(|(key, _)| key == "max_partitions_per_group_member")
            .map(|(_, value)| value)
            .unwrap();
        assert_eq!(*cap, RawValue::Int(4));
    }

    #[test]
    fn test_non_array_section_is_fatal() {
        assert!(section(r#"routes = "not an array""#).is_err());
        assert!(section("[routes]\nupstream_client = \"east\"").is_err());
    }

    #[test]
    fn test_non_table_element_survives_to_raw() {
        // The registry rejects these one by one; parsing must not.
        let routes = section(r#"routes = [42, "stray"]"#).unwrap();
        let raw = routes.to_raw();

        assert_eq!(raw, vec![RawValue::Int(42), RawValue::text("stray")]);
    }

    #[test]
    fn test_scalar_conversions() {
        let routes = section(
            r#"
[[routes]]
text = "t"
int = 7
float = 0.5
flag = true
stamp = 1979-05-27T07:32:00Z
"#,
        )
        .unwrap();

        let raw = routes.to_raw();
        let pairs = raw[0].as_pairs().unwrap();
        let get = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .unwrap()
        };

        assert_eq!(get("text"), RawValue::text("t"));
        assert_eq!(get("int"), RawValue::Int(7));
        assert_eq!(get("float"), RawValue::Float(0.5));
        assert_eq!(get("flag"), RawValue::Bool(true));
        assert_eq!(get("stamp"), RawValue::text("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_nested_tables_convert_recursively() {
        let routes = section(
            r#"
[[routes]]
upstream_client = "east"

[routes.extra]
inner = ["a", "b"]
"#,
        )
        .unwrap();

        let raw = routes.to_raw();
        let pairs = raw[0].as_pairs().unwrap();
        let extra = pairs
            .iter()
            .find(|(key, _)| key == "extra")
            .map(|(_, value)| value)
            .unwrap();

        let inner_pairs = extra.as_pairs().expect("nested table should be pairs");
        assert_eq!(
            inner_pairs[0].1,
            RawValue::list([RawValue::text("a"), RawValue::text("b")])
        );
    }
}
