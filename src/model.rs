//! Wire types for both sides of the conversion.
//!
//! The input side mirrors the osquery pack JSON shape; the output side
//! mirrors the FleetDM query resource YAML shape. `RawQuery` is the
//! format-neutral record the parser hands to the emitter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An osquery pack file: named queries with scheduling metadata.
///
/// Packs carry other top-level fields (`discovery`, `platform`, ...) which
/// are ignored here. The ordered map keeps output deterministic regardless
/// of the key order in the source file.
#[derive(Debug, Deserialize)]
pub struct OsqueryPack {
    pub queries: BTreeMap<String, PackEntry>,
}

/// One scheduled query inside a pack.
///
/// Every field is individually optional: packs in the wild omit any of
/// them, and a missing field defaults downstream instead of failing the
/// whole file. Unsupported pack fields (`snapshot`, `removed`, `value`)
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackEntry {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub interval: Option<Interval>,
}

/// Scheduling interval as found on the wire.
///
/// Packs disagree on the encoding: some write `"interval": 3600`, others
/// `"interval": "3600"`. Both decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Interval {
    Seconds(i64),
    Text(String),
}

impl Interval {
    /// The interval in seconds, if the wire value carries a usable number.
    pub fn as_secs(&self) -> Option<i64> {
        match self {
            Interval::Seconds(n) => Some(*n),
            Interval::Text(s) => s.parse().ok(),
        }
    }
}

/// A single parsed query, independent of input format.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    /// Pack map key, or `sql_query_<n>` for SQL input.
    pub name: String,
    /// Literal query body. May be empty; the caller decides whether to warn.
    pub query: String,
    /// Present only for pack input, and only when non-empty.
    pub description: Option<String>,
    /// Present only for pack input, and only when non-empty.
    pub platform: Option<String>,
    /// Present only for pack input.
    pub interval: Option<Interval>,
}

/// A FleetDM query resource, ready to render as one YAML document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetQuery {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: QuerySpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub name: String,
    pub query: String,
    pub description: String,
    pub platform: String,
    pub interval: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interval_decodes_from_number() {
        let interval: Interval = serde_json::from_str("900").unwrap();
        assert_eq!(interval, Interval::Seconds(900));
        assert_eq!(interval.as_secs(), Some(900));
    }

    #[test]
    fn test_interval_decodes_from_string() {
        let interval: Interval = serde_json::from_str("\"60\"").unwrap();
        assert_eq!(interval, Interval::Text("60".to_string()));
        assert_eq!(interval.as_secs(), Some(60));
    }

    #[test]
    fn test_interval_non_numeric_string_has_no_secs() {
        let interval: Interval = serde_json::from_str("\"hourly\"").unwrap();
        assert_eq!(interval.as_secs(), None);
    }

    #[test]
    fn test_pack_entry_missing_fields_default() {
        let entry: PackEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.query, "");
        assert_eq!(entry.description, "");
        assert_eq!(entry.platform, "");
        assert_eq!(entry.interval, None);
    }

    #[test]
    fn test_pack_entry_ignores_unknown_fields() {
        let entry: PackEntry =
            serde_json::from_str(r#"{"query":"SELECT 1;","snapshot":true,"removed":false}"#)
                .unwrap();
        assert_eq!(entry.query, "SELECT 1;");
    }

    #[test]
    fn test_pack_requires_queries_field() {
        let result: Result<OsqueryPack, _> = serde_json::from_str(r#"{"platform":"linux"}"#);
        assert!(result.is_err());
    }
}
