//! FleetDM YAML emitter.
//!
//! Applies the default-value policy to raw queries and renders the result
//! as a multi-document YAML stream, one document per query.

use crate::error::ConvertResult;
use crate::model::{FleetQuery, Metadata, QuerySpec, RawQuery};

/// Platform list used when a query does not name one.
pub const DEFAULT_PLATFORM: &str = "linux, darwin, windows";
/// Description used when a query does not carry one.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";
/// Schedule interval in seconds used when a query does not carry a usable one.
pub const DEFAULT_INTERVAL: i64 = 3600;

const API_VERSION: &str = "v1";
const KIND_QUERY: &str = "query";
const DOCUMENT_SEPARATOR: &str = "---\n";

/// Trait for rendering a record as one YAML document.
pub trait ToYaml {
    /// Render this record as a YAML document body (no separator).
    fn to_yaml(&self) -> ConvertResult<String>;
}

impl ToYaml for FleetQuery {
    fn to_yaml(&self) -> ConvertResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl FleetQuery {
    /// Build a canonical FleetDM record from a raw query, filling defaults.
    ///
    /// Defaulting is idempotent: a record whose fields are already populated
    /// passes through unchanged.
    pub fn from_raw(raw: RawQuery) -> Self {
        let description = raw
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        let platform = raw
            .platform
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());
        let interval = raw
            .interval
            .and_then(|i| i.as_secs())
            .unwrap_or(DEFAULT_INTERVAL);

        FleetQuery {
            api_version: API_VERSION.to_string(),
            kind: KIND_QUERY.to_string(),
            metadata: Metadata {
                name: raw.name.clone(),
            },
            spec: QuerySpec {
                name: raw.name,
                query: raw.query,
                description,
                platform,
                interval,
            },
        }
    }
}

/// Apply the default policy to every raw query.
pub fn transform(raw: Vec<RawQuery>) -> Vec<FleetQuery> {
    raw.into_iter().map(FleetQuery::from_raw).collect()
}

/// Render all queries as one `---`-separated YAML stream.
///
/// The stream opens with a separator line, and each subsequent document is
/// prefixed by one. Zero queries yield just the opening separator.
pub fn serialize_documents(queries: &[FleetQuery]) -> ConvertResult<String> {
    let mut out = String::from(DOCUMENT_SEPARATOR);

    for (i, query) in queries.iter().enumerate() {
        if i > 0 {
            out.push_str(DOCUMENT_SEPARATOR);
        }
        out.push_str(&query.to_yaml()?);
    }

    Ok(out)
}
