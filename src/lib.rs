//! # fleetconv — osquery packs in, FleetDM queries out
//!
//! Converts query definitions authored in osquery's pack format (JSON
//! `.conf` packs or raw `.sql` files with `;`-terminated statements) into
//! FleetDM-compatible multi-document YAML.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use fleetconv::prelude::*;
//!
//! let pack = r#"{"queries":{"uptime":{"query":"SELECT * FROM uptime;"}}}"#;
//! let yaml = fleetconv::convert(pack, Format::JsonPack)?;
//! // => ---
//! //    apiVersion: v1
//! //    kind: query
//! //    ...
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Function |
//! |-------|--------|----------|
//! | Detect format | `parser` | `.conf`/`.json` vs `.sql` |
//! | Parse | `parser` | raw text → `RawQuery` sequence |
//! | Default | `emitter` | `RawQuery` → `FleetQuery` |
//! | Serialize | `emitter` | `FleetQuery` → `---`-separated YAML |
//! | Files | `convert` | read input, write output atomically |

pub mod convert;
pub mod emitter;
pub mod error;
pub mod model;
pub mod parser;

pub mod prelude {
    pub use crate::convert::{Summary, convert_file, convert_str};
    pub use crate::emitter::{
        DEFAULT_DESCRIPTION, DEFAULT_INTERVAL, DEFAULT_PLATFORM, ToYaml, serialize_documents,
        transform,
    };
    pub use crate::error::*;
    pub use crate::model::*;
    pub use crate::parser::{Format, parse};
}

/// Convert input text in the given format into a FleetDM YAML stream.
///
/// # Example
///
/// ```
/// use fleetconv::parser::Format;
///
/// let yaml = fleetconv::convert("SELECT 1;", Format::Sql).unwrap();
/// assert!(yaml.contains("sql_query_1"));
/// ```
pub fn convert(content: &str, format: parser::Format) -> error::ConvertResult<String> {
    convert::convert_str(content, format)
}
