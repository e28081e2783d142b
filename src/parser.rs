//! Input parsers for the two supported formats.
//!
//! ```text
//! pack.conf   {"queries": {"name": {...}}}   -> keyed by map key
//! queries.sql SELECT 1; SELECT 2;            -> keyed by position
//! ```
//!
//! Both parsers produce the same `RawQuery` sequence, so everything
//! downstream is format-agnostic.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::map,
    multi::many0,
    sequence::terminated,
};
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};
use crate::model::{OsqueryPack, RawQuery};

/// The two input formats, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// osquery pack: JSON object with a top-level `queries` map.
    JsonPack,
    /// Plain SQL text with `;`-terminated statements.
    Sql,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// `.conf` and `.json` select the pack parser, `.sql` the statement
    /// splitter. Matching is ASCII case-insensitive. Anything else is
    /// `UnsupportedFormat`.
    pub fn from_path(path: &Path) -> ConvertResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("conf") | Some("json") => Ok(Format::JsonPack),
            Some("sql") => Ok(Format::Sql),
            _ => Err(ConvertError::unsupported(path)),
        }
    }
}

/// Parse input text in the given format into raw queries.
pub fn parse(content: &str, format: Format) -> ConvertResult<Vec<RawQuery>> {
    match format {
        Format::JsonPack => parse_json_pack(content),
        Format::Sql => Ok(parse_sql(content)),
    }
}

/// Decode an osquery pack and flatten its `queries` map.
///
/// Entries come back sorted by name (the map is ordered), so repeated runs
/// over the same pack emit identical output.
fn parse_json_pack(content: &str) -> ConvertResult<Vec<RawQuery>> {
    let pack: OsqueryPack = serde_json::from_str(content)?;

    Ok(pack
        .queries
        .into_iter()
        .map(|(name, entry)| RawQuery {
            name,
            query: entry.query,
            description: none_if_empty(entry.description),
            platform: none_if_empty(entry.platform),
            interval: entry.interval,
        })
        .collect())
}

/// Split SQL text into `;`-terminated statements.
///
/// Each run of non-`;` characters followed by a `;` is one statement,
/// trimmed. Text after the last `;` is dropped, so an unterminated final
/// statement never reaches the output. Statements are not inspected: a `;`
/// inside a string literal ends the statement there (known limitation).
fn parse_sql(content: &str) -> Vec<RawQuery> {
    // many0 cannot fail; whatever trails the last ';' is discarded.
    let statements = match sql_statements(content) {
        Ok((_trailing, statements)) => statements,
        Err(_) => Vec::new(),
    };

    statements
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, statement)| RawQuery {
            name: format!("sql_query_{}", i + 1),
            query: statement.trim().to_string(),
            description: None,
            platform: None,
            interval: None,
        })
        .collect()
}

/// Scan all statements left to right.
fn sql_statements(input: &str) -> IResult<&str, Vec<Option<&str>>> {
    many0(sql_statement)(input)
}

/// One statement body up to its `;`, or a bare `;` with no body.
fn sql_statement(input: &str) -> IResult<&str, Option<&str>> {
    alt((
        map(terminated(take_while1(|c| c != ';'), char(';')), Some),
        map(char(';'), |_| None),
    ))(input)
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
