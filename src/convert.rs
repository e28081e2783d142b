//! File-level conversion pipeline.
//!
//! One sequential pass: read the whole input file, parse, apply defaults,
//! serialize, write the whole output file. Nothing is retried and nothing
//! persists between invocations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::emitter;
use crate::error::{ConvertError, ConvertResult};
use crate::parser::{self, Format};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of query documents written.
    pub converted: usize,
    /// Of those, how many had empty query text (data-quality signal).
    pub empty_queries: usize,
    /// Where the YAML stream was written.
    pub output: PathBuf,
}

/// Convert input text in the given format straight to a YAML stream.
pub fn convert_str(content: &str, format: Format) -> ConvertResult<String> {
    let raw = parser::parse(content, format)?;
    let queries = emitter::transform(raw);
    emitter::serialize_documents(&queries)
}

/// Convert an input file to a FleetDM YAML file.
///
/// The format comes from the input extension. The output file is replaced
/// atomically: the stream is written to a sibling `.tmp` path and renamed
/// into place, so a failed run never leaves a truncated output file.
pub fn convert_file(input: &Path, output: &Path) -> ConvertResult<Summary> {
    let format = Format::from_path(input)?;
    let content = fs::read_to_string(input).map_err(|e| ConvertError::read(input, e))?;

    let raw = parser::parse(&content, format)?;
    let empty_queries = raw.iter().filter(|q| q.query.is_empty()).count();

    let queries = emitter::transform(raw);
    let yaml = emitter::serialize_documents(&queries)?;

    write_atomic(output, &yaml).map_err(|e| ConvertError::write(output, e))?;

    Ok(Summary {
        converted: queries.len(),
        empty_queries,
        output: output.to_path_buf(),
    })
}

/// Write via a sibling temp file and rename over the target.
fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_convert_file_json_pack() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pack.conf");
        let output = dir.path().join("queries.yml");
        fs::write(
            &input,
            r#"{"queries":{"q1":{"query":"SELECT 1;","description":"","platform":"","interval":"60"}}}"#,
        )
        .unwrap();

        let summary = convert_file(&input, &output).unwrap();
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.empty_queries, 0);
        assert_eq!(summary.output, output);

        let yaml = fs::read_to_string(&output).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("name: q1"));
        assert!(yaml.contains("description: No description provided"));
        assert!(yaml.contains("platform: linux, darwin, windows"));
        assert!(yaml.contains("interval: 60"));
    }

    #[test]
    fn test_convert_file_sql() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("queries.sql");
        let output = dir.path().join("queries.yml");
        fs::write(&input, "SELECT 1; SELECT 2").unwrap();

        let summary = convert_file(&input, &output).unwrap();
        assert_eq!(summary.converted, 1);

        let yaml = fs::read_to_string(&output).unwrap();
        assert!(yaml.contains("name: sql_query_1"));
        assert!(!yaml.contains("SELECT 2"));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("queries.yml");
        fs::write(&input, "SELECT 1;").unwrap();

        let err = convert_file(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_fails_with_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.conf");
        let output = dir.path().join("queries.yml");

        let err = convert_file(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::FileRead { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_pack_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pack.conf");
        let output = dir.path().join("queries.yml");
        fs::write(&input, "{broken").unwrap();

        let err = convert_file(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("queries.sql");
        let output = dir.path().join("queries.yml");
        fs::write(&input, "SELECT 1;").unwrap();
        fs::write(&output, "stale content").unwrap();

        convert_file(&input, &output).unwrap();

        let yaml = fs::read_to_string(&output).unwrap();
        assert!(!yaml.contains("stale content"));
        assert!(yaml.contains("sql_query_1"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("queries.sql");
        let output = dir.path().join("queries.yml");
        fs::write(&input, "SELECT 1;").unwrap();

        convert_file(&input, &output).unwrap();

        let entries: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(!entries.iter().any(|name| name.ends_with(".tmp")));
    }

    #[test]
    fn test_empty_query_text_is_counted_not_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pack.conf");
        let output = dir.path().join("queries.yml");
        fs::write(&input, r#"{"queries":{"blank":{"interval":600}}}"#).unwrap();

        let summary = convert_file(&input, &output).unwrap();
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.empty_queries, 1);
    }

    #[test]
    fn test_convert_str_zero_sql_statements() {
        let yaml = convert_str("SELECT 1 with no terminator", Format::Sql).unwrap();
        assert_eq!(yaml, "---\n");
    }
}
