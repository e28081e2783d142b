//! Error types for fleetconv.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for conversion operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be read.
    #[error("failed to read input file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input did not decode as an osquery pack.
    #[error("failed to parse osquery pack JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The input file extension maps to no known format.
    #[error("unsupported input format '{}': expected .conf, .json, or .sql", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A query record could not be rendered as YAML.
    #[error("failed to serialize query to YAML: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The output file could not be written.
    #[error("failed to write output file '{}': {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Create a read error for the given input path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported-format error for the given input path.
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Create a write error for the given output path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_display() {
        let err = ConvertError::unsupported("input.txt");
        assert_eq!(
            err.to_string(),
            "unsupported input format 'input.txt': expected .conf, .json, or .sql"
        );
    }

    #[test]
    fn test_read_error_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConvertError::read("pack.conf", io);
        assert_eq!(
            err.to_string(),
            "failed to read input file 'pack.conf': no such file"
        );
    }
}
