//! Error types for YAML parsing with source locations.

use thiserror::Error;

/// Result type alias for pod-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// YAML syntax error reported by the scanner or parser.
    #[error("{message}")]
    Parse {
        message: String,
        line: usize,
        col: usize,
    },

    /// An alias refers to an anchor whose node is not complete yet
    /// (a node that contains an alias to itself).
    #[error("alias at line {line} refers to anchor that is still being defined")]
    RecursiveAlias { line: usize },
}

impl Error {
    /// 1-based line of the failure.
    pub fn line(&self) -> usize {
        match self {
            Error::Parse { line, .. } | Error::RecursiveAlias { line } => *line,
        }
    }
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        let marker = err.marker();
        Error::Parse {
            message: err.to_string(),
            line: marker.line(),
            col: marker.col() + 1,
        }
    }
}
