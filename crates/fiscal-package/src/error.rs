//! Error types for the fiscal package library.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single row-level problem reported while parsing a tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseIssue {
    /// Zero-based record index (the header record is 0).
    pub row: usize,
    /// Short machine-readable code.
    pub code: ParseIssueCode,
    /// Human-readable description.
    pub message: String,
}

/// Kind of parse issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseIssueCode {
    /// Field content is not valid UTF-8.
    InvalidEncoding,
    /// Record has fewer fields than the header.
    TooFewFields,
    /// Record has more fields than the header.
    TooManyFields,
    /// Malformed record, such as a quoted field that is never closed.
    Malformed,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Main error type for fiscal package operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more rows of the source could not be parsed.
    #[error("{} parse error(s), first at {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Parse(Vec<ParseIssue>),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty source or no records to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote endpoint answered with a non-success status.
    #[error("HTTP {status} from '{url}'")]
    HttpStatus { url: String, status: u16 },

    /// A URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The validation service reported a failure.
    #[error("Validation service error: {0}")]
    Service(String),
}

impl FiscalError {
    /// Parse issues carried by this error, if any.
    pub fn parse_issues(&self) -> Option<&[ParseIssue]> {
        match self {
            FiscalError::Parse(issues) => Some(issues),
            _ => None,
        }
    }
}

/// Result type alias for fiscal package operations.
pub type Result<T> = std::result::Result<T, FiscalError>;
