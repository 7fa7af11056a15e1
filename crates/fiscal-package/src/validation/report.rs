//! Normalized validation report.

use serde::{Deserialize, Serialize};

/// Level of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Informational only.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite issue.
    Error,
}

impl IssueLevel {
    /// Map a service level string; unknown levels count as errors.
    pub fn from_level(level: &str) -> Self {
        match level.to_ascii_lowercase().as_str() {
            "info" => IssueLevel::Info,
            "warning" | "warn" => IssueLevel::Warning,
            _ => IssueLevel::Error,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueLevel::Info => "Info",
            IssueLevel::Warning => "Warning",
            IssueLevel::Error => "Error",
        }
    }
}

/// One problem found in a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
    /// Column the issue refers to, if the service named one.
    pub column_index: Option<usize>,
    pub level: IssueLevel,
}

/// All issues for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowReport {
    pub row_index: usize,
    /// Cell values of the row as reported by the service.
    pub context: Vec<String>,
    pub errors: Vec<ValidationIssue>,
    /// Table headers, shared by every row of a report.
    pub headers: Vec<String>,
}

impl RowReport {
    /// Header of the column an issue refers to.
    pub fn column_name(&self, issue: &ValidationIssue) -> Option<&str> {
        issue
            .column_index
            .and_then(|i| self.headers.get(i))
            .map(String::as_str)
    }
}

/// Rows with issues, ordered by row index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub rows: Vec<RowReport>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Total issues across rows.
    pub fn issue_count(&self) -> usize {
        self.rows.iter().map(|r| r.errors.len()).sum()
    }

    /// Issues at the given level.
    pub fn count_level(&self, level: IssueLevel) -> usize {
        self.rows
            .iter()
            .flat_map(|r| &r.errors)
            .filter(|e| e.level == level)
            .count()
    }

    /// Issues referring to one column, with their row index.
    pub fn issues_for_column(&self, column_index: usize) -> Vec<(usize, &ValidationIssue)> {
        self.rows
            .iter()
            .flat_map(|r| r.errors.iter().map(move |e| (r.row_index, e)))
            .filter(|(_, e)| e.column_index == Some(column_index))
            .collect()
    }
}
