//! Validation service abstraction and the grouped wire model.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::inference::TableSchema;

/// HTTP method used to submit a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    #[default]
    Post,
}

/// Shape of the report requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Grouped,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Grouped => "grouped",
        }
    }
}

/// One validation run: tabular text plus an optional schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub method: RequestMethod,
    pub report_type: ReportType,
    /// Canonical delimited text.
    pub data: String,
    /// JSON-serialized schema descriptor, present only when a schema was given.
    pub schema: Option<String>,
}

impl ValidationRequest {
    /// Build a grouped POST request, serializing the schema when present.
    pub fn new(data: impl Into<String>, schema: Option<&TableSchema>) -> Result<Self> {
        Ok(Self {
            method: RequestMethod::Post,
            report_type: ReportType::Grouped,
            data: data.into(),
            schema: schema.map(TableSchema::to_json).transpose()?,
        })
    }
}

/// A single finding reported for a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub result_id: String,
    #[serde(default)]
    pub result_message: String,
    #[serde(default)]
    pub column_index: Option<usize>,
    #[serde(default)]
    pub result_level: String,
}

/// Findings for one row, as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFindings {
    #[serde(default)]
    pub row_index: usize,
    /// Cell values of the offending row.
    #[serde(default)]
    pub result_context: Vec<Value>,
    #[serde(default)]
    pub results: Vec<Finding>,
}

/// A row group keyed by the service's row label. Only the first entry is used.
pub type RowGroup = IndexMap<String, RowFindings>;

/// A report that can be read as row groups plus the table headers.
pub trait GroupedReport {
    fn grouped_by_rows(&self) -> Vec<RowGroup>;
    fn headers(&self) -> Vec<String>;
}

/// A remote or local validation backend.
#[async_trait]
pub trait ValidationService: Send + Sync {
    type Report: GroupedReport + Send;

    /// Run one validation. `Ok(None)` means the service produced no report.
    async fn run(&self, request: ValidationRequest) -> Result<Option<Self::Report>>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// Report in the grouped GoodTables layout, usable by any backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedResults {
    #[serde(default)]
    pub results: Vec<RowGroup>,
    #[serde(default)]
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    #[serde(default)]
    pub headers: Vec<String>,
}

impl GroupedReport for GroupedResults {
    fn grouped_by_rows(&self) -> Vec<RowGroup> {
        self.results.clone()
    }

    fn headers(&self) -> Vec<String> {
        self.meta.headers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Field;
    use crate::types::PrimitiveType;

    #[test]
    fn test_request_serializes_schema_only_when_given() {
        let request = ValidationRequest::new("\"a\"", None).unwrap();
        assert_eq!(request.method, RequestMethod::Post);
        assert_eq!(request.report_type.as_str(), "grouped");
        assert!(request.schema.is_none());

        let schema = TableSchema {
            fields: vec![Field {
                name: "a".into(),
                title: "A".into(),
                field_type: PrimitiveType::Integer,
                format: "default".into(),
            }],
        };
        let request = ValidationRequest::new("\"a\"", Some(&schema)).unwrap();
        let json = request.schema.unwrap();
        assert!(json.contains("\"type\":\"integer\""));
    }

    #[test]
    fn test_grouped_results_from_json() {
        let json = r#"{
            "results": [
                {"2": {"row_index": 2, "result_context": ["x", 5],
                       "results": [{"result_id": "schema_001", "result_message": "bad",
                                    "column_index": 1, "result_level": "error"}]}}
            ],
            "meta": {"headers": ["a", "b"]}
        }"#;
        let report: GroupedResults = serde_json::from_str(json).unwrap();
        assert_eq!(report.headers(), vec!["a", "b"]);
        let groups = report.grouped_by_rows();
        assert_eq!(groups.len(), 1);
        let row = &groups[0]["2"];
        assert_eq!(row.row_index, 2);
        assert_eq!(row.results[0].column_index, Some(1));
    }
}
