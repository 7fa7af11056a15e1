//! Runs a validation service and reshapes its grouped output.

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::inference::TableSchema;

use super::report::{IssueLevel, RowReport, ValidationIssue, ValidationReport};
use super::service::{GroupedReport, RowFindings, ValidationRequest, ValidationService};

/// Validate `data` against an optional schema.
///
/// Returns `Ok(None)` when the service produced no report, which is distinct
/// from a report without rows. The service is called exactly once.
#[instrument(skip_all, fields(service = service.name(), bytes = data.len(), with_schema = schema.is_some()))]
pub async fn validate<S>(
    service: &S,
    data: &str,
    schema: Option<&TableSchema>,
) -> Result<Option<ValidationReport>>
where
    S: ValidationService + ?Sized,
{
    let request = ValidationRequest::new(data, schema)?;
    let Some(report) = service.run(request).await? else {
        info!("validation service returned no report");
        return Ok(None);
    };

    let report = normalize(&report);
    info!(
        rows = report.len(),
        issues = report.issue_count(),
        "validation finished"
    );
    Ok(Some(report))
}

/// Take the first entry of every row group, attach the headers and order by row.
pub fn normalize<R: GroupedReport + ?Sized>(report: &R) -> ValidationReport {
    let headers = report.headers();
    let mut rows: Vec<RowReport> = report
        .grouped_by_rows()
        .into_iter()
        .filter_map(|group| {
            if group.len() > 1 {
                debug!(entries = group.len(), "row group has extra entries");
            }
            group.into_iter().next()
        })
        .map(|(_, findings)| row_report(findings, &headers))
        .collect();

    rows.sort_by_key(|r| r.row_index);
    ValidationReport { rows }
}

fn row_report(findings: RowFindings, headers: &[String]) -> RowReport {
    RowReport {
        row_index: findings.row_index,
        context: findings.result_context.iter().map(cell_text).collect(),
        errors: findings
            .results
            .into_iter()
            .map(|f| ValidationIssue {
                level: IssueLevel::from_level(&f.result_level),
                code: f.result_id,
                message: f.result_message,
                column_index: f.column_index,
            })
            .collect(),
        headers: headers.to_vec(),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
