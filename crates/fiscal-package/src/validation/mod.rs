//! Validation orchestration against a remote or mock service.
//!
//! A [`ValidationService`] runs once per request and yields an optional
//! grouped report; [`validate`] reshapes it into a [`ValidationReport`]
//! ordered by row.

mod goodtables;
mod mock;
mod orchestrator;
mod report;
mod service;

pub use goodtables::{GoodTablesService, ValidationConfig, DEFAULT_ENDPOINT};
pub use mock::{MockBehavior, MockValidationService};
pub use orchestrator::{normalize, validate};
pub use report::{IssueLevel, RowReport, ValidationIssue, ValidationReport};
pub use service::{
    Finding, GroupedReport, GroupedResults, ReportMeta, ReportType, RequestMethod, RowFindings,
    RowGroup, ValidationRequest, ValidationService,
};
