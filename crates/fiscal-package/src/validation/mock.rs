//! Mock validation service for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{FiscalError, Result};

use super::service::{GroupedResults, ValidationRequest, ValidationService};

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Report(GroupedResults),
    NoReport,
    Fail(String),
}

/// Validation service returning a canned outcome and recording requests.
#[derive(Debug)]
pub struct MockValidationService {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<ValidationRequest>>,
}

impl MockValidationService {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_report(report: GroupedResults) -> Self {
        Self::new(MockBehavior::Report(report))
    }

    pub fn no_report() -> Self {
        Self::new(MockBehavior::NoReport)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    /// Number of runs so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<ValidationRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl Default for MockValidationService {
    fn default() -> Self {
        Self::with_report(GroupedResults::default())
    }
}

#[async_trait]
impl ValidationService for MockValidationService {
    type Report = GroupedResults;

    async fn run(&self, request: ValidationRequest) -> Result<Option<GroupedResults>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request);
        }

        match &self.behavior {
            MockBehavior::Report(report) => Ok(Some(report.clone())),
            MockBehavior::NoReport => Ok(None),
            MockBehavior::Fail(message) => Err(FiscalError::Service(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[tokio::test]
    async fn test_no_report_differs_from_empty_report() {
        let none = MockValidationService::no_report();
        assert_eq!(validate(&none, "\"a\"", None).await.unwrap(), None);

        let empty = MockValidationService::default();
        let report = validate(&empty, "\"a\"", None).await.unwrap().unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_error_and_single_call() {
        let service = MockValidationService::failing("boom");
        let err = validate(&service, "\"a\"", None).await.unwrap_err();
        assert!(matches!(err, FiscalError::Service(ref m) if m == "boom"));
        assert_eq!(service.calls(), 1);
        assert_eq!(service.last_request().unwrap().data, "\"a\"");
    }
}
