//! GoodTables HTTP validation backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{FiscalError, Result};

use super::service::{GroupedResults, ValidationRequest, ValidationService};

/// Public GoodTables run endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://goodtables.okfnlabs.org/api/run";

/// Settings for the remote validation service.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Run endpoint URL.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    report: Option<GroupedResults>,
}

/// Validation backend posting form data to a GoodTables endpoint.
#[derive(Debug, Clone)]
pub struct GoodTablesService {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl GoodTablesService {
    /// Create a service with its own client.
    pub fn new(config: &ValidationConfig) -> Result<Self> {
        Self::with_client(Client::new(), config)
    }

    /// Create a service sharing an existing client.
    pub fn with_client(client: Client, config: &ValidationConfig) -> Result<Self> {
        url::Url::parse(&config.endpoint).map_err(|e| FiscalError::InvalidUrl {
            url: config.endpoint.clone(),
            source: e,
        })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form<'a>(request: &'a ValidationRequest) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![("data", request.data.as_str())];
        if let Some(schema) = &request.schema {
            form.push(("schema", schema.as_str()));
        }
        form.push(("report_type", request.report_type.as_str()));
        form.push(("format", "csv"));
        form
    }
}

#[async_trait]
impl ValidationService for GoodTablesService {
    type Report = GroupedResults;

    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn run(&self, request: ValidationRequest) -> Result<Option<GroupedResults>> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .form(&Self::form(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FiscalError::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: RunResponse = serde_json::from_str(&body)?;
        debug!(has_report = parsed.report.is_some(), "validation response");
        Ok(parsed.report)
    }

    fn name(&self) -> &str {
        "goodtables"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields() {
        let request = ValidationRequest {
            method: Default::default(),
            report_type: Default::default(),
            data: "\"a\"".into(),
            schema: Some("{}".into()),
        };
        let form = GoodTablesService::form(&request);
        assert_eq!(
            form,
            vec![
                ("data", "\"a\""),
                ("schema", "{}"),
                ("report_type", "grouped"),
                ("format", "csv")
            ]
        );

        let request = ValidationRequest { schema: None, ..request };
        assert!(!GoodTablesService::form(&request).iter().any(|(k, _)| *k == "schema"));
    }

    #[test]
    fn test_response_without_report() {
        let parsed: RunResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(parsed.report.is_none());
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = ValidationConfig {
            endpoint: "not a url".into(),
            ..Default::default()
        };
        let err = GoodTablesService::new(&config).unwrap_err();
        assert!(matches!(err, FiscalError::InvalidUrl { .. }));
    }
}
