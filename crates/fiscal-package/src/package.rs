//! Application context and public entry points.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, instrument};

use crate::concepts::ConceptCatalog;
use crate::currency::{default_currency, Currency};
use crate::error::{FiscalError, Result};
use crate::inference::{CompatibilityResolver, InferredSchema, SchemaInference, TableSchema};
use crate::input::{DataSource, FetchConfig, ParserConfig};
use crate::types::TypeRegistry;
use crate::validation::{validate, GoodTablesService, ValidationConfig, ValidationReport};

/// Environment variable overriding the validation endpoint.
pub const ENV_VALIDATION_ENDPOINT: &str = "FDP_VALIDATION_ENDPOINT";
/// Environment variable overriding the sample limit (records, header included).
pub const ENV_SAMPLE_LIMIT: &str = "FDP_SAMPLE_LIMIT";
/// Environment variable overriding every HTTP timeout, in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "FDP_HTTP_TIMEOUT_SECS";
/// Environment variable overriding the remote read limit, in bytes.
pub const ENV_MAX_FETCH_BYTES: &str = "FDP_MAX_FETCH_BYTES";

/// Configuration for a [`FiscalPackager`].
#[derive(Debug, Clone, Default)]
pub struct FiscalConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Limits for reading sources.
    pub fetch: FetchConfig,
    /// Remote validation settings.
    pub validation: ValidationConfig,
}

impl FiscalConfig {
    /// Defaults overridden by `FDP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_VALIDATION_ENDPOINT) {
            url::Url::parse(&endpoint).map_err(|e| {
                FiscalError::Config(format!("{} is not a valid URL: {}", ENV_VALIDATION_ENDPOINT, e))
            })?;
            config.validation.endpoint = endpoint;
        }
        if let Some(limit) = parse_var::<usize>(&lookup, ENV_SAMPLE_LIMIT)? {
            if limit == 0 {
                return Err(FiscalError::Config(format!("{} must be positive", ENV_SAMPLE_LIMIT)));
            }
            config.parser.sample_limit = Some(limit);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, ENV_HTTP_TIMEOUT_SECS)? {
            config.fetch.timeout = Duration::from_secs(secs);
            config.validation.timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = parse_var::<usize>(&lookup, ENV_MAX_FETCH_BYTES)? {
            if bytes == 0 {
                return Err(FiscalError::Config(format!("{} must be positive", ENV_MAX_FETCH_BYTES)));
            }
            config.fetch.max_bytes = bytes;
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FiscalError::Config(format!("{} has invalid value '{}'", key, raw))),
    }
}

/// Fiscal data packaging context.
///
/// Holds the type registry, concept catalog, currency reference and HTTP
/// client. Immutable once built and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct FiscalPackager {
    config: FiscalConfig,
    registry: TypeRegistry,
    catalog: ConceptCatalog,
    currencies: Vec<Currency>,
    inference: SchemaInference,
    client: Client,
}

impl FiscalPackager {
    /// Create a packager with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(FiscalConfig::default())
    }

    /// Create a packager with custom configuration.
    pub fn with_config(config: FiscalConfig) -> Result<Self> {
        let registry = TypeRegistry::new();
        let catalog = ConceptCatalog::fiscal(&registry);
        let inference = SchemaInference::with_config(registry.clone(), config.parser.clone());
        let client = Client::builder()
            .build()
            .map_err(|e| FiscalError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            registry,
            catalog,
            currencies: Vec::new(),
            inference,
            client,
        })
    }

    /// Use a different concept catalog.
    pub fn with_catalog(mut self, catalog: ConceptCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Attach currency reference data.
    pub fn with_currencies(mut self, currencies: Vec<Currency>) -> Self {
        self.currencies = currencies;
        self
    }

    pub fn config(&self) -> &FiscalConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ConceptCatalog {
        &self.catalog
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Default currency of the attached reference data.
    pub fn default_currency(&self) -> Option<&Currency> {
        default_currency(&self.currencies)
    }

    /// Resolver over this packager's registry and catalog.
    pub fn resolver(&self) -> CompatibilityResolver<'_> {
        CompatibilityResolver::new(&self.registry, &self.catalog)
    }

    /// Read a source and infer its schema.
    #[instrument(skip_all, fields(source = %source))]
    pub async fn infer(&self, source: &DataSource) -> Result<InferredSchema> {
        let fetched = source.read(&self.client, &self.config.fetch).await?;
        let inferred = self.inference.infer_bytes(source, &fetched)?;
        info!(
            name = %inferred.source.name,
            columns = inferred.columns.len(),
            rows = inferred.rows.len(),
            "inferred schema"
        );
        Ok(inferred)
    }

    /// GoodTables backend for the configured endpoint, sharing this client.
    pub fn goodtables(&self) -> Result<GoodTablesService> {
        GoodTablesService::with_client(self.client.clone(), &self.config.validation)
    }

    /// Validate canonical text against the configured GoodTables endpoint.
    pub async fn validate(
        &self,
        data: &str,
        schema: Option<&TableSchema>,
    ) -> Result<Option<ValidationReport>> {
        let service = self.goodtables()?;
        validate(&service, data, schema).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = FiscalConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.parser.sample_limit, Some(1000));
        assert_eq!(config.validation.endpoint, crate::validation::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_overrides() {
        let config = FiscalConfig::from_lookup(lookup(&[
            (ENV_VALIDATION_ENDPOINT, "http://127.0.0.1:9/run"),
            (ENV_SAMPLE_LIMIT, "50"),
            (ENV_HTTP_TIMEOUT_SECS, "5"),
            (ENV_MAX_FETCH_BYTES, "1024"),
        ]))
        .unwrap();
        assert_eq!(config.validation.endpoint, "http://127.0.0.1:9/run");
        assert_eq!(config.parser.sample_limit, Some(50));
        assert_eq!(config.fetch.timeout, Duration::from_secs(5));
        assert_eq!(config.validation.timeout, Duration::from_secs(5));
        assert_eq!(config.fetch.max_bytes, 1024);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        for vars in [
            [(ENV_SAMPLE_LIMIT, "lots")],
            [(ENV_SAMPLE_LIMIT, "0")],
            [(ENV_MAX_FETCH_BYTES, "0")],
            [(ENV_HTTP_TIMEOUT_SECS, "-1")],
            [(ENV_VALIDATION_ENDPOINT, "nowhere")],
        ] {
            assert!(matches!(
                FiscalConfig::from_lookup(lookup(&vars)),
                Err(FiscalError::Config(_))
            ));
        }
    }

    #[test]
    fn test_packager_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FiscalPackager>();
    }

    #[tokio::test]
    async fn test_infer_content_source() {
        let packager = FiscalPackager::new().unwrap();
        let source = DataSource::content("Budget 2024.csv", "Name,Amount\nFoo,10\nBar,20\n");
        let inferred = packager.infer(&source).await.unwrap();

        assert_eq!(inferred.source.name, "budget-2024");
        let amount = inferred.column_type_candidates()["Amount"].clone();
        let concepts: Vec<&str> = packager
            .resolver()
            .compatible_concepts(&amount)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert!(concepts.contains(&"measures.amount"));
        assert!(packager.default_currency().is_none());
    }
}
