//! Schema inference over parsed tabular data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::concepts::ConceptCatalog;
use crate::error::{FiscalError, Result};
use crate::input::{DataSource, DataTable, FetchedBytes, Parser, ParserConfig, SourceMetadata};
use crate::naming::{to_title, unique_name};
use crate::types::{PrimitiveType, TypeRegistry, TypeSet};

use super::compat::CompatibilityResolver;

/// Field format written into inferred descriptors.
pub const DEFAULT_FORMAT: &str = "default";

/// A field of a table schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: PrimitiveType,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Table schema descriptor sent alongside data for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub fields: Vec<Field>,
}

impl TableSchema {
    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Parse a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inference result for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredColumn {
    /// Header as found in the source.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Types every sampled value can be cast to, in registry order.
    pub candidate_types: TypeSet,
    /// Most specific candidate, if any.
    pub inferred_type: Option<PrimitiveType>,
}

/// Everything inferred from one source. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredSchema {
    pub source: SourceMetadata,
    /// Headers in source order; duplicates are possible.
    pub headers: Vec<String>,
    /// Rows in source order.
    pub rows: Vec<Vec<String>>,
    pub columns: Vec<InferredColumn>,
    /// Descriptor with unique field names.
    pub schema: TableSchema,
    /// Canonical re-serialization of the sampled records.
    pub raw: String,
}

impl InferredSchema {
    /// Header to candidate types. A repeated header keeps its first column.
    pub fn column_type_candidates(&self) -> IndexMap<&str, &TypeSet> {
        let mut candidates = IndexMap::new();
        for column in &self.columns {
            candidates
                .entry(column.name.as_str())
                .or_insert(&column.candidate_types);
        }
        candidates
    }

    /// Headers made unique with numeric suffixes, in source order.
    pub fn deduplicated_headers(&self) -> Vec<String> {
        deduplicate(&self.headers)
    }

    /// Get a column by header.
    pub fn column(&self, name: &str) -> Option<&InferredColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn deduplicate(headers: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let name = unique_name(header, &unique);
        unique.push(name);
    }
    unique
}

/// Derives schemas from tabular sources.
#[derive(Debug, Clone)]
pub struct SchemaInference {
    registry: TypeRegistry,
    parser: Parser,
}

impl SchemaInference {
    /// Create an inference engine with the standard registry and parser.
    pub fn new() -> Self {
        Self::with_config(TypeRegistry::new(), ParserConfig::default())
    }

    pub fn with_config(registry: TypeRegistry, parser: ParserConfig) -> Self {
        Self {
            registry,
            parser: Parser::with_config(parser),
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Parse fetched bytes and infer their schema.
    pub fn infer_bytes(&self, source: &DataSource, fetched: &FetchedBytes) -> Result<InferredSchema> {
        let table = self.parser.parse_bytes(&fetched.bytes)?;
        let metadata = SourceMetadata::new(source, fetched, table.delimiter, table.row_count() + 1);
        self.infer_table(table, metadata)
    }

    /// Infer the schema of in-memory text.
    pub fn infer_str(&self, name: &str, text: &str) -> Result<InferredSchema> {
        let source = DataSource::content(name, text);
        let fetched = FetchedBytes {
            bytes: text.as_bytes().to_vec(),
            truncated: false,
        };
        self.infer_bytes(&source, &fetched)
    }

    /// Infer column candidates, descriptor and canonical text for a parsed table.
    pub fn infer_table(&self, table: DataTable, source: SourceMetadata) -> Result<InferredSchema> {
        // Candidate types do not depend on concepts, so an empty catalog suffices.
        let catalog = ConceptCatalog::new(Vec::new());
        let resolver = CompatibilityResolver::new(&self.registry, &catalog);

        let columns: Vec<InferredColumn> = table
            .headers
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let values: Vec<&str> = table.column_values(position).collect();
                let candidate_types = resolver.compatible_types(values);
                let inferred_type = self.registry.most_specific(&candidate_types);
                debug!(column = %name, ?inferred_type, candidates = candidate_types.len(), "inferred column");
                InferredColumn {
                    name: name.clone(),
                    position,
                    candidate_types,
                    inferred_type,
                }
            })
            .collect();

        let schema = TableSchema {
            fields: deduplicate(&table.headers)
                .into_iter()
                .zip(&columns)
                .map(|(name, column)| Field {
                    title: to_title(&name),
                    name,
                    field_type: column.inferred_type.unwrap_or(PrimitiveType::String),
                    format: default_format(),
                })
                .collect(),
        };

        let raw = to_canonical_csv(&table.headers, &table.rows)?;

        Ok(InferredSchema {
            source,
            headers: table.headers,
            rows: table.rows,
            columns,
            schema,
            raw,
        })
    }
}

impl Default for SchemaInference {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical delimited form: comma delimiter, every field quoted, CRLF
/// between records and no trailing line terminator.
pub fn to_canonical_csv(headers: &[String], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FiscalError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}
