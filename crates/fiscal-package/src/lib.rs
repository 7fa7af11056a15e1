//! Fiscal data package toolkit.
//!
//! Turns raw tabular budget and spending data into typed, concept-mapped
//! fiscal data packages: it infers a schema from a delimited source,
//! suggests which fiscal concepts each column may represent and validates
//! the data against a remote validation service.
//!
//! # Example
//!
//! ```no_run
//! use fiscal_package::{DataSource, FiscalPackager};
//!
//! # async fn run() -> fiscal_package::Result<()> {
//! let packager = FiscalPackager::new()?;
//! let inferred = packager.infer(&DataSource::from_location("budget.csv")).await?;
//!
//! for (header, types) in inferred.column_type_candidates() {
//!     let concepts = packager.resolver().compatible_concepts(types);
//!     println!("{}: {} candidate concepts", header, concepts.len());
//! }
//!
//! let report = packager.validate(&inferred.raw, Some(&inferred.schema)).await?;
//! # Ok(())
//! # }
//! ```

pub mod concepts;
pub mod currency;
pub mod error;
pub mod inference;
pub mod input;
pub mod naming;
pub mod types;
pub mod validation;

mod package;

pub use crate::package::{
    FiscalConfig, FiscalPackager, ENV_HTTP_TIMEOUT_SECS, ENV_MAX_FETCH_BYTES, ENV_SAMPLE_LIMIT,
    ENV_VALIDATION_ENDPOINT,
};
pub use concepts::{Concept, ConceptCatalog, ConceptGroup, ConceptMapping};
pub use currency::{default_currency, Currency};
pub use error::{FiscalError, ParseIssue, ParseIssueCode, Result};
pub use inference::{
    CompatibilityResolver, InferredColumn, InferredSchema, Sample, SchemaInference, TableSchema,
    TypeSelection,
};
pub use input::{DataSource, DataTable, FetchConfig, ParserConfig, SourceMetadata};
pub use types::{PrimitiveType, TypeRegistry, TypeSet};
pub use validation::{
    validate, GoodTablesService, MockValidationService, ValidationConfig, ValidationReport,
    ValidationService,
};
