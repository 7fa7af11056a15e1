//! Schema inference and type/concept compatibility.

mod compat;
mod schema;

pub use compat::{CompatibilityResolver, Sample, TypeSelection};
pub use schema::{
    to_canonical_csv, Field, InferredColumn, InferredSchema, SchemaInference, TableSchema,
    DEFAULT_FORMAT,
};
