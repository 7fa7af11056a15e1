//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{detect_delimiter, Parser, ParserConfig, DEFAULT_SAMPLE_LIMIT};
pub use source::{format_name, DataSource, DataTable, FetchConfig, FetchedBytes, SourceMetadata};
