//! Data source abstraction and metadata.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::error::{FiscalError, Result};
use crate::naming::{name_from_path, name_from_url, to_slug, undecorate_proxy_url};

/// Where tabular data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Remote file, possibly wrapped in the proxy endpoint.
    Url(String),
    /// Local file.
    Path(PathBuf),
    /// Uploaded or in-memory content with a display name.
    Content { name: String, bytes: Vec<u8> },
}

impl DataSource {
    /// Interpret a user-supplied location: `http(s)://` and proxy URLs are
    /// remote, anything else is a local path.
    pub fn from_location(location: &str) -> Self {
        let undecorated = undecorate_proxy_url(location);
        if undecorated.starts_with("http://") || undecorated.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }

    /// In-memory text content.
    pub fn content(name: impl Into<String>, text: impl Into<String>) -> Self {
        DataSource::Content {
            name: name.into(),
            bytes: text.into().into_bytes(),
        }
    }

    /// Human-readable location.
    pub fn location(&self) -> String {
        match self {
            DataSource::Url(url) => undecorate_proxy_url(url),
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Content { name, .. } => name.clone(),
        }
    }

    /// Resource name derived from the location.
    pub fn resource_name(&self) -> String {
        match self {
            DataSource::Url(url) => name_from_url(url),
            DataSource::Path(path) => name_from_path(&path.to_string_lossy()),
            DataSource::Content { name, .. } => name_from_path(name),
        }
    }

    /// Read the raw bytes of this source.
    ///
    /// Issues exactly one request or file read, never retries, and stops
    /// reading remote bodies after `config.max_bytes`.
    #[instrument(skip(self, client, config), fields(location = %self.location()))]
    pub async fn read(&self, client: &Client, config: &FetchConfig) -> Result<FetchedBytes> {
        match self {
            DataSource::Url(url) => fetch_url(&undecorate_proxy_url(url), client, config).await,
            DataSource::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| FiscalError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                debug!(bytes = bytes.len(), "read local file");
                Ok(FetchedBytes {
                    bytes,
                    truncated: false,
                })
            }
            DataSource::Content { bytes, .. } => Ok(FetchedBytes {
                bytes: bytes.clone(),
                truncated: false,
            }),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}

/// Limits applied when reading a source.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout for remote sources.
    pub timeout: Duration,
    /// Maximum number of body bytes read from a remote source.
    pub max_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_bytes: 32 * 1024 * 1024,
        }
    }
}

/// Raw bytes read from a source.
#[derive(Debug, Clone)]
pub struct FetchedBytes {
    pub bytes: Vec<u8>,
    /// True when the body was longer than `max_bytes` and was cut.
    pub truncated: bool,
}

async fn fetch_url(url: &str, client: &Client, config: &FetchConfig) -> Result<FetchedBytes> {
    let mut response = client.get(url).timeout(config.timeout).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FiscalError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut bytes = Vec::new();
    let mut truncated = false;
    while let Some(chunk) = response.chunk().await? {
        bytes.extend_from_slice(&chunk);
        // A body of exactly `max_bytes` is complete; only bytes past it truncate.
        if bytes.len() > config.max_bytes {
            truncated = true;
            break;
        }
    }

    if truncated {
        bytes.truncate(config.max_bytes);
        // Keep whole lines only.
        if let Some(last_newline) = bytes.iter().rposition(|&b| b == b'\n') {
            bytes.truncate(last_newline + 1);
        }
        warn!(url, max_bytes = config.max_bytes, "source truncated");
    }

    debug!(url, bytes = bytes.len(), "fetched remote source");
    Ok(FetchedBytes { bytes, truncated })
}

/// Metadata about a parsed source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Resource name (slug).
    pub name: String,
    /// Location the data was read from.
    pub location: String,
    /// SHA-256 hash of the bytes read.
    pub hash: String,
    /// Number of bytes read.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Delimiter used for parsing.
    pub delimiter: char,
    /// Number of records parsed, header included.
    pub record_count: usize,
    /// Whether the read stopped at the byte limit.
    pub truncated: bool,
    /// When the source was read.
    pub fetched_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a source that has been read and parsed.
    pub fn new(
        source: &DataSource,
        fetched: &FetchedBytes,
        delimiter: u8,
        record_count: usize,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&fetched.bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let name = match source.resource_name() {
            name if name.is_empty() => to_slug(&source.location()),
            name => name,
        };

        Self {
            name,
            location: source.location(),
            hash,
            size_bytes: fetched.bytes.len() as u64,
            format: format_name(delimiter).to_string(),
            delimiter: delimiter as char,
            record_count,
            truncated: fetched.truncated,
            fetched_at: Utc::now(),
        }
    }
}

/// Format name for a delimiter.
pub fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Parsed tabular data: the first record as headers, the rest as rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data in source order. Rows may be shorter or longer than the header.
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index; missing cells read as `""`.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location() {
        assert!(matches!(
            DataSource::from_location("https://x.test/a.csv"),
            DataSource::Url(_)
        ));
        assert!(matches!(
            DataSource::from_location("/proxy?url=http%3A%2F%2Fx.test%2Fa.csv"),
            DataSource::Url(_)
        ));
        assert!(matches!(
            DataSource::from_location("data/budget.csv"),
            DataSource::Path(_)
        ));
    }

    #[test]
    fn test_resource_name() {
        let source = DataSource::from_location("/proxy?url=http%3A%2F%2Fx.test%2FSpending%202024.csv");
        assert_eq!(source.location(), "http://x.test/Spending 2024.csv");
        assert_eq!(source.resource_name(), "spending-2024");
        assert_eq!(DataSource::content("Upload.CSV", "a").resource_name(), "upload");
    }

    #[test]
    fn test_metadata_hash_and_format() {
        let source = DataSource::content("budget.csv", "a;b\n1;2\n");
        let fetched = FetchedBytes {
            bytes: b"a;b\n1;2\n".to_vec(),
            truncated: false,
        };
        let metadata = SourceMetadata::new(&source, &fetched, b';', 2);
        assert!(metadata.hash.starts_with("sha256:"));
        assert_eq!(metadata.hash.len(), "sha256:".len() + 64);
        assert_eq!(metadata.format, "csv-semicolon");
        assert_eq!(metadata.name, "budget");
        assert_eq!(metadata.size_bytes, 8);
    }

    #[test]
    fn test_column_values_pads_missing_cells() {
        let table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
            b',',
        );
        let values: Vec<&str> = table.column_values(1).collect();
        assert_eq!(values, vec!["2", ""]);
        assert_eq!(table.column_by_name("a"), Some(vec!["1", "3"]));
        assert_eq!(table.get(1, 1), None);
    }

    #[tokio::test]
    async fn test_read_content_and_missing_path() {
        let client = Client::new();
        let config = FetchConfig::default();

        let fetched = DataSource::content("x.csv", "a,b\n")
            .read(&client, &config)
            .await
            .unwrap();
        assert_eq!(fetched.bytes, b"a,b\n");

        let err = DataSource::Path(PathBuf::from("/definitely/not/here.csv"))
            .read(&client, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, FiscalError::Io { .. }));
    }
}
