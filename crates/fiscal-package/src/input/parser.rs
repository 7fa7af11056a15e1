//! Delimited text parser with delimiter detection and collected parse issues.

use tracing::{debug, warn};

use crate::error::{FiscalError, ParseIssue, ParseIssueCode, Result};
use super::source::DataTable;

/// Delimiters to try when auto-detecting, in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Number of records sampled by default.
pub const DEFAULT_SAMPLE_LIMIT: usize = 1000;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum records to read, header included (None = all).
    pub sample_limit: Option<usize>,
    /// Report rows whose field count differs from the header.
    pub strict_field_count: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT),
            strict_field_count: false,
            quote: b'"',
        }
    }
}

/// Parses delimited tabular data.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse bytes into a table whose first record is the header.
    ///
    /// Blank lines are skipped and reading stops at the sample limit. Every
    /// row-level problem is collected and returned together as
    /// [`FiscalError::Parse`].
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let quote = self.config.quote;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_with_quote(bytes, quote)?,
        };

        let mut records: Vec<Vec<String>> = Vec::new();
        let mut issues: Vec<ParseIssue> = Vec::new();

        // The reader folds everything after an unterminated quote into one
        // field instead of failing, so the quoting is checked up front.
        let scan = scan_records(bytes, delimiter, quote, self.config.sample_limit);
        if let Some(row) = scan.open_quote {
            issues.push(ParseIssue {
                row,
                code: ParseIssueCode::Malformed,
                message: format!("quoted field opened in record {} is never closed", row),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(quote)
            .flexible(true)
            .from_reader(bytes);

        let mut seen = 0usize;
        for result in reader.byte_records() {
            let record = result?;

            if record.len() <= 1 && record.iter().all(|f| f.is_empty()) {
                continue;
            }
            if let Some(limit) = self.config.sample_limit {
                if seen >= limit {
                    break;
                }
            }
            let row = seen;
            seen += 1;

            let mut fields = Vec::with_capacity(record.len());
            let mut valid = true;
            for (col, field) in record.iter().enumerate() {
                match std::str::from_utf8(field) {
                    Ok(text) => fields.push(text.to_string()),
                    Err(e) => {
                        valid = false;
                        issues.push(ParseIssue {
                            row,
                            code: ParseIssueCode::InvalidEncoding,
                            message: format!("field {} is not valid UTF-8: {}", col + 1, e),
                        });
                    }
                }
            }
            if !valid {
                continue;
            }

            if self.config.strict_field_count {
                if let Some(header) = records.first() {
                    if let Some(issue) = field_count_issue(row, header.len(), fields.len()) {
                        issues.push(issue);
                    }
                }
            }

            records.push(fields);
        }

        if !issues.is_empty() {
            issues.sort_by_key(|issue| issue.row);
            warn!(count = issues.len(), "parse issues in source");
            return Err(FiscalError::Parse(issues));
        }
        if records.is_empty() {
            return Err(FiscalError::EmptyData("No records found".to_string()));
        }

        let headers = records.remove(0);
        debug!(
            delimiter = %(delimiter as char).escape_default(),
            columns = headers.len(),
            rows = records.len(),
            "parsed source"
        );
        Ok(DataTable::new(headers, records, delimiter))
    }
}

fn field_count_issue(row: usize, expected: usize, actual: usize) -> Option<ParseIssue> {
    let code = if actual < expected {
        ParseIssueCode::TooFewFields
    } else if actual > expected {
        ParseIssueCode::TooManyFields
    } else {
        return None;
    };
    Some(ParseIssue {
        row,
        code,
        message: format!("expected {} fields but found {}", expected, actual),
    })
}

/// Records examined when detecting the delimiter.
const DETECT_RECORDS: usize = 10;

/// Detect the delimiter from the first few non-blank records.
///
/// Records are split the way the reader splits them, so line breaks inside
/// quoted fields do not start a new record. Falls back to comma when no
/// candidate appears in the header, which covers single-column sources.
pub fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    detect_with_quote(bytes, b'"')
}

fn detect_with_quote(bytes: &[u8], quote: u8) -> Result<u8> {
    let mut best: Option<((usize, usize), u8)> = None;
    let mut any_records = false;

    for &delim in DELIMITERS {
        let counts = scan_records(bytes, delim, quote, Some(DETECT_RECORDS)).delimiter_counts;
        let Some(&header) = counts.first() else {
            continue;
        };
        any_records = true;
        if header == 0 {
            continue;
        }

        // Share of records whose field count agrees with the header, then
        // the number of columns. Earlier candidates win ties.
        let agreeing = counts.iter().filter(|&&c| c == header).count();
        let score = (agreeing * 1000 / counts.len(), header);
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, delim));
        }
    }

    if !any_records {
        return Err(FiscalError::EmptyData("No lines to analyze".to_string()));
    }
    Ok(best.map_or(b',', |(_, delim)| delim))
}

/// Result of scanning raw bytes record by record.
#[derive(Debug, Default, PartialEq, Eq)]
struct RecordScan {
    /// Delimiters outside quotes, per non-blank record.
    delimiter_counts: Vec<usize>,
    /// Record in which a quoted field opens and never closes.
    open_quote: Option<usize>,
}

/// Split `bytes` into records, honoring quoted fields.
///
/// A quote opens a quoted field only at the start of a field, and a doubled
/// quote inside one is an escaped quote. Stops after `max_records`
/// non-blank records.
fn scan_records(bytes: &[u8], delimiter: u8, quote: u8, max_records: Option<usize>) -> RecordScan {
    let mut scan = RecordScan::default();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut has_content = false;
    let mut count = 0usize;
    let mut open_at = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if max_records.is_some_and(|max| scan.delimiter_counts.len() >= max) {
            return scan;
        }
        let b = bytes[i];
        if in_quotes {
            if b == quote {
                if bytes.get(i + 1) == Some(&quote) {
                    i += 2;
                    continue;
                }
                in_quotes = false;
            }
        } else if b == b'\n' || b == b'\r' {
            if has_content {
                scan.delimiter_counts.push(count);
            }
            count = 0;
            has_content = false;
            field_start = true;
        } else if b == delimiter {
            count += 1;
            has_content = true;
            field_start = true;
        } else {
            if b == quote && field_start {
                in_quotes = true;
                open_at = scan.delimiter_counts.len();
            }
            has_content = true;
            field_start = false;
        }
        i += 1;
    }

    if has_content {
        scan.delimiter_counts.push(count);
    }
    if in_quotes {
        scan.open_quote = Some(open_at);
    }
    scan
}
