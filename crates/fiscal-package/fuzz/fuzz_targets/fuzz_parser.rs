//! Fuzz target for the delimited parser and schema inference.
//!
//! Parsing and inference must never panic; malformed input ends in an error.

#![no_main]

use fiscal_package::input::{DataSource, FetchedBytes};
use fiscal_package::SchemaInference;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let source = DataSource::Content {
        name: "fuzz.csv".to_string(),
        bytes: data.to_vec(),
    };
    let fetched = FetchedBytes {
        bytes: data.to_vec(),
        truncated: false,
    };

    if let Ok(inferred) = SchemaInference::new().infer_bytes(&source, &fetched) {
        assert_eq!(inferred.columns.len(), inferred.headers.len());
        assert_eq!(inferred.schema.fields.len(), inferred.headers.len());
    }
});
