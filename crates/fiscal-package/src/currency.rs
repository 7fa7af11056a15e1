//! Currency reference data.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FiscalError, Result};

/// Codes preferred as the default currency, in order.
const PREFERRED_CODES: [&str; 2] = ["USD", "EUR"];

/// An ISO 4217 currency entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Any further fields of the reference entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parse a JSON list of currencies.
pub fn currencies_from_json(json: &str) -> Result<Vec<Currency>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON list of currencies from a file.
pub fn load_currencies(path: impl AsRef<Path>) -> Result<Vec<Currency>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| FiscalError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    currencies_from_json(&json)
}

/// First of USD, EUR or the list's first code that is present.
pub fn default_currency(currencies: &[Currency]) -> Option<&Currency> {
    let first = currencies.first()?;
    PREFERRED_CODES
        .iter()
        .copied()
        .chain(std::iter::once(first.code.as_str()))
        .find_map(|code| currencies.iter().find(|c| c.code == code))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENCIES: &str = r#"[
        {"code": "AED", "name": "UAE Dirham", "number": "784"},
        {"code": "EUR", "name": "Euro", "symbol": "€"},
        {"code": "USD", "name": "US Dollar", "symbol": "$"}
    ]"#;

    #[test]
    fn test_parse_keeps_extra_fields() {
        let currencies = currencies_from_json(CURRENCIES).unwrap();
        assert_eq!(currencies.len(), 3);
        assert_eq!(currencies[0].extra["number"], "784");
        assert_eq!(currencies[0].symbol, None);
        assert_eq!(currencies[1].symbol.as_deref(), Some("€"));
    }

    #[test]
    fn test_default_prefers_usd_then_eur_then_first() {
        let currencies = currencies_from_json(CURRENCIES).unwrap();
        assert_eq!(default_currency(&currencies).unwrap().code, "USD");

        let without_usd: Vec<Currency> = currencies.iter().filter(|c| c.code != "USD").cloned().collect();
        assert_eq!(default_currency(&without_usd).unwrap().code, "EUR");

        let only_aed = vec![currencies[0].clone()];
        assert_eq!(default_currency(&only_aed).unwrap().code, "AED");

        assert!(default_currency(&[]).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iso4217.json");
        std::fs::write(&path, CURRENCIES).unwrap();
        assert_eq!(load_currencies(&path).unwrap().len(), 3);
        assert!(matches!(
            load_currencies(dir.path().join("missing.json")),
            Err(FiscalError::Io { .. })
        ));
    }
}
