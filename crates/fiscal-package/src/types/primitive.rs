//! Primitive data types and their value tests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const TRUE_VALUES: &[&str] = &["yes", "y", "true", "t", "1"];
const FALSE_VALUES: &[&str] = &["no", "n", "false", "f", "0"];
const NULL_VALUES: &[&str] = &["", "null", "none", "nil", "nan", "-"];

const GEOJSON_TYPES: &[&str] = &[
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
    "Feature",
    "FeatureCollection",
];

/// A basic data type a raw cell value can be cast to.
///
/// Variants are declared most specific first; that order is the registry
/// order and breaks ties when several types match a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Whole numbers with an optional sign.
    Integer,
    /// Decimal numbers, optionally with exponent.
    Number,
    /// Yes/no style flags.
    Boolean,
    /// Explicit missing-value markers.
    Null,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Time of day.
    Time,
    /// Date with time of day.
    #[serde(rename = "datetime")]
    DateTime,
    /// Longitude/latitude pair.
    #[serde(rename = "geopoint")]
    GeoPoint,
    /// GeoJSON geometry or feature.
    #[serde(rename = "geojson")]
    GeoJson,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
    /// Any text.
    String,
    /// Anything at all.
    Any,
}

impl PrimitiveType {
    /// Every primitive type in registry order.
    pub const ALL: [PrimitiveType; 13] = [
        PrimitiveType::Integer,
        PrimitiveType::Number,
        PrimitiveType::Boolean,
        PrimitiveType::Null,
        PrimitiveType::Date,
        PrimitiveType::Time,
        PrimitiveType::DateTime,
        PrimitiveType::GeoPoint,
        PrimitiveType::GeoJson,
        PrimitiveType::Array,
        PrimitiveType::Object,
        PrimitiveType::String,
        PrimitiveType::Any,
    ];

    /// Stable string identifier.
    pub fn id(&self) -> &'static str {
        match self {
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Null => "null",
            PrimitiveType::Date => "date",
            PrimitiveType::Time => "time",
            PrimitiveType::DateTime => "datetime",
            PrimitiveType::GeoPoint => "geopoint",
            PrimitiveType::GeoJson => "geojson",
            PrimitiveType::Array => "array",
            PrimitiveType::Object => "object",
            PrimitiveType::String => "string",
            PrimitiveType::Any => "any",
        }
    }

    /// Returns true if `value` casts cleanly to this type.
    ///
    /// Total over all inputs: a mismatch is `false`, never a panic.
    pub fn test(&self, value: &str) -> bool {
        let trimmed = value.trim();
        match self {
            PrimitiveType::Integer => INTEGER_PATTERN.is_match(trimmed),
            PrimitiveType::Number => NUMBER_PATTERN.is_match(trimmed),
            PrimitiveType::Boolean => {
                let lower = trimmed.to_lowercase();
                TRUE_VALUES.contains(&lower.as_str()) || FALSE_VALUES.contains(&lower.as_str())
            }
            PrimitiveType::Null => NULL_VALUES.contains(&trimmed.to_lowercase().as_str()),
            PrimitiveType::Date => {
                DATE_PATTERN.is_match(trimmed)
                    && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
            }
            PrimitiveType::Time => TIME_FORMATS
                .iter()
                .any(|fmt| NaiveTime::parse_from_str(trimmed, fmt).is_ok()),
            PrimitiveType::DateTime => {
                DateTime::parse_from_rfc3339(trimmed).is_ok()
                    || DATETIME_FORMATS
                        .iter()
                        .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
            }
            PrimitiveType::GeoPoint => is_geopoint(trimmed),
            PrimitiveType::GeoJson => match parse_json(trimmed) {
                Some(Value::Object(map)) => map
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| GEOJSON_TYPES.contains(&t)),
                _ => false,
            },
            PrimitiveType::Array => matches!(parse_json(trimmed), Some(Value::Array(_))),
            PrimitiveType::Object => matches!(parse_json(trimmed), Some(Value::Object(_))),
            PrimitiveType::String | PrimitiveType::Any => true,
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, PrimitiveType::Integer | PrimitiveType::Number)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            PrimitiveType::DateTime | PrimitiveType::Date | PrimitiveType::Time
        )
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PrimitiveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveType::ALL
            .iter()
            .copied()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown type: {}", s))
    }
}

/// Only strings that look like JSON containers are handed to serde_json.
fn parse_json(value: &str) -> Option<Value> {
    if !(value.starts_with('{') || value.starts_with('[')) {
        return None;
    }
    serde_json::from_str(value).ok()
}

fn is_geopoint(value: &str) -> bool {
    let (lon, lat) = match parse_json(value) {
        Some(Value::Array(items)) if items.len() == 2 => (items[0].as_f64(), items[1].as_f64()),
        Some(Value::Object(map)) => (
            map.get("lon").and_then(Value::as_f64),
            map.get("lat").and_then(Value::as_f64),
        ),
        Some(_) => return false,
        None => {
            let mut parts = value.split(',');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(lon), Some(lat), None) => (parse_coordinate(lon), parse_coordinate(lat)),
                _ => return false,
            }
        }
    };

    match (lon, lat) {
        (Some(lon), Some(lat)) => (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat),
        _ => false,
    }
}

fn parse_coordinate(part: &str) -> Option<f64> {
    let part = part.trim();
    if NUMBER_PATTERN.is_match(part) {
        part.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert!(PrimitiveType::Integer.test("42"));
        assert!(PrimitiveType::Integer.test("-7"));
        assert!(PrimitiveType::Integer.test(" +3 "));
        assert!(!PrimitiveType::Integer.test("4.2"));
        assert!(!PrimitiveType::Integer.test("1,000"));
        assert!(!PrimitiveType::Integer.test(""));
    }

    #[test]
    fn test_number() {
        assert!(PrimitiveType::Number.test("10"));
        assert!(PrimitiveType::Number.test("3.14"));
        assert!(PrimitiveType::Number.test("-.5"));
        assert!(PrimitiveType::Number.test("1e6"));
        assert!(!PrimitiveType::Number.test("abc"));
        assert!(!PrimitiveType::Number.test("."));
    }

    #[test]
    fn test_boolean_and_null() {
        assert!(PrimitiveType::Boolean.test("TRUE"));
        assert!(PrimitiveType::Boolean.test("n"));
        assert!(!PrimitiveType::Boolean.test("maybe"));
        assert!(PrimitiveType::Null.test(""));
        assert!(PrimitiveType::Null.test("None"));
        assert!(!PrimitiveType::Null.test("0"));
    }

    #[test]
    fn test_temporal() {
        assert!(PrimitiveType::Date.test("2024-02-29"));
        assert!(!PrimitiveType::Date.test("2023-02-29"));
        assert!(!PrimitiveType::Date.test("15/01/2024"));
        assert!(PrimitiveType::Time.test("12:30:00"));
        assert!(PrimitiveType::Time.test("08:15"));
        assert!(!PrimitiveType::Time.test("25:00"));
        assert!(PrimitiveType::DateTime.test("2024-01-15T10:00:00Z"));
        assert!(PrimitiveType::DateTime.test("2024-01-15T10:00:00+02:00"));
        assert!(PrimitiveType::DateTime.test("2024-01-15 10:00:00"));
        assert!(!PrimitiveType::DateTime.test("2024-01-15"));
    }

    #[test]
    fn test_json_types() {
        assert!(PrimitiveType::Array.test("[1, 2]"));
        assert!(!PrimitiveType::Array.test("{}"));
        assert!(PrimitiveType::Object.test(r#"{"a": 1}"#));
        assert!(PrimitiveType::GeoJson.test(r#"{"type": "Point", "coordinates": [1, 2]}"#));
        assert!(!PrimitiveType::GeoJson.test(r#"{"type": "Circle"}"#));
    }

    #[test]
    fn test_geopoint() {
        assert!(PrimitiveType::GeoPoint.test("30.5, 50.45"));
        assert!(PrimitiveType::GeoPoint.test("[30.5, 50.45]"));
        assert!(PrimitiveType::GeoPoint.test(r#"{"lon": 30.5, "lat": 50.45}"#));
        assert!(!PrimitiveType::GeoPoint.test("200, 10"));
        assert!(!PrimitiveType::GeoPoint.test("Kyiv"));
    }

    #[test]
    fn test_string_and_any_accept_everything() {
        for value in ["", "x", "ünïcødé", "{"] {
            assert!(PrimitiveType::String.test(value));
            assert!(PrimitiveType::Any.test(value));
        }
    }

    #[test]
    fn test_id_round_trip() {
        for t in PrimitiveType::ALL {
            assert_eq!(t.id().parse::<PrimitiveType>().unwrap(), t);
            assert_eq!(
                serde_json::to_string(&t).unwrap(),
                format!("\"{}\"", t.id())
            );
        }
        assert!("numeric".parse::<PrimitiveType>().is_err());
    }
}
