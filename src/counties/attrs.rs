//! Fallback-chain extraction from raw GIS attribute maps.
//!
//! Canonical fields are mapped from an ordered list of raw source fields; the
//! first present, non-empty value wins. Missing everything yields the
//! documented default: empty string for text, zero for money/area/counts.
//! Layers are inconsistent about value types (numbers arrive as JSON numbers
//! or as strings, text occasionally as numbers), so every accessor coerces.

use serde_json::Value;

use super::query::Attributes;

/// First non-empty text value among `keys`, else empty string
pub(crate) fn text(attrs: &Attributes, keys: &[&str]) -> String {
    text_or(attrs, keys, "")
}

/// First non-empty text value among `keys`, else `default`
pub(crate) fn text_or(attrs: &Attributes, keys: &[&str], default: &str) -> String {
    for key in keys {
        match attrs.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    default.to_string()
}

/// First numeric value among `keys`, else 0. Numeric strings are accepted.
pub(crate) fn number(attrs: &Attributes, keys: &[&str]) -> f64 {
    for key in keys {
        match attrs.get(*key) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64() {
                    return v;
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<f64>() {
                    return v;
                }
            }
            _ => {}
        }
    }
    0.0
}

/// First integer value among `keys`, else 0
pub(crate) fn integer(attrs: &Attributes, keys: &[&str]) -> i64 {
    number(attrs, keys) as i64
}

/// Leading numeric token of a string like "2.50 AC".
///
/// Tolerates a missing units suffix and non-numeric garbage by returning 0.
pub(crate) fn leading_number(raw: &str) -> f64 {
    raw.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(0.0)
}
