//! Locale-formatted numeric literal parsing.
//!
//! Source tables format numbers the Austrian way: "." groups thousands and
//! "," separates decimals ("44.992.965,36"). The bare "-" is the explicit
//! null sentinel. Parsing always yields `Decimal` - integer coercion is a
//! separate, later step, so no precision decision is taken here.

use regex::Regex;
use std::sync::OnceLock;

use crate::app::models::FieldValue;
use crate::constants::NULL_SENTINEL;
use crate::error::{Error, Result};

/// Grouped literal: 1-3 leading digits, dot-separated 3-digit groups,
/// optional comma decimal part
fn grouped_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{1,3}(?:\.\d{3})*(?:,\d+)?$").expect("valid regex"))
}

/// Ungrouped digit run with optional comma decimal part. Covers tokens the
/// extractor re-joined after a mid-number split, which lose their grouping.
fn plain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(?:,\d+)?$").expect("valid regex"))
}

/// Parse a numeric token that may legitimately be absent.
///
/// `"-"` and the empty string become `Null`. Use [`parse_decimal`] for
/// columns where an empty cell is a table defect.
pub fn parse_nullable(token: &str) -> Result<FieldValue> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == NULL_SENTINEL {
        return Ok(FieldValue::Null);
    }
    parse_decimal(trimmed)
}

/// Parse a numeric token into a `Decimal` value.
///
/// `"-"` becomes `Null`; the empty string is an error because a required
/// numeric cell was blank; anything that is not a locale-formatted number
/// is `UnrecognizedNumber`.
pub fn parse_decimal(token: &str) -> Result<FieldValue> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyNumber);
    }
    if trimmed == NULL_SENTINEL {
        return Ok(FieldValue::Null);
    }
    if !grouped_pattern().is_match(trimmed) && !plain_pattern().is_match(trimmed) {
        return Err(Error::UnrecognizedNumber {
            token: token.to_string(),
        });
    }

    let normalized = trimmed.replace('.', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .map(FieldValue::Decimal)
        .map_err(|_| Error::UnrecognizedNumber {
            token: token.to_string(),
        })
}

/// Canonical rendering of a parsed value: grouping removed, "." as decimal
/// point. Round-trips with [`parse_decimal`] for all valid literals.
pub fn format_decimal(value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(v) => v.to_string(),
        FieldValue::Decimal(v) => format!("{}", v),
        FieldValue::Text(v) => v.clone(),
        FieldValue::Null => String::new(),
    }
}
