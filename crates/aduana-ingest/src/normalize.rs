//! Field repair and normalization
//!
//! Each function returns `None` for a value that cannot be repaired; the
//! parser drops rows with any such field.

use aduana_common::lookup;
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// Reconstruct a declaration date from its compact numeric form.
///
/// The raw value is coerced to an integer (non-numeric values become 0),
/// left-padded with zeros to 8 characters, and parsed as `DDMMYYYY`. Leading
/// zeros lost upstream (`1012024` for 1 January 2024) are restored by the
/// padding.
pub fn parse_declaration_date(raw: &str) -> Option<NaiveDate> {
    let value = coerce_integer(raw);
    if value < 0 {
        return None;
    }

    let padded = format!("{:08}", value);
    if padded.len() != 8 {
        return None;
    }

    NaiveDate::parse_from_str(&padded, "%d%m%Y").ok()
}

/// Year and month (1-12) of a declaration date
pub fn year_month(date: NaiveDate) -> (i32, i32) {
    (date.year(), date.month() as i32)
}

/// Integer coercion for the date column: integers as-is, finite decimals
/// truncated toward zero, anything else 0.
fn coerce_integer(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }

    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() < 1e15 => value.trunc() as i64,
        _ => 0,
    }
}

/// Region display name for a raw region code
pub fn region_name(raw: &str) -> String {
    lookup::region_name(raw).to_string()
}

/// Strip punctuation (thousands separators, dots between HS groups) and
/// whitespace from a product code.
///
/// Digit order and leading zeros are preserved. Returns `None` if nothing is
/// left or any non-digit character remains.
pub fn normalize_product_code(raw: &str) -> Option<String> {
    let code: String = raw
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
        .collect();

    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(code)
}

/// Parse a decimal-comma FOB value such as `1000,50`
pub fn parse_fob_value(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    BigDecimal::from_str(&trimmed.replace(',', ".")).ok()
}
