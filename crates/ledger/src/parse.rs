//! Field-level parsing shared by both ledgers.
//!
//! Every helper takes the raw cell text and returns either a typed value or a
//! human-readable reason, which the row loaders wrap into a `LedgerError`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

/// Delimiter used to join asset names inside a single cell.
pub const ASSET_DELIMITER: &str = ", ";

/// Tokens that stand for "no value" in exported spreadsheets.
const PLACEHOLDERS: [&str; 5] = ["nan", "none", "null", "n/a", "na"];

/// Returns true for empty cells and the usual "no value" spellings.
pub fn is_placeholder(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Largest magnitude accepted for any numeric cell. Sums over a season's
/// ledgers stay far inside the `Decimal` range below it.
pub const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// Trims a cell and treats only an empty one as absent.
///
/// Used for names, where a manager may legitimately be called `NA`.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Treats placeholder cells as absent.
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !is_placeholder(value))
}

/// Splits a joined asset cell into an ordered list of names.
///
/// Empty tokens and placeholders are dropped; the remaining order is kept.
pub fn parse_assets(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = present(raw) else {
        return Vec::new();
    };
    raw.split(ASSET_DELIMITER)
        .map(str::trim)
        .filter(|token| !is_placeholder(token))
        .map(str::to_string)
        .collect()
}

/// Parses a decimal cell. Placeholders yield `Ok(None)`.
pub fn parse_decimal(raw: Option<&str>) -> Result<Option<Decimal>, String> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| "not a number".to_string())?;
    if value.abs() > Decimal::from(MAX_MAGNITUDE) {
        return Err(format!("magnitude exceeds {MAX_MAGNITUDE}"));
    }
    Ok(Some(value))
}

/// Parses a non-negative valuation; a placeholder is filled with zero.
pub fn parse_valuation(raw: Option<&str>) -> Result<Decimal, String> {
    let value = parse_decimal(raw)?.unwrap_or(Decimal::ZERO);
    if value.is_sign_negative() && !value.is_zero() {
        return Err("valuations must not be negative".to_string());
    }
    Ok(value)
}

/// Parses a non-negative whole number. Spreadsheet exports often write
/// integers as `4.0`, so an integral decimal is accepted too.
pub fn parse_count(raw: &str) -> Result<u32, String> {
    let value = parse_decimal(Some(raw))?.ok_or_else(|| "empty".to_string())?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err("must not be negative".to_string());
    }
    if value.fract() != Decimal::ZERO {
        return Err("must be a whole number".to_string());
    }
    value.to_u32().ok_or_else(|| "out of range".to_string())
}

pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Ok(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.fff]` and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(timestamp.date());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    Err("expected a date such as 2025-10-14".to_string())
}
