//! Conversions applied at the export boundary.

use crate::error::ExportError;
use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Truncates a value toward zero. Monetary figures are never rounded half-up.
pub fn whole(field: &'static str, value: Decimal) -> Result<i64, ExportError> {
    value
        .trunc()
        .to_i64()
        .ok_or(ExportError::OutOfRange { field, value })
}

/// Keeps one decimal place, for per-trade averages.
pub fn one_decimal(value: Decimal) -> f64 {
    value.round_dp(1).to_f64().unwrap_or_default()
}

/// `1234567` -> `"1,234,567"`.
pub fn grouped(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Like `grouped`, with an explicit `+` on positive values.
pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", grouped(value))
    } else {
        grouped(value)
    }
}

/// Joins asset names the way the ledger stores them; `"N/A"` for none.
pub fn join_assets(assets: &[String]) -> String {
    if assets.is_empty() {
        "N/A".to_string()
    } else {
        assets.join(", ")
    }
}
