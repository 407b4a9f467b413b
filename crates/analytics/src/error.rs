use core_types::ValueField;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid value {value} for '{field}' in trade #{index} by '{manager}': valuations must not be negative")]
    InvalidValue {
        index: usize,
        manager: String,
        field: ValueField,
        value: Decimal,
    },

    #[error("Trade #{index} by '{manager}' overflows when computing {metric}")]
    Overflow {
        index: usize,
        manager: String,
        metric: &'static str,
    },
}
