use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Value {value} for '{field}' does not fit in a 64-bit integer")]
    OutOfRange { field: &'static str, value: Decimal },

    #[error("Failed to serialize the season summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
