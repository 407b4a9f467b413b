use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Input ledger '{}' is missing or unreadable: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The {ledger} ledger has no '{column}' column")]
    MissingColumn {
        ledger: &'static str,
        column: &'static str,
    },

    #[error("Row {row} of the {ledger} ledger has no value for required field '{field}'")]
    MissingField {
        ledger: &'static str,
        row: usize,
        field: &'static str,
    },

    #[error("Invalid value '{value}' for '{field}' in row {row} ({record}): {reason}")]
    InvalidValue {
        row: usize,
        record: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Manager '{0}' appears more than once in the team ledger")]
    DuplicateManager(String),

    #[error("Invalid record in row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: core_types::CoreError,
    },

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),
}
