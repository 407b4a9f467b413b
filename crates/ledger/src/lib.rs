//! # GMOTY Ledger Crate
//!
//! Loads the two tabular inputs of a report run into typed records.
//!
//! ## Architectural Principles
//!
//! - **Boundary Adapter:** All knowledge of the CSV layout lives here. Column
//!   names, list delimiters, placeholder tokens and default-filling of missing
//!   values never leak past this crate.
//! - **Fail Closed:** A missing column, a missing required field or a
//!   malformed value aborts the load with a `LedgerError` naming the row.
//!
//! ## Public API
//!
//! - `load_trade_ledger` / `trades_from_reader`: the trade ledger.
//! - `load_team_ledger` / `teams_from_reader`: the team ledger.
//! - `LedgerError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod parse;
pub mod teams;
pub mod trades;

// Re-export the key components to create a clean, public-facing API.
pub use error::LedgerError;
pub use teams::{load_team_ledger, teams_from_reader};
pub use trades::{load_trade_ledger, trades_from_reader};

use std::fs::File;
use std::path::Path;

/// Opens a ledger file, mapping any I/O failure to `LedgerError::MissingInput`.
pub(crate) fn open_ledger(path: &Path) -> Result<File, LedgerError> {
    File::open(path).map_err(|source| LedgerError::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Verifies that every required column is present in the header row.
pub(crate) fn require_columns(
    headers: &csv::StringRecord,
    ledger: &'static str,
    columns: &[&'static str],
) -> Result<(), LedgerError> {
    for column in columns {
        if !headers.iter().any(|header| header == *column) {
            return Err(LedgerError::MissingColumn { ledger, column });
        }
    }
    Ok(())
}

pub(crate) fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}
