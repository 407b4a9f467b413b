use crate::error::LedgerError;
use crate::parse::{non_blank, parse_assets, parse_date, parse_valuation, present};
use crate::{csv_reader, open_ledger, require_columns};
use core_types::{TradeRecord, TradeValues};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

const LEDGER: &str = "trade";

/// Columns the trade ledger must carry. Values may be blank, columns may not.
pub const TRADE_COLUMNS: [&str; 8] = [
    "manager",
    "trade_date",
    "added_players",
    "dropped_players",
    "added_value_then",
    "added_value_now",
    "dropped_value_then",
    "dropped_value_now",
];

/// A trade ledger row exactly as it appears in the file.
#[derive(Debug, Deserialize)]
struct RawTradeRow {
    manager: Option<String>,
    trade_date: Option<String>,
    added_players: Option<String>,
    dropped_players: Option<String>,
    added_value_then: Option<String>,
    added_value_now: Option<String>,
    dropped_value_then: Option<String>,
    dropped_value_now: Option<String>,
}

impl RawTradeRow {
    /// Converts the raw row into a typed record.
    ///
    /// This is the single place where blank valuations become zero.
    fn into_record(self, row: usize) -> Result<TradeRecord, LedgerError> {
        let manager = non_blank(self.manager.as_deref())
            .ok_or(LedgerError::MissingField {
                ledger: LEDGER,
                row,
                field: "manager",
            })?
            .to_string();

        let raw_date = present(self.trade_date.as_deref()).ok_or(LedgerError::MissingField {
            ledger: LEDGER,
            row,
            field: "trade_date",
        })?;
        let trade_date = parse_date(raw_date).map_err(|reason| LedgerError::InvalidValue {
            row,
            record: manager.clone(),
            field: "trade_date",
            value: raw_date.to_string(),
            reason,
        })?;

        let record = format!("{manager} on {trade_date}");
        let valuation = |field: &'static str, raw: Option<String>| {
            parse_valuation(raw.as_deref()).map_err(|reason| LedgerError::InvalidValue {
                row,
                record: record.clone(),
                field,
                value: raw.clone().unwrap_or_default(),
                reason,
            })
        };

        let values = TradeValues::new(
            valuation("added_value_then", self.added_value_then)?,
            valuation("added_value_now", self.added_value_now)?,
            valuation("dropped_value_then", self.dropped_value_then)?,
            valuation("dropped_value_now", self.dropped_value_now)?,
        );

        TradeRecord::new(
            manager,
            trade_date,
            parse_assets(self.added_players.as_deref()),
            parse_assets(self.dropped_players.as_deref()),
            values,
        )
        .map_err(|source| LedgerError::InvalidRecord { row, source })
    }
}

/// Loads the trade ledger from a CSV file.
pub fn load_trade_ledger(path: &Path) -> Result<Vec<TradeRecord>, LedgerError> {
    let file = open_ledger(path)?;
    let trades = trades_from_reader(file)?;
    tracing::info!(path = %path.display(), rows = trades.len(), "Trade ledger loaded.");
    Ok(trades)
}

/// Parses trade ledger CSV from any reader, preserving row order.
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn trades_from_reader<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LedgerError> {
    let mut reader = csv_reader(reader);
    require_columns(reader.headers()?, LEDGER, &TRADE_COLUMNS)?;

    let mut trades = Vec::new();
    for (index, result) in reader.deserialize::<RawTradeRow>().enumerate() {
        let row = index + 1;
        let raw = result?;
        let trade = raw.into_record(row)?;
        tracing::trace!(row, manager = %trade.manager, "Parsed trade row.");
        trades.push(trade);
    }
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const HEADER: &str = "manager,trade_date,added_players,dropped_players,added_value_then,added_value_now,dropped_value_then,dropped_value_now";

    fn parse(body: &str) -> Result<Vec<TradeRecord>, LedgerError> {
        trades_from_reader(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn parses_rows_in_order() {
        let trades = parse(
            "Dzel45,2025-09-30,\"Puka Nacua, 2026 Round 1\",Davante Adams,5000,7000,4000,3000\n\
             elite,2025-10-02 12:00:00,Davante Adams,\"Puka Nacua, 2026 Round 1\",4000,3000,5000,7000\n",
        )
        .unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].manager, "Dzel45");
        assert_eq!(
            trades[0].added_assets,
            vec!["Puka Nacua".to_string(), "2026 Round 1".to_string()]
        );
        assert_eq!(trades[0].values.added_now, dec!(7000));
        assert_eq!(
            trades[1].trade_date,
            NaiveDate::from_ymd_opt(2025, 10, 2).unwrap()
        );
    }

    #[test]
    fn blank_values_become_zero() {
        let trades = parse("elite,2025-10-02,Player A,,1200,,nan,\n").unwrap();
        let values = trades[0].values;
        assert_eq!(values.added_then, dec!(1200));
        assert_eq!(values.added_now, Decimal::ZERO);
        assert_eq!(values.dropped_then, Decimal::ZERO);
        assert_eq!(values.dropped_now, Decimal::ZERO);
        assert!(trades[0].dropped_assets.is_empty());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = format!("{HEADER},note\nelite,2025-10-02,Player A,Player B,1,2,3,4,hello\n");
        let trades = trades_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(trades.len(), 1);
    }

    #[test]
    fn missing_column_is_reported_before_rows() {
        let csv = "manager,trade_date,added_players,dropped_players,added_value_then,added_value_now,dropped_value_then\n";
        let err = trades_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MissingColumn {
                column: "dropped_value_now",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_value_names_the_record() {
        let err = parse("elite,2025-10-02,Player A,Player B,1,lots,3,4\n").unwrap_err();
        match err {
            LedgerError::InvalidValue {
                row,
                record,
                field,
                value,
                ..
            } => {
                assert_eq!(row, 1);
                assert_eq!(record, "elite on 2025-10-02");
                assert_eq!(field, "added_value_now");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_value_fails_closed() {
        let err = parse("elite,2025-10-02,Player A,Player B,1,2,-3,4\n").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidValue {
                field: "dropped_value_then",
                ..
            }
        ));
    }

    #[test]
    fn missing_manager_is_rejected() {
        let err = parse(",2025-10-02,Player A,Player B,1,2,3,4\n").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MissingField {
                field: "manager",
                row: 1,
                ..
            }
        ));
    }

    #[test]
    fn value_beyond_the_ceiling_fails_closed() {
        let err = parse(
            "elite,2025-10-02,Player A,Player B,0,70000000000000000000000000000,70000000000000000000000000000,0\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidValue {
                row: 1,
                field: "added_value_now",
                ..
            }
        ));
    }

    #[test]
    fn manager_named_like_a_placeholder_is_kept() {
        let trades = parse("NA,2025-10-02,Player A,Player B,1,2,3,4\n").unwrap();
        assert_eq!(trades[0].manager, "NA");
    }

    #[test]
    fn row_without_assets_is_rejected() {
        let err = parse("elite,2025-10-02,nan,,1,2,3,4\n").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn header_only_file_is_an_empty_ledger() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "elite,2025-10-02,Player A,Player B,1,2,3,4").unwrap();

        let trades = load_trade_ledger(file.path()).unwrap();
        assert_eq!(trades.len(), 1);
    }

    #[test]
    fn absent_file_is_missing_input() {
        let err = load_trade_ledger(Path::new("/no/such/trades.csv")).unwrap_err();
        assert!(matches!(err, LedgerError::MissingInput { .. }));
    }
}
