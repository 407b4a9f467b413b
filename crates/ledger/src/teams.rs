use crate::error::LedgerError;
use crate::parse::{non_blank, parse_bool, parse_count, parse_decimal, present};
use crate::{csv_reader, open_ledger, require_columns};
use core_types::ManagerRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const LEDGER: &str = "team";

pub const TEAM_COLUMNS: [&str; 8] = [
    "manager",
    "wins",
    "made_playoffs",
    "trade_count",
    "total_trade_value_gained",
    "avg_trade_performance",
    "total_change",
    "gmoty_score",
];

#[derive(Debug, Deserialize)]
struct RawManagerRow {
    manager: Option<String>,
    wins: Option<String>,
    made_playoffs: Option<String>,
    trade_count: Option<String>,
    total_trade_value_gained: Option<String>,
    avg_trade_performance: Option<String>,
    total_change: Option<String>,
    gmoty_score: Option<String>,
}

impl RawManagerRow {
    fn into_record(self, row: usize) -> Result<ManagerRecord, LedgerError> {
        let manager = non_blank(self.manager.as_deref())
            .ok_or(LedgerError::MissingField {
                ledger: LEDGER,
                row,
                field: "manager",
            })?
            .to_string();

        let invalid = |field: &'static str, value: &str, reason: String| {
            LedgerError::InvalidValue {
                row,
                record: manager.clone(),
                field,
                value: value.to_string(),
                reason,
            }
        };
        let decimal = |field: &'static str, raw: &Option<String>| {
            parse_decimal(raw.as_deref())
                .map_err(|reason| invalid(field, raw.as_deref().unwrap_or_default(), reason))
        };

        let wins_raw = required(&self.wins, row, "wins")?;
        let wins = parse_count(wins_raw).map_err(|reason| invalid("wins", wins_raw, reason))?;

        let playoffs_raw = required(&self.made_playoffs, row, "made_playoffs")?;
        let made_playoffs = parse_bool(playoffs_raw)
            .map_err(|reason| invalid("made_playoffs", playoffs_raw, reason))?;

        let count_raw = required(&self.trade_count, row, "trade_count")?;
        let trade_count =
            parse_count(count_raw).map_err(|reason| invalid("trade_count", count_raw, reason))?;

        required(&self.total_change, row, "total_change")?;
        required(&self.gmoty_score, row, "gmoty_score")?;

        Ok(ManagerRecord {
            wins,
            made_playoffs,
            trade_count,
            total_trade_value_gained: decimal(
                "total_trade_value_gained",
                &self.total_trade_value_gained,
            )?
            .unwrap_or(Decimal::ZERO),
            avg_trade_performance: decimal("avg_trade_performance", &self.avg_trade_performance)?,
            total_change: decimal("total_change", &self.total_change)?.unwrap_or(Decimal::ZERO),
            gmoty_score: decimal("gmoty_score", &self.gmoty_score)?.unwrap_or(Decimal::ZERO),
            manager,
        })
    }
}

fn required<'a>(
    raw: &'a Option<String>,
    row: usize,
    field: &'static str,
) -> Result<&'a str, LedgerError> {
    present(raw.as_deref()).ok_or(LedgerError::MissingField {
        ledger: LEDGER,
        row,
        field,
    })
}

/// Loads the team ledger from a CSV file.
pub fn load_team_ledger(path: &Path) -> Result<Vec<ManagerRecord>, LedgerError> {
    let file = open_ledger(path)?;
    let managers = teams_from_reader(file)?;
    tracing::info!(path = %path.display(), rows = managers.len(), "Team ledger loaded.");
    Ok(managers)
}

/// Parses team ledger CSV from any reader, preserving row (rank) order.
pub fn teams_from_reader<R: Read>(reader: R) -> Result<Vec<ManagerRecord>, LedgerError> {
    let mut reader = csv_reader(reader);
    require_columns(reader.headers()?, LEDGER, &TEAM_COLUMNS)?;

    let mut seen = HashSet::new();
    let mut managers = Vec::new();
    for (index, result) in reader.deserialize::<RawManagerRow>().enumerate() {
        let record = result?.into_record(index + 1)?;
        if !seen.insert(record.manager.clone()) {
            return Err(LedgerError::DuplicateManager(record.manager));
        }
        managers.push(record);
    }
    Ok(managers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "manager,wins,made_playoffs,trade_count,total_trade_value_gained,avg_trade_performance,total_change,gmoty_score";

    fn parse(body: &str) -> Result<Vec<ManagerRecord>, LedgerError> {
        teams_from_reader(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn parses_team_rows() {
        let managers = parse(
            "PTexas,9,True,0,0,,-38000,412.5\n\
             Dzel45,8.0,true,4,5200,1300,-12000,380\n",
        )
        .unwrap();

        assert_eq!(managers.len(), 2);
        assert_eq!(managers[0].manager, "PTexas");
        assert!(managers[0].made_playoffs);
        assert_eq!(managers[0].avg_trade_performance, None);
        assert_eq!(managers[0].total_change, dec!(-38000));
        assert_eq!(managers[1].wins, 8);
        assert_eq!(managers[1].trade_count, 4);
        assert_eq!(managers[1].avg_trade_performance, Some(dec!(1300)));
    }

    #[test]
    fn season_deltas_may_be_negative() {
        let managers = parse("elite,3,False,2,-800,-400,-53000,120\n").unwrap();
        assert_eq!(managers[0].total_trade_value_gained, dec!(-800));
    }

    #[test]
    fn missing_score_is_rejected() {
        let err = parse("elite,3,False,2,-800,-400,-53000,\n").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MissingField {
                field: "gmoty_score",
                ..
            }
        ));
    }

    #[test]
    fn bad_playoff_flag_is_invalid() {
        let err = parse("elite,3,sometimes,2,0,0,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidValue {
                field: "made_playoffs",
                ..
            }
        ));
    }

    #[test]
    fn manager_named_none_is_kept() {
        let managers = parse("None,3,False,0,0,,0,0\n").unwrap();
        assert_eq!(managers[0].manager, "None");
    }

    #[test]
    fn duplicate_manager_is_rejected() {
        let err = parse("elite,3,False,0,0,,0,0\nelite,4,True,0,0,,0,0\n").unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateManager(name) if name == "elite"));
    }
}
