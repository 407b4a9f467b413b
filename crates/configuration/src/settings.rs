use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for a report run.
///
/// Every section is optional in the TOML file; omitted sections take the
/// values from their `Default` implementations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub inputs: Inputs,
    pub output: Output,
    pub report: ReportSettings,
    pub league: LeagueSettings,
    pub reconciliation: Reconciliation,
    pub logging: Logging,
}

/// Locations of the two CSV ledgers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Inputs {
    /// One row per side of each trade.
    pub trade_ledger: PathBuf,
    /// One row per manager, pre-sorted by descending GMOTY score.
    pub team_ledger: PathBuf,
}

/// Where the JSON summary is written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Output {
    /// When unset, the `report` command only prints to the console.
    pub json_path: Option<PathBuf>,
}

/// Sizes of the ranked views and the season label.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub season: String,
    /// Number of managers listed under `rankings` in the export.
    pub top_rankings: usize,
    pub best_trades: usize,
    pub worst_trades: usize,
    pub fleece_candidates: usize,
}

/// League facts that are not derivable from either ledger.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeagueSettings {
    pub waiver_claims: Option<u32>,
    pub fa_pickups: Option<u32>,
    pub teams: Vec<TeamName>,
}

/// Maps a manager handle to the team's full display name.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamName {
    pub manager: String,
    pub full_name: String,
}

/// Rules for cross-checking the team ledger against the trade ledger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Reconciliation {
    /// Abort the run when any discrepancy is found.
    pub strict: bool,
    /// Largest accepted gap between the recorded and recomputed average per trade.
    pub tolerance: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: LogLevel,
    /// Also write logs to `<directory>/<file_name>` when set.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// --- Default Implementations ---

impl Default for Inputs {
    fn default() -> Self {
        Self {
            trade_ledger: PathBuf::from("data/trades.csv"),
            team_ledger: PathBuf::from("data/teams.csv"),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            season: String::new(),
            top_rankings: 6,
            best_trades: 5,
            worst_trades: 5,
            fleece_candidates: 3,
        }
    }
}

impl Default for Reconciliation {
    fn default() -> Self {
        Self {
            strict: false,
            tolerance: Decimal::ONE,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            directory: None,
            file_name: "gmoty.log".to_string(),
        }
    }
}

impl LeagueSettings {
    /// Full team name configured for `manager`, if any.
    pub fn full_name(&self, manager: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|team| team.manager == manager)
            .map(|team| team.full_name.as_str())
    }
}

impl Settings {
    /// Rejects settings that would make a ranked view meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("report.top_rankings", self.report.top_rankings),
            ("report.best_trades", self.report.best_trades),
            ("report.worst_trades", self.report.worst_trades),
            ("report.fleece_candidates", self.report.fleece_candidates),
        ];
        if let Some((key, _)) = sizes.iter().find(|(_, size)| *size == 0) {
            return Err(ConfigError::ValidationError(format!(
                "{key} must be at least 1"
            )));
        }

        if self.reconciliation.tolerance.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "reconciliation.tolerance must not be negative".to_string(),
            ));
        }

        if self.logging.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.report.top_rankings, 6);
        assert_eq!(settings.report.fleece_candidates, 3);
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let mut settings = Settings::default();
        settings.reconciliation.tolerance = dec!(-0.5);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn unknown_team_has_no_full_name() {
        let league = LeagueSettings {
            teams: vec![TeamName {
                manager: "PTexas".to_string(),
                full_name: "Team Full of Scrubs".to_string(),
            }],
            ..LeagueSettings::default()
        };
        assert_eq!(league.full_name("elite"), None);
    }
}
