//! # GMOTY Analyzer
//!
//! Ranks trades and managers and selects the season's awards.
//!
//! Everything here reads from a `LeagueContext`, which is built once from the
//! two ledgers and never modified afterwards.

use rust_decimal::Decimal;

pub mod awards;
pub mod context;
pub mod error;
pub mod narrative;
pub mod playoffs;
pub mod reconcile;

pub use awards::{
    ActiveTraderProfile, AwardSelector, LossDiagnosis, MostActive, TradeSelection, is_breakout,
};
pub use context::LeagueContext;
pub use error::AnalyzerError;
pub use narrative::LeagueNarrative;
pub use playoffs::{PartitionStats, PlayoffSplit};
pub use reconcile::{Discrepancy, reconcile};

/// Number of logical trades behind `trade_sides` ledger rows.
///
/// Each trade is recorded once per side, so this is `floor(rows / 2)`. Trades
/// with more than two parties are not special-cased.
pub fn logical_trade_count(trade_sides: usize) -> usize {
    trade_sides / 2
}

/// Total season value change across the league.
pub fn net_value(ctx: &LeagueContext) -> Decimal {
    ctx.standings().iter().map(|m| m.total_change).sum()
}
