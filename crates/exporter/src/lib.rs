//! # GMOTY Exporter
//!
//! Projects a `LeagueContext` into the two outward-facing artifacts of a run:
//!
//! - `SeasonSummary`: the fixed-shape JSON document.
//! - `ConsoleReport`: a sectioned, human-readable text report carrying the
//!   same figures.
//!
//! Values are exact decimals everywhere upstream. This crate is the only place
//! where they are truncated to whole numbers.

pub mod console;
pub mod error;
pub mod summary;
pub mod units;

pub use console::ConsoleReport;
pub use error::ExportError;
pub use summary::{
    BestTrade, FleeceAward, LeagueStats, RankingEntry, SeasonSummary, TradeRankingEntry,
    WinnerEntry, WorstTrade,
};
