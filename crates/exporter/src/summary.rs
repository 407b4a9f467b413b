use crate::error::ExportError;
use crate::units::{join_assets, one_decimal, whole};
use analytics::{AggregateStats, AnnotatedTrade};
use analyzer::{AwardSelector, LeagueContext};
use configuration::Settings;
use core_types::ManagerRecord;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::Path;

/// The season summary document.
///
/// Field order is the serialized order. Awards that cannot be determined
/// (an empty trade ledger, or an empty team ledger for the winner) are written
/// as `{}` so the document always has the same keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub season: String,
    #[serde(serialize_with = "empty_object_if_none")]
    pub winner: Option<WinnerEntry>,
    pub rankings: Vec<RankingEntry>,
    #[serde(serialize_with = "empty_object_if_none")]
    pub best_trade: Option<BestTrade>,
    #[serde(serialize_with = "empty_object_if_none")]
    pub worst_trade: Option<WorstTrade>,
    #[serde(serialize_with = "empty_object_if_none")]
    pub fleece_award: Option<FleeceAward>,
    pub league_stats: LeagueStats,
    pub trade_rankings: Vec<TradeRankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerEntry {
    pub manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub score: i64,
    pub value_change: i64,
    pub wins: u32,
    pub trades: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub manager: String,
    pub value_change: i64,
    pub wins: u32,
    pub trades: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestTrade {
    pub manager: String,
    pub acquired: String,
    pub sent: String,
    pub value_gain: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorstTrade {
    pub manager: String,
    pub acquired: String,
    pub sent: String,
    pub value_loss: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleeceAward {
    pub manager: String,
    pub acquired: String,
    pub appreciation: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStats {
    /// Trade ledger rows halved, rounded down.
    pub total_trades: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiver_claims: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fa_pickups: Option<u32>,
    pub net_value: i64,
    /// Highest-ranked of the most active managers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_active: Option<String>,
    pub most_active_count: u32,
    /// Every manager tied at `most_active_count`, in rank order.
    pub most_active_all: Vec<String>,
}

/// One manager's aggregated trade performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRankingEntry {
    pub rank: usize,
    pub manager: String,
    pub total_value_gained: i64,
    pub trades: usize,
    pub avg_per_trade: f64,
    pub immediate_net: i64,
}

impl SeasonSummary {
    /// Projects the league context into the export document.
    ///
    /// Fails only when a value is too large to be written as a 64-bit integer.
    pub fn build(ctx: &LeagueContext, settings: &Settings) -> Result<Self, ExportError> {
        let selector = AwardSelector::new(ctx);

        let winner = ctx
            .winner()
            .map(|record| WinnerEntry::new(record, settings.league.full_name(&record.manager)))
            .transpose()?;

        let rankings = ctx
            .standings()
            .iter()
            .take(settings.report.top_rankings)
            .enumerate()
            .map(|(index, record)| RankingEntry::new(index + 1, record))
            .collect::<Result<Vec<_>, _>>()?;

        let best_trade = selector.best_trades(1).first().map(BestTrade::new).transpose()?;
        let worst_trade = selector.worst_trades(1).first().map(WorstTrade::new).transpose()?;
        let fleece_award = selector
            .fleece_trades(1)
            .first()
            .map(FleeceAward::new)
            .transpose()?;

        let most_active = selector.most_active();
        let league_stats = LeagueStats {
            total_trades: analyzer::logical_trade_count(ctx.trades().len()),
            waiver_claims: settings.league.waiver_claims,
            fa_pickups: settings.league.fa_pickups,
            net_value: whole("net_value", analyzer::net_value(ctx))?,
            most_active: most_active
                .as_ref()
                .and_then(|active| active.managers.first())
                .map(|record| record.manager.clone()),
            most_active_count: most_active.as_ref().map_or(0, |active| active.trade_count),
            most_active_all: most_active
                .map(|active| {
                    active
                        .managers
                        .iter()
                        .map(|record| record.manager.clone())
                        .collect()
                })
                .unwrap_or_default(),
        };

        let trade_rankings = ctx
            .summaries()
            .iter()
            .enumerate()
            .map(|(index, stats)| TradeRankingEntry::new(index + 1, stats))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            season: settings.report.season.clone(),
            winner,
            rankings,
            best_trade,
            worst_trade,
            fleece_award,
            league_stats,
            trade_rankings,
        })
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_json_string(&self) -> Result<String, ExportError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the document to `path`, creating missing parent directories.
    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json_string()?;
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, json).map_err(io_error)?;

        tracing::info!(path = %path.display(), "Season summary written.");
        Ok(())
    }
}

impl WinnerEntry {
    fn new(record: &ManagerRecord, full_name: Option<&str>) -> Result<Self, ExportError> {
        Ok(Self {
            manager: record.manager.clone(),
            full_name: full_name.map(str::to_string),
            score: whole("winner.score", record.gmoty_score)?,
            value_change: whole("winner.value_change", record.total_change)?,
            wins: record.wins,
            trades: record.trade_count,
        })
    }
}

impl RankingEntry {
    fn new(rank: usize, record: &ManagerRecord) -> Result<Self, ExportError> {
        Ok(Self {
            rank,
            manager: record.manager.clone(),
            value_change: whole("rankings.value_change", record.total_change)?,
            wins: record.wins,
            trades: record.trade_count,
        })
    }
}

impl BestTrade {
    fn new(trade: &AnnotatedTrade) -> Result<Self, ExportError> {
        Ok(Self {
            manager: trade.manager().to_string(),
            acquired: join_assets(trade.added_assets()),
            sent: join_assets(trade.dropped_assets()),
            value_gain: whole("best_trade.value_gain", trade.current_net())?,
        })
    }
}

impl WorstTrade {
    fn new(trade: &AnnotatedTrade) -> Result<Self, ExportError> {
        Ok(Self {
            manager: trade.manager().to_string(),
            acquired: join_assets(trade.added_assets()),
            sent: join_assets(trade.dropped_assets()),
            value_loss: whole("worst_trade.value_loss", trade.current_net())?,
        })
    }
}

impl FleeceAward {
    fn new(trade: &AnnotatedTrade) -> Result<Self, ExportError> {
        Ok(Self {
            manager: trade.manager().to_string(),
            acquired: join_assets(trade.added_assets()),
            appreciation: whole("fleece_award.appreciation", trade.post_trade_appreciation())?,
        })
    }
}

impl TradeRankingEntry {
    fn new(rank: usize, stats: &AggregateStats) -> Result<Self, ExportError> {
        Ok(Self {
            rank,
            manager: stats.manager.clone(),
            total_value_gained: whole("trade_rankings.total_value_gained", stats.total_current_net)?,
            trades: stats.trade_count,
            avg_per_trade: one_decimal(stats.mean_current_net),
            immediate_net: whole("trade_rankings.immediate_net", stats.total_immediate_net)?,
        })
    }
}

fn empty_object_if_none<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
