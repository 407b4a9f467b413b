use crate::error::AnalyzerError;
use analytics::{Aggregator, AnnotatedTrade, ManagerSummaries, ValuationEngine};
use core_types::{ManagerRecord, TradeRecord};

/// Everything derived from one pair of ledgers, computed once and then only
/// read.
///
/// Ranking, award selection, reconciliation and export all take a shared
/// reference to this context instead of recomputing from raw rows.
#[derive(Debug, Clone)]
pub struct LeagueContext {
    trades: Vec<AnnotatedTrade>,
    standings: Vec<ManagerRecord>,
    summaries: ManagerSummaries,
}

impl LeagueContext {
    /// Annotates the trade ledger, summarizes it by manager and orders the
    /// team ledger into standings.
    ///
    /// Standings are ordered by descending `gmoty_score` with a stable sort, so
    /// a ledger that is already sorted keeps its row order exactly.
    pub fn build(
        trades: &[TradeRecord],
        managers: Vec<ManagerRecord>,
    ) -> Result<Self, AnalyzerError> {
        let trades = ValuationEngine::new().annotate(trades)?;
        let summaries = Aggregator::new().summarize(&trades)?;

        let mut standings = managers;
        let presorted = standings
            .windows(2)
            .all(|pair| pair[0].gmoty_score >= pair[1].gmoty_score);
        if !presorted {
            tracing::warn!("Team ledger is not sorted by gmoty_score; ranking by score instead of row order.");
            standings.sort_by(|a, b| b.gmoty_score.cmp(&a.gmoty_score));
        }

        tracing::info!(
            trade_rows = trades.len(),
            managers = standings.len(),
            traders = summaries.len(),
            "League context built."
        );

        Ok(Self {
            trades,
            standings,
            summaries,
        })
    }

    /// Annotated trades in ledger order.
    pub fn trades(&self) -> &[AnnotatedTrade] {
        &self.trades
    }

    /// Managers in rank order; rank 1 is index 0.
    pub fn standings(&self) -> &[ManagerRecord] {
        &self.standings
    }

    pub fn summaries(&self) -> &ManagerSummaries {
        &self.summaries
    }

    pub fn manager(&self, name: &str) -> Option<&ManagerRecord> {
        self.standings.iter().find(|m| m.manager == name)
    }

    /// 1-based GMOTY rank of a manager.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.standings
            .iter()
            .position(|m| m.manager == name)
            .map(|index| index + 1)
    }

    /// A manager's trades in ledger order.
    pub fn trades_by<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AnnotatedTrade> + 'a {
        self.trades.iter().filter(move |t| t.manager() == name)
    }

    pub fn winner(&self) -> Option<&ManagerRecord> {
        self.standings.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{manager, trade};
    use rust_decimal_macros::dec;

    #[test]
    fn presorted_standings_keep_row_order() {
        let ctx = LeagueContext::build(
            &[],
            vec![
                manager("PTexas", 9, true, 0, dec!(400)),
                manager("tie-a", 8, true, 0, dec!(300)),
                manager("tie-b", 8, true, 0, dec!(300)),
            ],
        )
        .unwrap();

        let names: Vec<_> = ctx.standings().iter().map(|m| m.manager.as_str()).collect();
        assert_eq!(names, vec!["PTexas", "tie-a", "tie-b"]);
        assert_eq!(ctx.rank_of("tie-b"), Some(3));
        assert_eq!(ctx.winner().unwrap().manager, "PTexas");
    }

    #[test]
    fn unsorted_standings_are_ranked_by_score() {
        let ctx = LeagueContext::build(
            &[],
            vec![
                manager("low", 2, false, 0, dec!(50)),
                manager("high", 9, true, 0, dec!(400)),
            ],
        )
        .unwrap();
        assert_eq!(ctx.rank_of("high"), Some(1));
        assert_eq!(ctx.rank_of("nobody"), None);
    }

    #[test]
    fn trades_by_filters_in_ledger_order() {
        let ctx = LeagueContext::build(
            &[
                trade("elite", dec!(100)),
                trade("Dzel45", dec!(200)),
                trade("elite", dec!(-300)),
            ],
            vec![],
        )
        .unwrap();

        let nets: Vec<_> = ctx.trades_by("elite").map(|t| t.current_net()).collect();
        assert_eq!(nets, vec![dec!(100), dec!(-300)]);
        assert_eq!(ctx.summaries().len(), 2);
    }
}
