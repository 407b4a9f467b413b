use crate::context::LeagueContext;
use crate::playoffs::PlayoffSplit;
use analytics::AnnotatedTrade;
use core_types::ManagerRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;

/// A trade that was already this far underwater at execution was overpaid.
pub const OVERPAID_BELOW: Decimal = dec!(-500);
/// Post-trade swing below which the sent assets clearly outgrew the acquired ones.
pub const COLLAPSE_BELOW: Decimal = dec!(-1000);
/// Post-trade appreciation above which a fleece counts as a breakout buy.
pub const BREAKOUT_ABOVE: Decimal = dec!(1000);

/// Result of a top-N trade selection.
///
/// An empty ledger produces `NoTrades` rather than an empty list, so callers
/// can tell "no trades happened" from "nothing requested".
#[derive(Debug, Clone, PartialEq)]
pub enum TradeSelection<'a> {
    NoTrades,
    Ranked(Vec<&'a AnnotatedTrade>),
}

impl<'a> TradeSelection<'a> {
    pub fn first(&self) -> Option<&'a AnnotatedTrade> {
        self.as_slice().first().copied()
    }

    pub fn as_slice(&self) -> &[&'a AnnotatedTrade] {
        match self {
            TradeSelection::NoTrades => &[],
            TradeSelection::Ranked(trades) => trades,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a AnnotatedTrade> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn has_trades(&self) -> bool {
        matches!(self, TradeSelection::Ranked(_))
    }
}

/// Why a losing trade lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossDiagnosis {
    /// The trade was already well underwater at execution.
    OverpaidAtExecution,
    /// The sent assets appreciated while the acquired ones fell.
    SentAssetsAppreciated,
    /// A small deficit that widened over time.
    CompoundedMinorLoss,
}

impl LossDiagnosis {
    pub fn of(trade: &AnnotatedTrade) -> Self {
        if trade.immediate_net() < OVERPAID_BELOW {
            LossDiagnosis::OverpaidAtExecution
        } else if trade.post_trade_appreciation() < COLLAPSE_BELOW {
            LossDiagnosis::SentAssetsAppreciated
        } else {
            LossDiagnosis::CompoundedMinorLoss
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            LossDiagnosis::OverpaidAtExecution => "Lost at trade execution - overpaid from the start",
            LossDiagnosis::SentAssetsAppreciated => {
                "Assets sent appreciated while assets acquired tanked"
            }
            LossDiagnosis::CompoundedMinorLoss => "Minor loss but compounded over time",
        }
    }
}

/// True when a fleece candidate's acquired side broke out after the trade.
pub fn is_breakout(trade: &AnnotatedTrade) -> bool {
    trade.post_trade_appreciation() > BREAKOUT_ABOVE
}

/// Every manager tied for the highest trade count.
#[derive(Debug, Clone, PartialEq)]
pub struct MostActive<'a> {
    pub trade_count: u32,
    pub managers: Vec<&'a ManagerRecord>,
}

/// A most-active manager together with their rank and trades.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTraderProfile<'a> {
    pub rank: usize,
    pub manager: &'a ManagerRecord,
    pub trades: Vec<&'a AnnotatedTrade>,
}

/// Derives the ranked trade views and awards from a `LeagueContext`.
pub struct AwardSelector<'a> {
    ctx: &'a LeagueContext,
}

impl<'a> AwardSelector<'a> {
    pub fn new(ctx: &'a LeagueContext) -> Self {
        Self { ctx }
    }

    /// Up to `n` trades with the highest current net value.
    pub fn best_trades(&self, n: usize) -> TradeSelection<'a> {
        self.select(n, |a, b| b.current_net().cmp(&a.current_net()))
    }

    /// Up to `n` trades with the lowest current net value, worst first.
    pub fn worst_trades(&self, n: usize) -> TradeSelection<'a> {
        self.select(n, |a, b| a.current_net().cmp(&b.current_net()))
    }

    /// Up to `n` trades whose value rose most after execution.
    pub fn fleece_trades(&self, n: usize) -> TradeSelection<'a> {
        self.select(n, |a, b| {
            b.post_trade_appreciation()
                .cmp(&a.post_trade_appreciation())
        })
    }

    /// All managers sharing the maximum `trade_count`, in rank order.
    ///
    /// Returns `None` only when the team ledger is empty.
    pub fn most_active(&self) -> Option<MostActive<'a>> {
        let standings = self.ctx.standings();
        let trade_count = standings.iter().map(|m| m.trade_count).max()?;
        let managers = standings
            .iter()
            .filter(|m| m.trade_count == trade_count)
            .collect();
        Some(MostActive {
            trade_count,
            managers,
        })
    }

    /// Rank and trade history for each most-active manager.
    pub fn active_trader_profiles(&self) -> Vec<ActiveTraderProfile<'a>> {
        let ctx = self.ctx;
        self.most_active()
            .map(|active| active.managers)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|manager| {
                let rank = ctx.rank_of(&manager.manager)?;
                Some(ActiveTraderProfile {
                    rank,
                    manager,
                    trades: ctx.trades_by(&manager.manager).collect(),
                })
            })
            .collect()
    }

    /// Playoff teams against the rest of the league.
    pub fn playoff_split(&self) -> PlayoffSplit<'a> {
        PlayoffSplit::from_context(self.ctx)
    }

    /// Stable sort over ledger order, so ties keep their original sequence.
    fn select<F>(&self, n: usize, compare: F) -> TradeSelection<'a>
    where
        F: Fn(&AnnotatedTrade, &AnnotatedTrade) -> Ordering,
    {
        let trades = self.ctx.trades();
        if trades.is_empty() {
            return TradeSelection::NoTrades;
        }

        let mut ranked: Vec<&'a AnnotatedTrade> = trades.iter().collect();
        ranked.sort_by(|a, b| compare(a, b));
        ranked.truncate(n);
        TradeSelection::Ranked(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{manager, trade, trade_with};

    fn context(trades: Vec<core_types::TradeRecord>) -> LeagueContext {
        LeagueContext::build(&trades, vec![]).unwrap()
    }

    fn managers_of<'a>(selection: &TradeSelection<'a>) -> Vec<&'a str> {
        selection.iter().map(|t| t.manager()).collect()
    }

    #[test]
    fn best_and_worst_order_by_current_net() {
        let ctx = context(vec![
            trade("a", dec!(100)),
            trade("b", dec!(5000)),
            trade("c", dec!(-2500)),
            trade("d", dec!(900)),
        ]);
        let selector = AwardSelector::new(&ctx);

        assert_eq!(managers_of(&selector.best_trades(2)), vec!["b", "d"]);
        assert_eq!(managers_of(&selector.worst_trades(3)), vec!["c", "a", "d"]);
    }

    #[test]
    fn ties_keep_ledger_order() {
        let ctx = context(vec![
            trade("first", dec!(100)),
            trade("second", dec!(100)),
            trade("third", dec!(100)),
        ]);
        let selector = AwardSelector::new(&ctx);

        assert_eq!(
            managers_of(&selector.best_trades(3)),
            vec!["first", "second", "third"]
        );
        assert_eq!(
            managers_of(&selector.worst_trades(3)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn fleece_ranks_by_appreciation_not_net() {
        let ctx = context(vec![
            // Big winner at execution, flat afterwards.
            trade_with("steady", dec!(8000), dec!(8000)),
            // Losing at execution, then exploded.
            trade_with("fleecer", dec!(-1500), dec!(3000)),
            trade_with("faller", dec!(2000), dec!(-500)),
        ]);
        let selector = AwardSelector::new(&ctx);
        let fleece = selector.fleece_trades(3);

        assert_eq!(managers_of(&fleece), vec!["fleecer", "steady", "faller"]);
        assert_eq!(fleece.first().unwrap().post_trade_appreciation(), dec!(4500));
        assert!(is_breakout(fleece.first().unwrap()));
    }

    #[test]
    fn fewer_trades_than_requested() {
        let ctx = context(vec![trade("only", dec!(10))]);
        let selector = AwardSelector::new(&ctx);
        assert_eq!(selector.best_trades(5).len(), 1);
        assert_eq!(selector.fleece_trades(3).len(), 1);
    }

    #[test]
    fn empty_ledger_yields_no_trades() {
        let ctx = context(vec![]);
        let selector = AwardSelector::new(&ctx);

        for selection in [
            selector.best_trades(5),
            selector.worst_trades(5),
            selector.fleece_trades(3),
        ] {
            assert_eq!(selection, TradeSelection::NoTrades);
            assert!(selection.first().is_none());
            assert!(!selection.has_trades());
        }
    }

    #[test]
    fn most_active_reports_every_tied_manager() {
        let ctx = LeagueContext::build(
            &[],
            vec![
                manager("Dzel45", 8, true, 4, dec!(300)),
                manager("elite", 6, false, 2, dec!(200)),
                manager("Mellow", 7, true, 4, dec!(100)),
            ],
        )
        .unwrap();
        let active = AwardSelector::new(&ctx).most_active().unwrap();

        assert_eq!(active.trade_count, 4);
        let names: Vec<_> = active.managers.iter().map(|m| m.manager.as_str()).collect();
        assert_eq!(names, vec!["Dzel45", "Mellow"]);
    }

    #[test]
    fn most_active_without_managers_is_none() {
        let ctx = context(vec![]);
        assert!(AwardSelector::new(&ctx).most_active().is_none());
        assert!(AwardSelector::new(&ctx).active_trader_profiles().is_empty());
    }

    #[test]
    fn active_profiles_carry_rank_and_trades() {
        let ctx = LeagueContext::build(
            &[
                trade("Mellow", dec!(-800)),
                trade("Dzel45", dec!(1200)),
                trade("Mellow", dec!(300)),
            ],
            vec![
                manager("Dzel45", 8, true, 1, dec!(300)),
                manager("Mellow", 7, true, 2, dec!(200)),
            ],
        )
        .unwrap();
        let profiles = AwardSelector::new(&ctx).active_trader_profiles();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].rank, 2);
        assert_eq!(profiles[0].manager.manager, "Mellow");
        let nets: Vec<_> = profiles[0].trades.iter().map(|t| t.current_net()).collect();
        assert_eq!(nets, vec![dec!(-800), dec!(300)]);
    }

    #[test]
    fn loss_diagnosis_follows_threshold_order() {
        let ctx = context(vec![
            trade_with("overpaid", dec!(-501), dec!(-3000)),
            trade_with("collapsed", dec!(-500), dec!(-1600)),
            trade_with("minor", dec!(-200), dec!(-900)),
        ]);
        let diagnoses: Vec<_> = ctx.trades().iter().map(LossDiagnosis::of).collect();

        assert_eq!(
            diagnoses,
            vec![
                LossDiagnosis::OverpaidAtExecution,
                LossDiagnosis::SentAssetsAppreciated,
                LossDiagnosis::CompoundedMinorLoss,
            ]
        );
    }
}
