use crate::engine::AnnotatedTrade;
use crate::error::AnalyticsError;
use crate::report::{AggregateStats, ManagerSummaries};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Rolls annotated trades up into per-manager totals.
#[derive(Debug, Default)]
pub struct Aggregator {}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups trades by manager and ranks the groups by summed `current_net`.
    ///
    /// Managers tied on the sum keep the order of their first trade in the
    /// ledger. Fails if a manager's totals leave the `Decimal` range.
    pub fn summarize(&self, trades: &[AnnotatedTrade]) -> Result<ManagerSummaries, AnalyticsError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<AggregateStats> = Vec::new();

        for trade in trades {
            let position = *positions.entry(trade.manager()).or_insert_with(|| {
                entries.push(AggregateStats {
                    manager: trade.manager().to_string(),
                    total_current_net: Decimal::ZERO,
                    trade_count: 0,
                    mean_current_net: Decimal::ZERO,
                    total_immediate_net: Decimal::ZERO,
                });
                entries.len() - 1
            });

            let overflow = |metric| AnalyticsError::Overflow {
                index: trade.ledger_index(),
                manager: trade.manager().to_string(),
                metric,
            };
            let stats = &mut entries[position];
            stats.total_current_net = stats
                .total_current_net
                .checked_add(trade.current_net())
                .ok_or_else(|| overflow("total_current_net"))?;
            stats.total_immediate_net = stats
                .total_immediate_net
                .checked_add(trade.immediate_net())
                .ok_or_else(|| overflow("total_immediate_net"))?;
            stats.trade_count += 1;
        }

        for stats in &mut entries {
            // trade_count is at least one for every entry.
            stats.mean_current_net = stats.total_current_net / Decimal::from(stats.trade_count);
        }

        entries.sort_by(|a, b| b.total_current_net.cmp(&a.total_current_net));

        tracing::debug!(managers = entries.len(), "Trades summarized by manager.");
        Ok(ManagerSummaries::new(entries))
    }
}
