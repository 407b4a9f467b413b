use rust_decimal::Decimal;
use serde::Serialize;

/// Trade totals for a single manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub manager: String,
    /// Sum of `current_net` over the manager's trades.
    pub total_current_net: Decimal,
    pub trade_count: usize,
    pub mean_current_net: Decimal,
    /// Sum of `immediate_net` over the manager's trades.
    pub total_immediate_net: Decimal,
}

/// Per-manager totals, ordered by descending `total_current_net`.
///
/// Only managers with at least one trade are present. Callers that need
/// zero-trade managers merge this against the team ledger themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ManagerSummaries {
    entries: Vec<AggregateStats>,
}

impl ManagerSummaries {
    pub(crate) fn new(entries: Vec<AggregateStats>) -> Self {
        Self { entries }
    }

    pub fn get(&self, manager: &str) -> Option<&AggregateStats> {
        self.entries.iter().find(|stats| stats.manager == manager)
    }

    pub fn contains(&self, manager: &str) -> bool {
        self.get(manager).is_some()
    }

    /// Iterates in ranked order, best trader first.
    pub fn iter(&self) -> std::slice::Iter<'_, AggregateStats> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ManagerSummaries {
    type Item = &'a AggregateStats;
    type IntoIter = std::slice::Iter<'a, AggregateStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
