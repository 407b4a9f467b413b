use crate::context::LeagueContext;
use rust_decimal::Decimal;

/// League-wide figures for the season recap.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueNarrative {
    pub managers: usize,
    pub managers_with_trades: usize,
    pub managers_without_trades: usize,
    /// Rows in the trade ledger; each logical trade usually has two.
    pub trade_sides: usize,
    /// Draft picks that changed hands, counted once on the acquiring side.
    pub draft_picks_traded: usize,
    pub managers_gaining_value: usize,
    /// Sum of every manager's `total_change`.
    pub net_value: Decimal,
}

impl LeagueNarrative {
    pub fn from_context(ctx: &LeagueContext) -> Self {
        let standings = ctx.standings();
        let managers_with_trades = standings
            .iter()
            .filter(|m| ctx.summaries().contains(&m.manager))
            .count();

        Self {
            managers: standings.len(),
            managers_with_trades,
            managers_without_trades: standings.len() - managers_with_trades,
            trade_sides: ctx.trades().len(),
            draft_picks_traded: ctx
                .trades()
                .iter()
                .flat_map(|t| t.added_assets())
                .filter(|asset| is_draft_pick(asset))
                .count(),
            managers_gaining_value: standings
                .iter()
                .filter(|m| m.total_change > Decimal::ZERO)
                .count(),
            net_value: crate::net_value(ctx),
        }
    }
}

/// Pick assets are named like "2026 Round 1" or "2026 1st Round Pick".
pub fn is_draft_pick(asset: &str) -> bool {
    let lower = asset.to_ascii_lowercase();
    lower.contains("round") || lower.contains("pick")
}
