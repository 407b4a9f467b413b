use crate::context::LeagueContext;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A disagreement between the team ledger and the trade ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    TradeCountMismatch {
        manager: String,
        recorded: u32,
        observed: usize,
    },
    AveragePerformanceMismatch {
        manager: String,
        recorded: Decimal,
        observed: Decimal,
    },
    MissingAveragePerformance {
        manager: String,
        observed: Decimal,
    },
    UnknownManager {
        manager: String,
    },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::TradeCountMismatch {
                manager,
                recorded,
                observed,
            } => write!(
                f,
                "{manager}: team ledger records {recorded} trades, trade ledger has {observed}"
            ),
            Discrepancy::AveragePerformanceMismatch {
                manager,
                recorded,
                observed,
            } => write!(
                f,
                "{manager}: recorded average per trade {recorded} differs from computed {}",
                observed.round_dp(1)
            ),
            Discrepancy::MissingAveragePerformance { manager, observed } => write!(
                f,
                "{manager}: no average per trade recorded, computed {}",
                observed.round_dp(1)
            ),
            Discrepancy::UnknownManager { manager } => {
                write!(f, "{manager}: trades by a manager missing from the team ledger")
            }
        }
    }
}

/// Cross-checks every team ledger row against the trade ledger.
///
/// `trade_count` must equal the number of trade rows for the manager, and
/// `avg_trade_performance` must be within `tolerance` of the mean
/// `current_net` of those rows. A manager without trades is not expected to
/// carry an average, so an absent one is never reported for them. Trade rows
/// whose manager is missing from the team ledger are reported once per manager.
pub fn reconcile(ctx: &LeagueContext, tolerance: Decimal) -> Vec<Discrepancy> {
    let summaries = ctx.summaries();
    let mut discrepancies = Vec::new();

    for record in ctx.standings() {
        let stats = summaries.get(&record.manager);
        let observed = stats.map_or(0, |s| s.trade_count);

        if record.trade_count as usize != observed {
            discrepancies.push(Discrepancy::TradeCountMismatch {
                manager: record.manager.clone(),
                recorded: record.trade_count,
                observed,
            });
        }

        let Some(stats) = stats else {
            continue;
        };
        match record.avg_trade_performance {
            Some(recorded) if (recorded - stats.mean_current_net).abs() > tolerance => {
                discrepancies.push(Discrepancy::AveragePerformanceMismatch {
                    manager: record.manager.clone(),
                    recorded,
                    observed: stats.mean_current_net,
                });
            }
            Some(_) => {}
            None => discrepancies.push(Discrepancy::MissingAveragePerformance {
                manager: record.manager.clone(),
                observed: stats.mean_current_net,
            }),
        }
    }

    for stats in summaries {
        if ctx.manager(&stats.manager).is_none() {
            discrepancies.push(Discrepancy::UnknownManager {
                manager: stats.manager.clone(),
            });
        }
    }

    for discrepancy in &discrepancies {
        tracing::warn!(%discrepancy, "Ledger discrepancy.");
    }
    discrepancies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{manager, trade};
    use rust_decimal_macros::dec;

    fn with_average(
        mut record: core_types::ManagerRecord,
        average: Option<Decimal>,
    ) -> core_types::ManagerRecord {
        record.avg_trade_performance = average;
        record
    }

    #[test]
    fn consistent_ledgers_have_no_discrepancies() {
        let ctx = LeagueContext::build(
            &[trade("Dzel45", dec!(1000)), trade("Dzel45", dec!(2001))],
            vec![
                with_average(manager("Dzel45", 8, true, 2, dec!(300)), Some(dec!(1500))),
                manager("MaliciousKid", 8, true, 0, dec!(280)),
            ],
        )
        .unwrap();

        assert!(reconcile(&ctx, dec!(1)).is_empty());
    }

    #[test]
    fn reports_every_kind_of_mismatch() {
        let ctx = LeagueContext::build(
            &[
                trade("Dzel45", dec!(1000)),
                trade("elite", dec!(-400)),
                trade("ghost", dec!(5)),
            ],
            vec![
                with_average(manager("Dzel45", 8, true, 2, dec!(300)), Some(dec!(1000))),
                with_average(manager("elite", 6, false, 1, dec!(200)), Some(dec!(900))),
                manager("Mellow", 5, false, 0, dec!(100)),
            ],
        )
        .unwrap();
        let found = reconcile(&ctx, dec!(1));

        assert_eq!(
            found,
            vec![
                Discrepancy::TradeCountMismatch {
                    manager: "Dzel45".to_string(),
                    recorded: 2,
                    observed: 1,
                },
                Discrepancy::AveragePerformanceMismatch {
                    manager: "elite".to_string(),
                    recorded: dec!(900),
                    observed: dec!(-400),
                },
                Discrepancy::UnknownManager {
                    manager: "ghost".to_string(),
                },
            ]
        );
    }

    #[test]
    fn trader_without_recorded_average_is_flagged() {
        let ctx = LeagueContext::build(
            &[trade("elite", dec!(250))],
            vec![manager("elite", 6, false, 1, dec!(200))],
        )
        .unwrap();

        assert_eq!(
            reconcile(&ctx, dec!(1)),
            vec![Discrepancy::MissingAveragePerformance {
                manager: "elite".to_string(),
                observed: dec!(250),
            }]
        );
    }
}
