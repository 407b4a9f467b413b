use crate::assessment::Assessment;
use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{TradeRecord, TradeValues};
use rust_decimal::Decimal;
use serde::Serialize;

/// A trade side together with the metrics derived from its raw valuations.
///
/// Only `ValuationEngine` can build one, so the derived fields always agree
/// with the four raw values they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTrade {
    ledger_index: usize,
    record: TradeRecord,
    immediate_net: Decimal,
    current_net: Decimal,
    post_trade_appreciation: Decimal,
    assessment: Assessment,
}

impl AnnotatedTrade {
    /// Zero-based position of the row in the trade ledger.
    pub fn ledger_index(&self) -> usize {
        self.ledger_index
    }

    pub fn record(&self) -> &TradeRecord {
        &self.record
    }

    pub fn manager(&self) -> &str {
        &self.record.manager
    }

    pub fn trade_date(&self) -> NaiveDate {
        self.record.trade_date
    }

    pub fn added_assets(&self) -> &[String] {
        &self.record.added_assets
    }

    pub fn dropped_assets(&self) -> &[String] {
        &self.record.dropped_assets
    }

    pub fn values(&self) -> &TradeValues {
        &self.record.values
    }

    /// Net value at execution: `added_then - dropped_then`.
    pub fn immediate_net(&self) -> Decimal {
        self.immediate_net
    }

    /// Net value today: `added_now - dropped_now`.
    pub fn current_net(&self) -> Decimal {
        self.current_net
    }

    /// How much the trade moved after execution: `current_net - immediate_net`.
    pub fn post_trade_appreciation(&self) -> Decimal {
        self.post_trade_appreciation
    }

    pub fn assessment(&self) -> Assessment {
        self.assessment
    }

    /// Change in value of the acquired assets since the trade.
    pub fn acquired_change(&self) -> Decimal {
        self.record.values.added_now - self.record.values.added_then
    }

    /// Change in value of the assets sent away since the trade.
    pub fn sent_change(&self) -> Decimal {
        self.record.values.dropped_now - self.record.values.dropped_then
    }
}

/// A stateless calculator deriving value-change metrics from trade rows.
#[derive(Debug, Default)]
pub struct ValuationEngine {}

impl ValuationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotates every trade with its derived metrics.
    ///
    /// # Arguments
    ///
    /// * `trades` - The trade ledger in its original order. It is not modified.
    ///
    /// # Returns
    ///
    /// A new vector in the same order as the input, or an `AnalyticsError`
    /// naming the first trade carrying a negative valuation or whose derived
    /// metrics do not fit in a `Decimal`.
    pub fn annotate(&self, trades: &[TradeRecord]) -> Result<Vec<AnnotatedTrade>, AnalyticsError> {
        let annotated = trades
            .iter()
            .enumerate()
            .map(|(index, trade)| self.annotate_one(index, trade))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(trades = annotated.len(), "Trades annotated.");
        Ok(annotated)
    }

    /// Derives the metrics for a single trade at `ledger_index`.
    pub fn annotate_one(
        &self,
        ledger_index: usize,
        trade: &TradeRecord,
    ) -> Result<AnnotatedTrade, AnalyticsError> {
        if let Some((field, value)) = trade.values.first_negative() {
            return Err(AnalyticsError::InvalidValue {
                index: ledger_index,
                manager: trade.manager.clone(),
                field,
                value,
            });
        }

        let overflow = |metric| AnalyticsError::Overflow {
            index: ledger_index,
            manager: trade.manager.clone(),
            metric,
        };
        let values = &trade.values;
        let immediate_net = values
            .added_then
            .checked_sub(values.dropped_then)
            .ok_or_else(|| overflow("immediate_net"))?;
        let current_net = values
            .added_now
            .checked_sub(values.dropped_now)
            .ok_or_else(|| overflow("current_net"))?;
        let post_trade_appreciation = current_net
            .checked_sub(immediate_net)
            .ok_or_else(|| overflow("post_trade_appreciation"))?;

        Ok(AnnotatedTrade {
            ledger_index,
            record: trade.clone(),
            immediate_net,
            current_net,
            post_trade_appreciation,
            assessment: Assessment::classify(current_net),
        })
    }
}
