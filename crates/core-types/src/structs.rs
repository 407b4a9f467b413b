use crate::enums::ValueField;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four raw valuations attached to one side of a trade.
///
/// "Then" is the value at the execution date, "now" is the value as of the
/// report's generation date. Absent values are filled with zero by the loader
/// before a `TradeValues` is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeValues {
    pub added_then: Decimal,
    pub added_now: Decimal,
    pub dropped_then: Decimal,
    pub dropped_now: Decimal,
}

impl TradeValues {
    pub fn new(
        added_then: Decimal,
        added_now: Decimal,
        dropped_then: Decimal,
        dropped_now: Decimal,
    ) -> Self {
        Self {
            added_then,
            added_now,
            dropped_then,
            dropped_now,
        }
    }

    pub fn get(&self, field: ValueField) -> Decimal {
        match field {
            ValueField::AddedValueThen => self.added_then,
            ValueField::AddedValueNow => self.added_now,
            ValueField::DroppedValueThen => self.dropped_then,
            ValueField::DroppedValueNow => self.dropped_now,
        }
    }

    /// Returns the first field holding a negative value, if any.
    pub fn first_negative(&self) -> Option<(ValueField, Decimal)> {
        ValueField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .find(|(_, value)| value.is_sign_negative() && !value.is_zero())
    }
}

/// One side of a trade between a manager and the rest of the league.
///
/// The record only carries raw inputs. Net and appreciation figures are
/// derived by the valuation engine and are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub manager: String,
    pub trade_date: NaiveDate,
    pub added_assets: Vec<String>,
    pub dropped_assets: Vec<String>,
    pub values: TradeValues,
}

impl TradeRecord {
    /// Builds a trade side, rejecting rows that move no assets at all.
    pub fn new(
        manager: impl Into<String>,
        trade_date: NaiveDate,
        added_assets: Vec<String>,
        dropped_assets: Vec<String>,
        values: TradeValues,
    ) -> Result<Self, CoreError> {
        let manager = manager.into();
        if manager.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "manager".to_string(),
                "manager name is empty".to_string(),
            ));
        }
        if added_assets.is_empty() && dropped_assets.is_empty() {
            return Err(CoreError::EmptyTrade {
                manager,
                date: trade_date.to_string(),
            });
        }
        Ok(Self {
            manager,
            trade_date,
            added_assets,
            dropped_assets,
            values,
        })
    }

    /// All asset names moved by this side, acquired first.
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.added_assets
            .iter()
            .chain(self.dropped_assets.iter())
            .map(String::as_str)
    }
}

/// One row of the team ledger: a manager's season at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerRecord {
    pub manager: String,
    pub wins: u32,
    pub made_playoffs: bool,
    pub trade_count: u32,
    pub total_trade_value_gained: Decimal,
    /// Absent when the manager made no trades.
    pub avg_trade_performance: Option<Decimal>,
    /// Overall season value delta, independent of trades.
    pub total_change: Decimal,
    /// Composite "General Manager of the Year" score.
    pub gmoty_score: Decimal,
}
