use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A current net value above this is an excellent trade.
pub const EXCELLENT_ABOVE: Decimal = dec!(1000);
/// A current net value at or below this is a poor trade.
pub const POOR_AT_OR_BELOW: Decimal = dec!(-1000);

/// Verdict on a trade, judged by its current net value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assessment {
    Excellent,
    Good,
    Neutral,
    Poor,
}

impl Assessment {
    /// Classifies a current net value.
    ///
    /// Each bucket's upper boundary belongs to it: exactly 1000 is `Good`,
    /// exactly 0 is `Neutral`, exactly -1000 is `Poor`.
    pub fn classify(current_net: Decimal) -> Self {
        if current_net > EXCELLENT_ABOVE {
            Assessment::Excellent
        } else if current_net > Decimal::ZERO {
            Assessment::Good
        } else if current_net > POOR_AT_OR_BELOW {
            Assessment::Neutral
        } else {
            Assessment::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Excellent => "excellent",
            Assessment::Good => "good",
            Assessment::Neutral => "neutral",
            Assessment::Poor => "poor",
        }
    }

    /// Short description used by the console report.
    pub fn summary(&self) -> &'static str {
        match self {
            Assessment::Excellent => "Major value gain",
            Assessment::Good => "Positive value",
            Assessment::Neutral => "Minimal impact",
            Assessment::Poor => "Significant loss",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
