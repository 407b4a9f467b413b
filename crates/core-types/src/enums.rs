use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four raw valuation columns carried by every trade row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueField {
    AddedValueThen,
    AddedValueNow,
    DroppedValueThen,
    DroppedValueNow,
}

impl ValueField {
    pub const ALL: [ValueField; 4] = [
        ValueField::AddedValueThen,
        ValueField::AddedValueNow,
        ValueField::DroppedValueThen,
        ValueField::DroppedValueNow,
    ];

    /// The column name used in the trade ledger.
    pub fn column(&self) -> &'static str {
        match self {
            ValueField::AddedValueThen => "added_value_then",
            ValueField::AddedValueNow => "added_value_now",
            ValueField::DroppedValueThen => "dropped_value_then",
            ValueField::DroppedValueNow => "dropped_value_now",
        }
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
