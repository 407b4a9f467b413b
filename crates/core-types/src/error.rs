use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Trade by '{manager}' on {date} neither adds nor drops any asset")]
    EmptyTrade { manager: String, date: String },
}
