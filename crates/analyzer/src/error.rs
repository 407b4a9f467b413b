use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Valuation failed: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
