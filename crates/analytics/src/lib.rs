//! # GMOTY Analytics Engine
//!
//! This crate turns raw trade rows into value-change metrics. It acts as the
//! "unbiased judge" of every trade in the league.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of files or output formats.
//!   It depends only on `core-types`.
//! - **Stateless Calculation:** `ValuationEngine` and `Aggregator` are stateless
//!   calculators. They take slices of input and return new values without
//!   modifying anything, so identical input always yields identical output.
//!
//! ## Public API
//!
//! - `ValuationEngine`: derives immediate net, current net and post-trade
//!   appreciation for every trade.
//! - `AnnotatedTrade`: a trade together with its derived metrics.
//! - `Assessment`: the four-bucket verdict on a trade's current net value.
//! - `Aggregator`: rolls trades up into per-manager `AggregateStats`.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod assessment;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::Aggregator;
pub use assessment::Assessment;
pub use engine::{AnnotatedTrade, ValuationEngine};
pub use error::AnalyticsError;
pub use report::{AggregateStats, ManagerSummaries};
