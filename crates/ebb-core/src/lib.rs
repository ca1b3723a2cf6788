//! Ebb Core Library
//!
//! Shared functionality for the ebb cash-flow early-warning tool:
//! - Normalization of heterogeneous transaction exports into a canonical ledger
//! - Keyword-based transaction categorization behind a swappable trait
//! - Cash-position, burn, and runway metrics
//! - Day-by-day forward cash forecasting with a collections delay
//! - Fixed-order threshold rules producing risk flags and actions
//! - Narrative rendering of the analysis

pub mod analysis;
pub mod classify;
pub mod decide;
pub mod error;
pub mod forecast;
pub mod import;
pub mod metrics;
pub mod models;
pub mod report;

pub use analysis::{analyze, analyze_with, AnalysisConfig, AnalysisReport};
pub use classify::{Classify, KeywordClassifier, KeywordRule};
pub use decide::{Action, DecisionSet, Risk, RuleKind, Thresholds};
pub use error::{Error, Result, SchemaRole};
pub use forecast::{ForecastDrivers, ForecastParams};
pub use import::RawTable;
pub use metrics::BurnConvention;
pub use models::{
    Category, CategoryOutflow, DailyCash, ForecastPoint, ForecastSeries, Ledger, MetricsSnapshot,
    Runway, Transaction,
};
