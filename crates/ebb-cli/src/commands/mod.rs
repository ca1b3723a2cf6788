//! Command implementations

mod analyze;
mod forecast;
mod metrics;

pub use analyze::cmd_analyze;
pub use forecast::cmd_forecast;
pub use metrics::cmd_metrics;

use std::path::Path;

use anyhow::{Context, Result};
use ebb_core::{KeywordClassifier, Ledger, RawTable};

use crate::cli::InputArgs;

/// Load the transactions table from disk with one clear failure message.
pub(crate) fn load_table(path: &Path) -> Result<RawTable> {
    RawTable::from_path(path)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))
}

/// Normalize and categorize the input into a ledger.
pub(crate) fn build_ledger(input: &InputArgs) -> Result<Ledger> {
    let table = load_table(&input.file)?;
    let transactions = ebb_core::import::normalize(&table)?;
    Ok(Ledger::new(transactions, &KeywordClassifier::default()))
}
