//! Analyze command implementation

use std::path::Path;

use anyhow::{Context, Result};
use ebb_core::{analyze, AnalysisConfig, Thresholds};

use super::{load_table, forecast::print_forecast, metrics::print_metrics};
use crate::cli::InputArgs;

pub fn cmd_analyze(
    input: &InputArgs,
    horizon: u32,
    collections_delay: u32,
    thresholds: Option<&Path>,
    json: bool,
) -> Result<()> {
    let table = load_table(&input.file)?;

    let thresholds = match thresholds {
        Some(path) => Thresholds::load(path)
            .with_context(|| format!("Failed to load thresholds from {}", path.display()))?,
        None => Thresholds::default(),
    };

    let config = AnalysisConfig {
        opening_balance: input.opening_balance,
        collections_delay_days: collections_delay,
        horizon_days: horizon,
        burn_convention: input.burn_convention.into(),
        thresholds,
    };

    let report = analyze(&table, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_metrics(&report.metrics);

    println!();
    println!("⚠️  Risks");
    if report.decisions.risks.is_empty() {
        println!("   No structural risks detected.");
    } else {
        for risk in &report.decisions.risks {
            println!("   - {}", risk.summary);
        }
    }

    println!();
    println!("✅ Recommended Actions");
    for action in &report.decisions.actions {
        println!("   - {}", action.recommendation);
    }

    print_forecast(&report.forecast);

    println!();
    println!("{}", report.narrative);

    Ok(())
}
