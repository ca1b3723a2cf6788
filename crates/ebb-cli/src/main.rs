//! Ebb CLI - cash-flow early warning for small businesses
//!
//! Usage:
//!   ebb analyze --file transactions.csv    Full report (metrics, forecast, risks)
//!   ebb metrics --file transactions.csv    Metrics snapshot only
//!   ebb forecast --file transactions.csv   Forward cash forecast only

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            horizon,
            collections_delay,
            thresholds,
            json,
        } => commands::cmd_analyze(&input, horizon, collections_delay, thresholds.as_deref(), json),
        Commands::Metrics { input, daily } => commands::cmd_metrics(&input, daily),
        Commands::Forecast {
            input,
            horizon,
            collections_delay,
        } => commands::cmd_forecast(&input, horizon, collections_delay),
    }
}
