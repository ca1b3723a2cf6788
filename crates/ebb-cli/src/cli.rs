//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ebb_core::BurnConvention;

/// Ebb - cash-flow early warning for small businesses
#[derive(Parser)]
#[command(name = "ebb")]
#[command(about = "Cash-flow early-warning analysis for small businesses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis: metrics, forecast, risks, and narrative
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Forecast horizon in days
        #[arg(long, default_value_t = 60)]
        horizon: u32,

        /// Collections delay in days (lag between a sale and cash settling)
        #[arg(long, default_value_t = 7)]
        collections_delay: u32,

        /// Decision-threshold override file (TOML)
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Emit the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the metrics snapshot only
    Metrics {
        #[command(flatten)]
        input: InputArgs,

        /// Also print the daily running cash balance
        #[arg(long)]
        daily: bool,
    },

    /// Show the forward cash forecast only
    Forecast {
        #[command(flatten)]
        input: InputArgs,

        /// Forecast horizon in days
        #[arg(long, default_value_t = 60)]
        horizon: u32,

        /// Collections delay in days
        #[arg(long, default_value_t = 7)]
        collections_delay: u32,
    },
}

/// Arguments shared by every command that reads a transactions table.
#[derive(Args)]
pub struct InputArgs {
    /// Transactions CSV to analyze
    #[arg(short, long)]
    pub file: PathBuf,

    /// Opening cash balance before the first transaction
    #[arg(long, default_value_t = 0.0)]
    pub opening_balance: f64,

    /// How zero-outflow days enter the daily-burn average
    #[arg(long, value_enum, default_value = "active-days")]
    pub burn_convention: BurnConventionArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BurnConventionArg {
    /// Average only across days that recorded an outflow
    ActiveDays,
    /// Count quiet days as zero outflow
    CalendarDays,
}

impl From<BurnConventionArg> for BurnConvention {
    fn from(arg: BurnConventionArg) -> Self {
        match arg {
            BurnConventionArg::ActiveDays => BurnConvention::ActiveDays,
            BurnConventionArg::CalendarDays => BurnConvention::CalendarDays,
        }
    }
}
