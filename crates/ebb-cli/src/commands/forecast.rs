//! Forecast command implementation

use anyhow::Result;
use chrono::Utc;
use ebb_core::{ForecastDrivers, ForecastParams, ForecastSeries};

use super::build_ledger;
use crate::cli::InputArgs;

pub(crate) fn print_forecast(series: &ForecastSeries) {
    println!();
    println!("📈 Cash Forecast ({} days)", series.len());
    println!(
        "   {:10} │ {:>12} │ {:>10} │ {:>10} │ {:>12}",
        "Date", "Opening", "Inflow", "Outflow", "Closing"
    );
    println!("   ───────────┼──────────────┼────────────┼────────────┼─────────────");
    for point in series.points() {
        println!(
            "   {:10} │ {:>12.2} │ {:>10.2} │ {:>10.2} │ {:>12.2}",
            point.date, point.opening_cash, point.inflow, point.outflow, point.closing_cash
        );
    }

    println!();
    match series.cash_out() {
        Some(point) => println!("⚠️  Projected cash-out date: {}", point.date),
        None => println!("✅ Cash stays positive for the whole horizon."),
    }
}

pub fn cmd_forecast(input: &InputArgs, horizon: u32, collections_delay: u32) -> Result<()> {
    let ledger = build_ledger(input)?;
    let metrics =
        ebb_core::metrics::compute(&ledger, input.opening_balance, input.burn_convention.into());

    let drivers = ForecastDrivers::from_ledger(&ledger);
    let start_date = ledger.last_date().unwrap_or_else(|| Utc::now().date_naive());
    let series = ebb_core::forecast::project(
        metrics.cash_today,
        start_date,
        &ForecastParams {
            horizon_days: horizon,
            collections_delay_days: collections_delay,
            drivers,
        },
    );

    print_forecast(&series);
    Ok(())
}
