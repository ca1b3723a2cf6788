//! Metrics command implementation

use anyhow::Result;
use ebb_core::{MetricsSnapshot, Runway};

use super::build_ledger;
use crate::cli::InputArgs;

pub(crate) fn print_metrics(metrics: &MetricsSnapshot) {
    println!();
    println!("📊 Cash Metrics");
    println!("   ─────────────────────────────────────────────");
    println!("   Cash today:        {:>14.2}", metrics.cash_today);
    println!("   Avg daily burn:    {:>14.2}", metrics.avg_daily_burn);
    match metrics.runway {
        Runway::Sustainable => {
            println!("   Runway:            sustainable (cash-flow positive)");
        }
        Runway::Days(days) => println!("   Runway:            {} days", days),
    }
    println!(
        "   Ad spend ratio:    {:>13.1}%",
        metrics.ad_spend_ratio * 100.0
    );
    println!(
        "   Return rate:       {:>13.1}%",
        metrics.return_rate * 100.0
    );

    if !metrics.category_breakdown.is_empty() {
        println!();
        println!("   {:15} │ {:>12}", "Category", "Outflow");
        println!("   ────────────────┼─────────────");
        for row in &metrics.category_breakdown {
            println!("   {:15} │ {:>12.2}", row.category.as_str(), row.outflow);
        }
    }
}

pub fn cmd_metrics(input: &InputArgs, daily: bool) -> Result<()> {
    let ledger = build_ledger(input)?;
    let metrics =
        ebb_core::metrics::compute(&ledger, input.opening_balance, input.burn_convention.into());
    print_metrics(&metrics);

    if daily {
        let rows = ebb_core::metrics::daily_cashflow(&ledger, input.opening_balance);
        println!();
        println!("📅 Daily Cash Position");
        println!(
            "   {:10} │ {:>10} │ {:>10} │ {:>12}",
            "Date", "Inflow", "Outflow", "Closing"
        );
        println!("   ───────────┼────────────┼────────────┼─────────────");
        for row in rows {
            println!(
                "   {:10} │ {:>10.2} │ {:>10.2} │ {:>12.2}",
                row.date, row.inflow, row.outflow, row.closing
            );
        }
    }

    Ok(())
}
