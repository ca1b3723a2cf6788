//! Cash-position metrics derived from a ledger
//!
//! Every figure is a pure function of (ledger, opening balance); an empty
//! ledger yields all-zero/sentinel metrics rather than an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, CategoryOutflow, DailyCash, Ledger, MetricsSnapshot, Runway};

/// How zero-outflow days enter the daily-burn average.
///
/// The two readings materially change runway figures, so the choice is an
/// explicit configuration rather than an accidental default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnConvention {
    /// Average only across days that recorded at least one outflow.
    #[default]
    ActiveDays,
    /// Divide total outflow by the full ledger date span, counting quiet
    /// days as zero.
    CalendarDays,
}

/// Division guard: a zero denominator resolves to zero, never a panic.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Compute the metrics snapshot for one ledger.
pub fn compute(ledger: &Ledger, opening_balance: f64, convention: BurnConvention) -> MetricsSnapshot {
    let cash_today = opening_balance
        + ledger
            .transactions()
            .iter()
            .map(|tx| tx.amount)
            .sum::<f64>();

    let mut outflow_by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut outflow_by_category: BTreeMap<Category, f64> = BTreeMap::new();
    let mut total_inflow = 0.0;
    for tx in ledger.transactions() {
        if tx.amount < 0.0 {
            *outflow_by_day.entry(tx.date).or_insert(0.0) += tx.amount.abs();
            *outflow_by_category.entry(tx.category).or_insert(0.0) += tx.amount.abs();
        } else {
            total_inflow += tx.amount;
        }
    }

    let total_outflow: f64 = outflow_by_day.values().sum();
    let avg_daily_burn = match convention {
        BurnConvention::ActiveDays => ratio(total_outflow, outflow_by_day.len() as f64),
        BurnConvention::CalendarDays => {
            let span_days = match (ledger.first_date(), ledger.last_date()) {
                (Some(first), Some(last)) => (last - first).num_days() + 1,
                _ => 0,
            };
            ratio(total_outflow, span_days as f64)
        }
    };

    let runway = if avg_daily_burn <= 0.0 {
        Runway::Sustainable
    } else {
        Runway::Days((cash_today / avg_daily_burn).floor() as i64)
    };

    let ad_spend = outflow_by_category
        .get(&Category::Advertising)
        .copied()
        .unwrap_or(0.0);
    let refunds = outflow_by_category
        .get(&Category::Refund)
        .copied()
        .unwrap_or(0.0);

    let mut category_breakdown: Vec<CategoryOutflow> = outflow_by_category
        .into_iter()
        .map(|(category, outflow)| CategoryOutflow { category, outflow })
        .collect();
    category_breakdown.sort_by(|a, b| {
        b.outflow
            .partial_cmp(&a.outflow)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    MetricsSnapshot {
        cash_today,
        avg_daily_burn,
        runway,
        ad_spend_ratio: ratio(ad_spend, total_inflow),
        return_rate: ratio(refunds, total_inflow),
        category_breakdown,
    }
}

/// Per-day inflow/outflow and the running closing balance across the
/// ledger's recorded days.
pub fn daily_cashflow(ledger: &Ledger, opening_balance: f64) -> Vec<DailyCash> {
    let mut by_day: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for tx in ledger.transactions() {
        let entry = by_day.entry(tx.date).or_insert((0.0, 0.0));
        if tx.amount >= 0.0 {
            entry.0 += tx.amount;
        } else {
            entry.1 += tx.amount.abs();
        }
    }

    let mut closing = opening_balance;
    by_day
        .into_iter()
        .map(|(date, (inflow, outflow))| {
            closing += inflow - outflow;
            DailyCash {
                date,
                inflow,
                outflow,
                net: inflow - outflow,
                closing,
            }
        })
        .collect()
}
