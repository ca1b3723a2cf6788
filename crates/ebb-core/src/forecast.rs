//! Forward cash-trajectory simulation
//!
//! The only stateful/temporal component: a deterministic day-by-day walk
//! that carries the closing balance into the next day's opening. No
//! randomness, no cross-day feedback beyond the carried balance.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Category, ForecastPoint, ForecastSeries, Ledger};

/// Categories treated as fixed operating cost when deriving drivers.
const FIXED_COST_CATEGORIES: &[Category] = &[
    Category::Salary,
    Category::Rent,
    Category::Utilities,
    Category::Tax,
];

/// Daily averages that drive the simulation, derived from the ledger's
/// recent activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDrivers {
    pub avg_daily_sales: f64,
    pub avg_daily_ad_spend: f64,
    pub avg_daily_fixed_cost: f64,
    pub return_rate: f64,
}

impl ForecastDrivers {
    /// Derive drivers as daily means over days with matching activity,
    /// consistent with the active-days burn convention.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut sales: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut ads: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut fixed: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut total_inflow = 0.0;
        let mut refunds = 0.0;

        for tx in ledger.transactions() {
            if tx.amount > 0.0 {
                *sales.entry(tx.date).or_insert(0.0) += tx.amount;
                total_inflow += tx.amount;
            } else {
                let magnitude = tx.amount.abs();
                if tx.category == Category::Advertising {
                    *ads.entry(tx.date).or_insert(0.0) += magnitude;
                } else if FIXED_COST_CATEGORIES.contains(&tx.category) {
                    *fixed.entry(tx.date).or_insert(0.0) += magnitude;
                }
                if tx.category == Category::Refund {
                    refunds += magnitude;
                }
            }
        }

        fn mean(by_day: &BTreeMap<NaiveDate, f64>) -> f64 {
            if by_day.is_empty() {
                0.0
            } else {
                by_day.values().sum::<f64>() / by_day.len() as f64
            }
        }

        Self {
            avg_daily_sales: mean(&sales),
            avg_daily_ad_spend: mean(&ads),
            avg_daily_fixed_cost: mean(&fixed),
            return_rate: if total_inflow > 0.0 {
                refunds / total_inflow
            } else {
                0.0
            },
        }
    }
}

/// Inputs for one projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastParams {
    pub horizon_days: u32,
    /// Lag between a recorded sale and its cash settling (e.g.
    /// cash-on-delivery). Inflow is withheld entirely inside the window.
    pub collections_delay_days: u32,
    pub drivers: ForecastDrivers,
}

/// Simulate the cash trajectory for `horizon_days` starting the day after
/// `start_date`.
///
/// All-zero drivers produce a series flat at the starting cash; that is a
/// valid projection, not an error.
pub fn project(cash_today: f64, start_date: NaiveDate, params: &ForecastParams) -> ForecastSeries {
    let outflow = params.drivers.avg_daily_ad_spend + params.drivers.avg_daily_fixed_cost;
    let settled_inflow = params.drivers.avg_daily_sales * (1.0 - params.drivers.return_rate);

    let mut points = Vec::with_capacity(params.horizon_days as usize);
    let mut opening = cash_today;
    for day in 1..=params.horizon_days {
        let date = start_date + Duration::days(day as i64);
        let inflow = if day <= params.collections_delay_days {
            0.0
        } else {
            settled_inflow
        };
        let closing = opening + inflow - outflow;
        points.push(ForecastPoint {
            date,
            opening_cash: opening,
            inflow,
            outflow,
            closing_cash: closing,
        });
        opening = closing;
    }

    ForecastSeries::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tx(d: &str, amount: f64, category: Category) -> Transaction {
        Transaction {
            date: date(d),
            amount,
            description: String::new(),
            category,
        }
    }

    fn drivers(sales: f64, ads: f64, fixed: f64, return_rate: f64) -> ForecastDrivers {
        ForecastDrivers {
            avg_daily_sales: sales,
            avg_daily_ad_spend: ads,
            avg_daily_fixed_cost: fixed,
            return_rate,
        }
    }

    #[test]
    fn test_scenario_c_cash_out_on_day_four() {
        // 10000 starting cash, 3000/day of outflow, no sales.
        let series = project(
            10000.0,
            date("2025-01-31"),
            &ForecastParams {
                horizon_days: 5,
                collections_delay_days: 0,
                drivers: drivers(0.0, 2000.0, 1000.0, 0.0),
            },
        );

        let closings: Vec<f64> = series.points().iter().map(|p| p.closing_cash).collect();
        assert_eq!(closings, vec![7000.0, 4000.0, 1000.0, -2000.0, -5000.0]);

        let cash_out = series.cash_out().unwrap();
        assert_eq!(cash_out.date, date("2025-02-04"));
        assert_eq!(cash_out.closing_cash, -2000.0);
    }

    #[test]
    fn test_series_has_exactly_horizon_points() {
        let series = project(
            1000.0,
            date("2025-01-01"),
            &ForecastParams {
                horizon_days: 60,
                collections_delay_days: 7,
                drivers: drivers(100.0, 10.0, 20.0, 0.1),
            },
        );
        assert_eq!(series.len(), 60);
    }

    #[test]
    fn test_daily_delta_identity_and_chaining() {
        let series = project(
            5000.0,
            date("2025-01-01"),
            &ForecastParams {
                horizon_days: 30,
                collections_delay_days: 5,
                drivers: drivers(300.0, 50.0, 75.0, 0.15),
            },
        );

        let points = series.points();
        for point in points {
            assert!(
                (point.closing_cash - point.opening_cash - (point.inflow - point.outflow)).abs()
                    < 1e-9
            );
        }
        for pair in points.windows(2) {
            assert_eq!(pair[1].opening_cash, pair[0].closing_cash);
        }
        assert_eq!(points[0].opening_cash, 5000.0);
    }

    #[test]
    fn test_inflow_withheld_during_collections_delay() {
        let series = project(
            1000.0,
            date("2025-01-01"),
            &ForecastParams {
                horizon_days: 10,
                collections_delay_days: 7,
                drivers: drivers(200.0, 0.0, 0.0, 0.25),
            },
        );

        for (idx, point) in series.points().iter().enumerate() {
            let day = idx as u32 + 1;
            if day <= 7 {
                assert_eq!(point.inflow, 0.0, "day {}", day);
            } else {
                // Settled inflow is net of returns.
                assert_eq!(point.inflow, 150.0, "day {}", day);
            }
        }
    }

    #[test]
    fn test_zero_drivers_flat_series() {
        let series = project(
            12345.0,
            date("2025-01-01"),
            &ForecastParams {
                horizon_days: 14,
                collections_delay_days: 3,
                drivers: ForecastDrivers::default(),
            },
        );
        assert_eq!(series.len(), 14);
        assert!(series.points().iter().all(|p| p.closing_cash == 12345.0));
        assert!(series.cash_out().is_none());
    }

    #[test]
    fn test_drivers_from_ledger() {
        let ledger = Ledger::from_transactions(vec![
            // Two sales days: 1000 and 3000 → avg 2000.
            tx("2025-01-01", 1000.0, Category::Other),
            tx("2025-01-02", 3000.0, Category::Other),
            // One ad day: 400.
            tx("2025-01-02", -400.0, Category::Advertising),
            // Two fixed-cost days: 500 (rent) and 300 (salary) → avg 400.
            tx("2025-01-01", -500.0, Category::Rent),
            tx("2025-01-03", -300.0, Category::Salary),
            // Refunds: 200 against 4000 of inflow → 5%.
            tx("2025-01-03", -200.0, Category::Refund),
        ]);

        let drivers = ForecastDrivers::from_ledger(&ledger);
        assert_eq!(drivers.avg_daily_sales, 2000.0);
        assert_eq!(drivers.avg_daily_ad_spend, 400.0);
        assert_eq!(drivers.avg_daily_fixed_cost, 400.0);
        assert!((drivers.return_rate - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_drivers_from_empty_ledger() {
        let drivers = ForecastDrivers::from_ledger(&Ledger::from_transactions(vec![]));
        assert_eq!(drivers, ForecastDrivers::default());
    }
}
