//! Core data model for one analysis request
//!
//! Everything here is constructed fresh per request from caller-supplied
//! raw data and configuration; nothing carries state across analyses.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::Classify;

/// Semantic category assigned to a transaction description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Advertising,
    Salary,
    Rent,
    Utilities,
    Tax,
    Refund,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Advertising => "advertising",
            Category::Salary => "salary",
            Category::Rent => "rent",
            Category::Utilities => "utilities",
            Category::Tax => "tax",
            Category::Refund => "refund",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advertising" => Ok(Category::Advertising),
            "salary" => Ok(Category::Salary),
            "rent" => Ok(Category::Rent),
            "utilities" => Ok(Category::Utilities),
            "tax" => Ok(Category::Tax),
            "refund" => Ok(Category::Refund),
            "other" => Ok(Category::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// One reconciled transaction. The sign of `amount` reflects actual cash
/// direction: positive is an inflow, negative an outflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: Category,
}

/// The canonical transaction set for one analysis run.
///
/// Sorted ascending by date at construction and read-only afterwards;
/// every downstream view (sums, forecasts) is computed fresh from it.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Build a ledger from reconciled transactions, assigning each one a
    /// category from the classifier.
    pub fn new(mut transactions: Vec<Transaction>, classifier: &dyn Classify) -> Self {
        for tx in &mut transactions {
            tx.category = classifier.classify(&tx.description);
        }
        transactions.sort_by_key(|tx| tx.date);
        Self { transactions }
    }

    /// Build a ledger from transactions that already carry categories.
    pub fn from_transactions(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|tx| tx.date);
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.transactions.first().map(|tx| tx.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.transactions.last().map(|tx| tx.date)
    }
}

/// Time until the cash position is depleted at the current burn rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runway {
    /// Whole days of runway left at the current burn rate.
    Days(i64),
    /// Net cash-positive: the current burn never depletes the balance.
    Sustainable,
}

impl Runway {
    pub fn is_sustainable(&self) -> bool {
        matches!(self, Runway::Sustainable)
    }

    /// Runway expressed in 30-day months, absent for the sentinel.
    pub fn months(&self) -> Option<f64> {
        match self {
            Runway::Days(days) => Some(*days as f64 / 30.0),
            Runway::Sustainable => None,
        }
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Days(days) => write!(f, "{} days", days),
            Runway::Sustainable => write!(f, "sustainable"),
        }
    }
}

/// Total outflow recorded against one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutflow {
    pub category: Category,
    pub outflow: f64,
}

/// Aggregate cash-health snapshot: a pure function of (ledger, opening
/// balance), never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cash_today: f64,
    pub avg_daily_burn: f64,
    pub runway: Runway,
    pub ad_spend_ratio: f64,
    pub return_rate: f64,
    /// Outflow per category, descending by magnitude.
    pub category_breakdown: Vec<CategoryOutflow>,
}

/// One simulated day of the forward cash trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub opening_cash: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub closing_cash: f64,
}

/// Ordered day-by-day projection, one point per horizon day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The cash-out date: the first day whose closing cash crosses zero.
    /// Absent if the trajectory never goes negative within the horizon.
    pub fn cash_out(&self) -> Option<&ForecastPoint> {
        self.points.iter().find(|p| p.closing_cash < 0.0)
    }
}

/// Per-day inflow/outflow and the running closing balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCash {
    pub date: NaiveDate,
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
    pub closing: f64,
}
