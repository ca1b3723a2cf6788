//! Normalization of heterogeneous tabular exports into canonical transactions
//!
//! Bank statements, POS/Shopify exports, and hand-kept ledgers arrive with
//! unknown column names, casing, and date formats. Column detection is one
//! data-driven pass over an ordered candidate table; sign reconciliation
//! follows a fixed priority ladder so the resulting amounts always reflect
//! actual cash direction.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result, SchemaRole};
use crate::models::{Category, Transaction};

/// Raw tabular input: one header row plus data rows. CSV is the common
/// carrier, but any table source can construct one directly.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// How the table encodes amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AmountColumns {
    /// A single (possibly signed) amount column.
    Single(usize),
    /// An outflow/inflow column pair; amount = inflow − outflow.
    Paired { outflow: usize, inflow: usize },
}

/// Resolved mapping from canonical roles to column indices.
#[derive(Debug, Clone)]
struct SchemaMap {
    date: usize,
    description: usize,
    amount: AmountColumns,
    /// Optional type/direction column (`DR`/`CR`, `Inflow`/`Outflow`).
    kind: Option<usize>,
}

// Candidate header substrings per canonical role, in priority order.
// Matching is case-insensitive substring containment.
const DATE_HINTS: &[&str] = &["date", "posted", "day"];
const DESCRIPTION_HINTS: &[&str] = &[
    "description",
    "narration",
    "particulars",
    "details",
    "memo",
    "remarks",
    "merchant",
];
const AMOUNT_HINTS: &[&str] = &["amount", "value"];
const KIND_HINTS: &[&str] = &["type", "dr/cr", "cr/dr", "direction"];

/// Paired amount representations, tried in priority order once no
/// explicit amount column exists.
const PAIR_HINTS: &[(&str, &str)] = &[
    ("debit", "credit"),
    ("withdrawal", "deposit"),
    ("outflow", "inflow"),
];

/// Descriptions matching these force a negative amount when neither a
/// signed column, a pair, nor a type label settles the direction.
const EXPENSE_KEYWORDS: &[&str] = &[
    "rent", "lease", "salary", "wage", "payroll", "ad", "ads", "marketing", "tax", "gst",
    "electric", "water", "internet", "utilit", "phone", "insurance", "emi", "supplier", "vendor",
    "purchase", "fee",
];

/// First header (in hint priority order) containing a hint and not
/// already claimed by another role.
fn find_column(headers: &[String], hints: &[&str], claimed: &[usize]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for hint in hints {
        for (idx, header) in lowered.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            if header.contains(hint) {
                return Some(idx);
            }
        }
    }
    None
}

fn resolve_schema(headers: &[String]) -> Result<SchemaMap> {
    let mut claimed = Vec::new();

    let date = find_column(headers, DATE_HINTS, &claimed).ok_or(Error::Schema(SchemaRole::Date))?;
    claimed.push(date);

    let description = find_column(headers, DESCRIPTION_HINTS, &claimed)
        .ok_or(Error::Schema(SchemaRole::Description))?;
    claimed.push(description);

    // An explicit amount column takes precedence over any pair.
    let amount = if let Some(idx) = find_column(headers, AMOUNT_HINTS, &claimed) {
        claimed.push(idx);
        AmountColumns::Single(idx)
    } else {
        let mut found = None;
        for &(outflow_hint, inflow_hint) in PAIR_HINTS {
            let outflow = find_column(headers, &[outflow_hint], &claimed);
            let inflow = find_column(headers, &[inflow_hint], &claimed);
            if let (Some(outflow), Some(inflow)) = (outflow, inflow) {
                claimed.push(outflow);
                claimed.push(inflow);
                found = Some(AmountColumns::Paired { outflow, inflow });
                break;
            }
        }
        found.ok_or(Error::Schema(SchemaRole::Amount))?
    };

    let kind = find_column(headers, KIND_HINTS, &claimed);

    Ok(SchemaMap {
        date,
        description,
        amount,
        kind,
    })
}

/// Strip everything except digits, a single decimal point, and a leading
/// minus sign. A cell that still fails to parse resolves to zero, not an
/// error.
fn clean_amount(raw: &str) -> f64 {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_point = false;
    for ch in raw.trim().chars() {
        match ch {
            '0'..='9' => cleaned.push(ch),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(ch);
            }
            '-' if cleaned.is_empty() => cleaned.push(ch),
            _ => {}
        }
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // 2024-01-15
    "%d-%m-%Y", // 15-01-2024
    "%m/%d/%Y", // 01/15/2024
    "%d/%m/%Y", // 15/01/2024 (European/Indian)
    "%m/%d/%y", // 01/15/24
    "%Y/%m/%d", // 2024/01/15
    "%d %b %Y", // 15 Jan 2024
    "%d-%b-%Y", // 15-Jan-2024
    "%b %d, %Y", // Jan 15, 2024
];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Sign forced by a type/direction label, if the label is recognized.
fn sign_from_label(label: &str) -> Option<f64> {
    match label.trim().to_lowercase().as_str() {
        "dr" | "d" | "debit" | "outflow" | "out" | "withdrawal" | "expense" => Some(-1.0),
        "cr" | "c" | "credit" | "inflow" | "in" | "deposit" | "income" => Some(1.0),
        _ => None,
    }
}

fn is_expense_description(description: &str) -> bool {
    let d = description.to_lowercase();
    EXPENSE_KEYWORDS.iter().any(|k| d.contains(k))
}

/// Resolve a raw table into sign-consistent transactions, sorted
/// ascending by date.
///
/// Individual rows whose date or amount cannot be resolved are dropped
/// with a debug trace; only an unresolvable schema aborts the whole
/// operation.
pub fn normalize(table: &RawTable) -> Result<Vec<Transaction>> {
    let schema = resolve_schema(table.headers())?;

    let mut pending = Vec::with_capacity(table.rows().len());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let date = match row.get(schema.date).and_then(|c| parse_date(c)) {
            Some(date) => date,
            None => {
                debug!(row = row_idx, "skipping row with unresolvable date");
                continue;
            }
        };

        let description = row
            .get(schema.description)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        let amount = match schema.amount {
            AmountColumns::Single(idx) => {
                clean_amount(row.get(idx).map(String::as_str).unwrap_or(""))
            }
            AmountColumns::Paired { outflow, inflow } => {
                let outflow = clean_amount(row.get(outflow).map(String::as_str).unwrap_or(""));
                let inflow = clean_amount(row.get(inflow).map(String::as_str).unwrap_or(""));
                inflow.abs() - outflow.abs()
            }
        };
        if !amount.is_finite() {
            debug!(row = row_idx, "skipping row with non-finite amount");
            continue;
        }

        let label = schema
            .kind
            .and_then(|idx| row.get(idx))
            .map(|c| c.to_string());

        pending.push((date, description, amount, label));
    }

    // Sign reconciliation. An explicitly signed column is trusted only
    // when it already carries both directions; a pair has encoded the
    // direction structurally.
    let signed_trusted = matches!(schema.amount, AmountColumns::Single(_))
        && pending.iter().any(|p| p.2 > 0.0)
        && pending.iter().any(|p| p.2 < 0.0);
    let paired = matches!(schema.amount, AmountColumns::Paired { .. });

    let mut transactions: Vec<Transaction> = pending
        .into_iter()
        .map(|(date, description, amount, label)| {
            let amount = if signed_trusted || paired {
                amount
            } else if let Some(sign) = label.as_deref().and_then(sign_from_label) {
                sign * amount.abs()
            } else if is_expense_description(&description) {
                -amount.abs()
            } else {
                amount.abs()
            };
            Transaction {
                date,
                amount,
                description,
                category: Category::Other,
            }
        })
        .collect();

    transactions.sort_by_key(|tx| tx.date);
    debug!(transactions = transactions.len(), "normalized table");
    Ok(transactions)
}
