//! One-shot analysis pipeline: raw table in, full report out
//!
//! Each invocation builds a fresh ledger, snapshot, forecast, and decision
//! set from the caller's table and configuration; nothing is shared across
//! requests. A schema failure is the only fatal outcome — everything else
//! degrades to zeros or sentinels and still yields a complete report.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{Classify, KeywordClassifier};
use crate::decide::{self, DecisionSet, Thresholds};
use crate::error::Result;
use crate::forecast::{self, ForecastDrivers, ForecastParams};
use crate::import::{self, RawTable};
use crate::metrics::{self, BurnConvention};
use crate::models::{ForecastSeries, Ledger, MetricsSnapshot};
use crate::report;

/// Caller-supplied configuration for one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cash on hand before the first transaction in the table.
    pub opening_balance: f64,
    pub collections_delay_days: u32,
    pub horizon_days: u32,
    pub burn_convention: BurnConvention,
    pub thresholds: Thresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            opening_balance: 0.0,
            collections_delay_days: 7,
            horizon_days: 60,
            burn_convention: BurnConvention::default(),
            thresholds: Thresholds::default(),
        }
    }
}

/// The complete output contract for one request, consumed by presentation
/// layers (text report, JSON, charts).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metrics: MetricsSnapshot,
    pub forecast: ForecastSeries,
    pub decisions: DecisionSet,
    pub narrative: String,
}

/// Run the full pipeline with the default keyword classifier.
pub fn analyze(table: &RawTable, config: &AnalysisConfig) -> Result<AnalysisReport> {
    analyze_with(table, config, &KeywordClassifier::default())
}

/// Run the full pipeline with a caller-supplied classifier.
pub fn analyze_with(
    table: &RawTable,
    config: &AnalysisConfig,
    classifier: &dyn Classify,
) -> Result<AnalysisReport> {
    let transactions = import::normalize(table)?;
    let ledger = Ledger::new(transactions, classifier);
    debug!(transactions = ledger.len(), "ledger built");

    let metrics = metrics::compute(&ledger, config.opening_balance, config.burn_convention);

    let drivers = ForecastDrivers::from_ledger(&ledger);
    let start_date = ledger.last_date().unwrap_or_else(|| Utc::now().date_naive());
    let forecast = forecast::project(
        metrics.cash_today,
        start_date,
        &ForecastParams {
            horizon_days: config.horizon_days,
            collections_delay_days: config.collections_delay_days,
            drivers,
        },
    );

    let decisions = decide::evaluate(&metrics, &config.thresholds);
    let narrative = report::render_narrative(&metrics, &decisions);

    Ok(AnalysisReport {
        metrics,
        forecast,
        decisions,
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decide::RuleKind;
    use crate::error::{Error, SchemaRole};
    use crate::models::Runway;

    fn table(csv: &str) -> RawTable {
        RawTable::from_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario_a() {
        // The canonical minimal schema with an explicit type column.
        let table = table(
            "date,amount,type,description\n\
             2025-01-01,42000,Inflow,Sales\n\
             2025-01-02,-15000,Outflow,Facebook Ads\n\
             2025-01-03,-8000,Outflow,Salary\n",
        );
        let report = analyze(&table, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.metrics.cash_today, 19000.0);
        assert!((report.metrics.ad_spend_ratio - 15000.0 / 42000.0).abs() < 1e-9);
        assert!(report
            .decisions
            .risks
            .iter()
            .any(|r| r.kind == RuleKind::AdvertisingDependency));
        assert_eq!(report.forecast.len(), 60);
        assert!(report.narrative.contains("EXECUTIVE SUMMARY"));
    }

    #[test]
    fn test_end_to_end_inflow_only_gets_maintain_action() {
        let table = table(
            "date,amount,description\n\
             2025-01-01,1000,Sales\n\
             2025-01-02,2000,Sales\n",
        );
        let report = analyze(&table, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.metrics.avg_daily_burn, 0.0);
        assert_eq!(report.metrics.runway, Runway::Sustainable);
        assert!(report.decisions.risks.is_empty());
        assert_eq!(report.decisions.actions.len(), 1);
        assert_eq!(report.decisions.actions[0].kind, RuleKind::Maintain);
    }

    #[test]
    fn test_forecast_anchored_at_last_ledger_date() {
        let table = table(
            "date,amount,description\n\
             2025-01-01,1000,Sales\n\
             2025-01-05,2000,Sales\n",
        );
        let report = analyze(&table, &AnalysisConfig::default()).unwrap();
        assert_eq!(
            report.forecast.points()[0].date,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_schema_failure_propagates() {
        let err = analyze(
            &table("foo,bar\n1,2\n"),
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaRole::Date)));
    }

    #[test]
    fn test_empty_table_still_yields_complete_report() {
        let report = analyze(
            &table("date,amount,description\n"),
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(report.metrics.cash_today, 0.0);
        assert_eq!(report.metrics.runway, Runway::Sustainable);
        assert_eq!(report.forecast.len(), 60);
        assert!(report.forecast.points().iter().all(|p| p.closing_cash == 0.0));
    }

    #[test]
    fn test_custom_thresholds_change_decisions() {
        let table = table(
            "date,amount,type,description\n\
             2025-01-01,42000,Inflow,Sales\n\
             2025-01-02,-15000,Outflow,Facebook Ads\n",
        );
        let config = AnalysisConfig {
            thresholds: Thresholds {
                max_ad_spend_ratio: 0.50,
                ..Thresholds::default()
            },
            ..AnalysisConfig::default()
        };
        let report = analyze(&table, &config).unwrap();
        assert!(report
            .decisions
            .risks
            .iter()
            .all(|r| r.kind != RuleKind::AdvertisingDependency));
    }
}
