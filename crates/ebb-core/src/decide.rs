//! Threshold rules that turn a metrics snapshot into risks and actions
//!
//! Rules are evaluated independently in a fixed order, so several can fire
//! and the resulting risk/action ordering is deterministic. Boundaries are
//! exclusive: a metric sitting exactly on its threshold does not fire.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{MetricsSnapshot, Runway};

/// Which rule produced a risk or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    AdvertisingDependency,
    ElevatedReturnRate,
    ShortRunway,
    Maintain,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::AdvertisingDependency => "advertising_dependency",
            RuleKind::ElevatedReturnRate => "elevated_return_rate",
            RuleKind::ShortRunway => "short_runway",
            RuleKind::Maintain => "maintain",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub kind: RuleKind,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: RuleKind,
    pub recommendation: String,
}

/// Ordered risk flags and recommended actions for one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionSet {
    pub risks: Vec<Risk>,
    pub actions: Vec<Action>,
}

/// Rule thresholds. Any subset can be overridden from a TOML file; absent
/// keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Advertising outflow as a share of inflow above which the business
    /// counts as advertising-dependent.
    pub max_ad_spend_ratio: f64,
    /// Refund outflow as a share of inflow above which returns count as
    /// elevated.
    pub max_return_rate: f64,
    /// Runway below this many days counts as short.
    pub min_runway_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_ad_spend_ratio: 0.30,
            max_return_rate: 0.20,
            min_runway_days: 60,
        }
    }
}

impl Thresholds {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Apply the rule set to a snapshot.
pub fn evaluate(metrics: &MetricsSnapshot, thresholds: &Thresholds) -> DecisionSet {
    let mut decisions = DecisionSet::default();

    if metrics.ad_spend_ratio > thresholds.max_ad_spend_ratio {
        decisions.risks.push(Risk {
            kind: RuleKind::AdvertisingDependency,
            summary: format!(
                "Advertising absorbs {:.1}% of inflow, above the {:.0}% threshold",
                metrics.ad_spend_ratio * 100.0,
                thresholds.max_ad_spend_ratio * 100.0
            ),
        });
        decisions.actions.push(Action {
            kind: RuleKind::AdvertisingDependency,
            recommendation: "Audit ad ROI and pause underperforming campaigns".to_string(),
        });
    }

    if metrics.return_rate > thresholds.max_return_rate {
        decisions.risks.push(Risk {
            kind: RuleKind::ElevatedReturnRate,
            summary: format!(
                "Refunds run at {:.1}% of inflow, above the {:.0}% threshold",
                metrics.return_rate * 100.0,
                thresholds.max_return_rate * 100.0
            ),
        });
        decisions.actions.push(Action {
            kind: RuleKind::ElevatedReturnRate,
            recommendation: "Investigate product quality and fulfillment issues".to_string(),
        });
    }

    if let Runway::Days(days) = metrics.runway {
        if days < thresholds.min_runway_days {
            decisions.risks.push(Risk {
                kind: RuleKind::ShortRunway,
                summary: format!(
                    "Runway is down to {} days, below the {}-day floor",
                    days, thresholds.min_runway_days
                ),
            });
            decisions.actions.push(Action {
                kind: RuleKind::ShortRunway,
                recommendation: "Cut discretionary spend and accelerate collections".to_string(),
            });
        }
    }

    if decisions.risks.is_empty() && decisions.actions.is_empty() {
        decisions.actions.push(Action {
            kind: RuleKind::Maintain,
            recommendation: "Maintain current position and re-evaluate periodically".to_string(),
        });
    }

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Runway;
    use std::io::Write;

    fn snapshot(ad_spend_ratio: f64, return_rate: f64, runway: Runway) -> MetricsSnapshot {
        MetricsSnapshot {
            cash_today: 10000.0,
            avg_daily_burn: 100.0,
            runway,
            ad_spend_ratio,
            return_rate,
            category_breakdown: vec![],
        }
    }

    #[test]
    fn test_ad_spend_boundary_is_exclusive() {
        let thresholds = Thresholds::default();

        // Exactly at the threshold: does not fire.
        let at = evaluate(&snapshot(0.30, 0.0, Runway::Sustainable), &thresholds);
        assert!(at.risks.is_empty());

        // Just above: fires.
        let above = evaluate(&snapshot(0.301, 0.0, Runway::Sustainable), &thresholds);
        assert_eq!(above.risks.len(), 1);
        assert_eq!(above.risks[0].kind, RuleKind::AdvertisingDependency);
    }

    #[test]
    fn test_scenario_a_fires_advertising_dependency() {
        let decisions = evaluate(
            &snapshot(15000.0 / 42000.0, 0.0, Runway::Sustainable),
            &Thresholds::default(),
        );
        assert!(decisions
            .risks
            .iter()
            .any(|r| r.kind == RuleKind::AdvertisingDependency));
    }

    #[test]
    fn test_return_rate_rule() {
        let thresholds = Thresholds::default();
        let at = evaluate(&snapshot(0.0, 0.20, Runway::Sustainable), &thresholds);
        assert!(at.risks.is_empty());

        let above = evaluate(&snapshot(0.0, 0.21, Runway::Sustainable), &thresholds);
        assert_eq!(above.risks[0].kind, RuleKind::ElevatedReturnRate);
    }

    #[test]
    fn test_runway_rule_boundary() {
        let thresholds = Thresholds::default();

        let at = evaluate(&snapshot(0.0, 0.0, Runway::Days(60)), &thresholds);
        assert!(at.risks.is_empty());

        let below = evaluate(&snapshot(0.0, 0.0, Runway::Days(59)), &thresholds);
        assert_eq!(below.risks[0].kind, RuleKind::ShortRunway);
    }

    #[test]
    fn test_sustainable_runway_never_short() {
        let decisions = evaluate(
            &snapshot(0.0, 0.0, Runway::Sustainable),
            &Thresholds::default(),
        );
        assert!(decisions
            .risks
            .iter()
            .all(|r| r.kind != RuleKind::ShortRunway));
    }

    #[test]
    fn test_multiple_rules_fire_in_fixed_order() {
        let decisions = evaluate(
            &snapshot(0.5, 0.3, Runway::Days(10)),
            &Thresholds::default(),
        );
        let kinds: Vec<RuleKind> = decisions.risks.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::AdvertisingDependency,
                RuleKind::ElevatedReturnRate,
                RuleKind::ShortRunway,
            ]
        );
        assert_eq!(decisions.actions.len(), 3);
    }

    #[test]
    fn test_maintain_action_when_no_rule_fires() {
        // Scenario B: healthy snapshot gets the default action only.
        let decisions = evaluate(
            &snapshot(0.0, 0.0, Runway::Sustainable),
            &Thresholds::default(),
        );
        assert!(decisions.risks.is_empty());
        assert_eq!(decisions.actions.len(), 1);
        assert_eq!(decisions.actions[0].kind, RuleKind::Maintain);
        assert!(decisions.actions[0]
            .recommendation
            .starts_with("Maintain current position"));
    }

    #[test]
    fn test_thresholds_partial_toml_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_ad_spend_ratio = 0.5").unwrap();

        let thresholds = Thresholds::load(file.path()).unwrap();
        assert_eq!(thresholds.max_ad_spend_ratio, 0.5);
        // Unspecified keys keep their defaults.
        assert_eq!(thresholds.max_return_rate, 0.20);
        assert_eq!(thresholds.min_runway_days, 60);
    }
}
