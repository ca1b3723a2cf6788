//! Narrative rendering of an analysis
//!
//! A thin template consumer of the metrics and decision contracts; no
//! logic beyond formatting lives here.

use crate::decide::DecisionSet;
use crate::models::{MetricsSnapshot, Runway};

/// Render the snapshot and decisions as an executive-summary text block.
pub fn render_narrative(metrics: &MetricsSnapshot, decisions: &DecisionSet) -> String {
    let mut lines = Vec::new();

    lines.push("EXECUTIVE SUMMARY".to_string());
    lines.push(format!(
        "As of today, the liquid cash position is {:.0}.",
        metrics.cash_today
    ));
    match metrics.runway {
        Runway::Sustainable => {
            lines.push("The business is currently cash-flow positive.".to_string());
        }
        Runway::Days(days) if days >= 90 => {
            lines.push(format!("Runway is healthy at approximately {} days.", days));
        }
        Runway::Days(days) => {
            lines.push(format!(
                "URGENT: runway has dropped to {} days. Action is required to extend liquidity.",
                days
            ));
        }
    }

    lines.push(String::new());
    lines.push("UNIT ECONOMICS".to_string());
    lines.push(format!(
        "- Marketing intensity: ad spend is {:.1}% of total inflow.",
        metrics.ad_spend_ratio * 100.0
    ));
    lines.push(format!(
        "- Customer friction: the refund rate is {:.1}% of total inflow.",
        metrics.return_rate * 100.0
    ));

    lines.push(String::new());
    lines.push("RISKS".to_string());
    if decisions.risks.is_empty() {
        lines.push("- No structural risks detected in the recent transactions.".to_string());
    } else {
        for risk in &decisions.risks {
            lines.push(format!("- {}", risk.summary));
        }
    }

    lines.push(String::new());
    lines.push("RECOMMENDED ACTIONS".to_string());
    for action in &decisions.actions {
        lines.push(format!("- {}", action.recommendation));
    }

    lines.push(String::new());
    lines.push(
        "This analysis is heuristic pattern matching over the supplied transactions; \
         review it before major capital decisions."
            .to_string(),
    );

    lines.join("\n")
}
