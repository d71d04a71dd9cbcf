//! Threshold-driven alert evaluation over the aggregated summaries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use lens_config::{CostThresholds, LogThresholds};

use crate::cost::CostSummary;
use crate::logs::LogSummary;

/// Alert severity, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "LOW"),
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Which aggregate the alert came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Cost,
    Logs,
}

/// A threshold violation computed fresh each run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub message: String,
}

/// Applies the configured thresholds to aggregator outputs.
///
/// Evaluation order is fixed (cost alerts before log alerts; error
/// count, then warning count, then error rate) so identical input
/// always yields identically ordered alerts.
pub struct AlertEvaluator {
    cost_thresholds: CostThresholds,
    log_thresholds: LogThresholds,
}

impl AlertEvaluator {
    pub fn new(cost_thresholds: CostThresholds, log_thresholds: LogThresholds) -> Self {
        Self {
            cost_thresholds,
            log_thresholds,
        }
    }

    /// Evaluate both summaries and return all triggered alerts.
    pub fn evaluate(&self, cost: &CostSummary, logs: &LogSummary) -> Vec<Alert> {
        let mut alerts = self.cost_alerts(cost);
        alerts.extend(self.log_alerts(logs));
        debug!("Alert evaluation produced {} alert(s)", alerts.len());
        alerts
    }

    /// One high alert per service strictly above the high-cost share
    /// threshold.
    fn cost_alerts(&self, cost: &CostSummary) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for summary in cost.services.values() {
            let share = cost.share_percent(summary.total_cost);
            if share > self.cost_thresholds.high_cost_service_percent {
                alerts.push(Alert {
                    severity: AlertSeverity::High,
                    category: AlertCategory::Cost,
                    message: format!(
                        "{} accounts for {:.1}% of total costs (${:.2})",
                        summary.service, share, summary.total_cost
                    ),
                });
            }
        }

        alerts
    }

    fn log_alerts(&self, logs: &LogSummary) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let thresholds = &self.log_thresholds;

        if logs.error_count > thresholds.max_error_count {
            alerts.push(Alert {
                severity: AlertSeverity::Critical,
                category: AlertCategory::Logs,
                message: format!(
                    "{} errors detected (threshold: {})",
                    logs.error_count, thresholds.max_error_count
                ),
            });
        }

        if logs.warning_count > thresholds.max_warning_count {
            alerts.push(Alert {
                severity: AlertSeverity::Medium,
                category: AlertCategory::Logs,
                message: format!(
                    "{} warnings detected (threshold: {})",
                    logs.warning_count, thresholds.max_warning_count
                ),
            });
        }

        if logs.error_percentage > thresholds.max_error_rate_percent {
            alerts.push(Alert {
                severity: AlertSeverity::High,
                category: AlertCategory::Logs,
                message: format!(
                    "Error rate at {:.1}% (threshold: {}%)",
                    logs.error_percentage, thresholds.max_error_rate_percent
                ),
            });
        }

        alerts
    }
}
