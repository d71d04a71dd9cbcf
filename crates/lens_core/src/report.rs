//! Final report assembly.
//!
//! Combines the aggregated summaries, alerts, and health score into the
//! structured payload the dashboard consumes, plus a rendered plain-text
//! report. Assembly is a pure function of its inputs; only the run id
//! and timestamp differ between runs on identical data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use lens_config::LogThresholds;

use crate::alerts::Alert;
use crate::cost::{CostSummary, DateRange, TrendDirection};
use crate::health::HealthScore;
use crate::logs::LogSummary;

/// Share of total cost above which a service earns a recommendation.
const HIGH_SHARE_PERCENT: f64 = 30.0;

/// Overall direction indicator for the dashboard, derived from the
/// current run's error rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallTrend {
    Up,
    Down,
    Neutral,
}

/// Severity counts surfaced to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLevelCounts {
    pub error: u64,
    pub warning: u64,
    pub info: u64,
}

/// One row of the per-service cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownEntry {
    pub service: String,
    pub cost: f64,
    pub percentage: f64,
    pub trend_direction: TrendDirection,
}

/// A named entity detected by the text analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    pub text: String,
    pub kind: String,
    pub confidence: f64,
}

/// Distilled enrichment results carried in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub cost_key_phrases: Vec<String>,
    pub cost_sentiment: Option<String>,
    pub log_key_phrases: Vec<String>,
    pub log_sentiment: Option<String>,
    pub entities: Vec<DetectedEntity>,
}

/// The assembled analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub project_name: String,
    pub cost_summary_text: String,
    pub log_summary_text: String,
    pub log_health_status: crate::health::HealthStatus,
    pub health_score: u8,
    pub health_reason: String,
    pub trend: OverallTrend,
    pub log_levels: LogLevelCounts,
    pub alerts: Vec<Alert>,
    pub cost_breakdown: Vec<CostBreakdownEntry>,
    pub recommendations: Vec<String>,
    pub total_services: usize,
    pub date_range: Option<DateRange>,
    pub source_breakdown: BTreeMap<String, u64>,
    pub issue_patterns: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightsSummary>,
}

/// Builds the final report from the pipeline stage outputs without
/// mutating any of them.
pub struct ReportAssembler {
    project_name: String,
    log_thresholds: LogThresholds,
}

impl ReportAssembler {
    pub fn new(project_name: impl Into<String>, log_thresholds: LogThresholds) -> Self {
        Self {
            project_name: project_name.into(),
            log_thresholds,
        }
    }

    /// Assemble the report payload.
    pub fn assemble(
        &self,
        cost: &CostSummary,
        logs: &LogSummary,
        alerts: &[Alert],
        health: &HealthScore,
        insights: Option<InsightsSummary>,
    ) -> Report {
        let cost_breakdown = Self::cost_breakdown(cost);
        let recommendations =
            self.recommendations(logs, alerts, &cost_breakdown);

        Report {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            project_name: self.project_name.clone(),
            cost_summary_text: cost.summary_line(),
            log_summary_text: logs.summary_line(),
            log_health_status: health.status,
            health_score: health.score,
            health_reason: health.reason_text(),
            trend: Self::overall_trend(logs),
            log_levels: LogLevelCounts {
                error: logs.error_count,
                warning: logs.warning_count,
                info: logs.info_count,
            },
            alerts: alerts.to_vec(),
            cost_breakdown,
            recommendations,
            total_services: cost.total_services,
            date_range: cost.date_range,
            source_breakdown: logs.source_breakdown.clone(),
            issue_patterns: logs.issue_counts.clone(),
            insights,
        }
    }

    fn overall_trend(logs: &LogSummary) -> OverallTrend {
        if logs.error_percentage > 15.0 {
            OverallTrend::Up
        } else if logs.error_percentage < 5.0 {
            OverallTrend::Down
        } else {
            OverallTrend::Neutral
        }
    }

    /// Per-service rows ordered by cost descending.
    fn cost_breakdown(cost: &CostSummary) -> Vec<CostBreakdownEntry> {
        cost.services_by_cost()
            .into_iter()
            .map(|summary| CostBreakdownEntry {
                service: summary.service.clone(),
                cost: summary.total_cost,
                percentage: cost.share_percent(summary.total_cost),
                trend_direction: cost
                    .trends
                    .get(&summary.service)
                    .map(|t| t.direction)
                    .unwrap_or(TrendDirection::Stable),
            })
            .collect()
    }

    /// Derive actionable recommendations: one per alert, one per
    /// dominant service, one for elevated log volume, or a single
    /// all-clear entry.
    fn recommendations(
        &self,
        logs: &LogSummary,
        alerts: &[Alert],
        cost_breakdown: &[CostBreakdownEntry],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        for alert in alerts {
            recommendations.push(format!(
                "Address {} {} alert: {}",
                alert.severity,
                match alert.category {
                    crate::alerts::AlertCategory::Cost => "cost",
                    crate::alerts::AlertCategory::Logs => "log",
                },
                alert.message
            ));
        }

        for entry in cost_breakdown {
            if entry.percentage > HIGH_SHARE_PERCENT {
                recommendations.push(format!(
                    "{} accounts for {:.1}% of total costs - consider reserved capacity or savings plans",
                    entry.service, entry.percentage
                ));
            }
        }

        if logs.error_count > self.log_thresholds.max_error_count
            || logs.warning_count > self.log_thresholds.max_warning_count
        {
            recommendations.push(format!(
                "Investigate elevated log volume: {} errors, {} warnings",
                logs.error_count, logs.warning_count
            ));
        }

        if recommendations.is_empty() {
            recommendations.push(
                "No action needed - all metrics within expected ranges".to_string(),
            );
        }

        recommendations
    }
}

impl Report {
    /// Render the report as an operator-facing plain-text document.
    ///
    /// Wording is presentation only; every figure comes from the
    /// structured fields above.
    pub fn render_text(&self) -> String {
        use std::fmt::Write;

        let rule = "=".repeat(72);
        let mut out = String::new();

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{} - ANALYSIS REPORT", self.project_name.to_uppercase());
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out, "Run ID: {}", self.run_id);
        let _ = writeln!(out);

        if !self.alerts.is_empty() {
            let _ = writeln!(out, "ALERTS ({})", self.alerts.len());
            for alert in &self.alerts {
                let _ = writeln!(out, "  [{}] {}", alert.severity, alert.message);
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "--- Cost Analysis ---");
        let _ = writeln!(out, "Services analyzed: {}", self.total_services);
        match &self.date_range {
            Some(range) => {
                let _ = writeln!(out, "Date range: {} to {}", range.start, range.end);
            }
            None => {
                let _ = writeln!(out, "Date range: no cost records");
            }
        }
        let _ = writeln!(out, "{}", self.cost_summary_text);
        for entry in &self.cost_breakdown {
            let _ = writeln!(
                out,
                "  - {}: ${:.2} ({:.1}%, {})",
                entry.service, entry.cost, entry.percentage, entry.trend_direction
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "--- Log Analysis ---");
        let _ = writeln!(out, "{}", self.log_summary_text);
        let _ = writeln!(
            out,
            "Errors: {}  Warnings: {}  Info: {}",
            self.log_levels.error, self.log_levels.warning, self.log_levels.info
        );
        let _ = writeln!(
            out,
            "Health: {} (score {}) - {}",
            self.log_health_status, self.health_score, self.health_reason
        );
        if !self.issue_patterns.is_empty() {
            let _ = writeln!(out, "Top issues:");
            let mut issues: Vec<_> = self.issue_patterns.iter().collect();
            issues.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (name, count) in issues {
                let _ = writeln!(out, "  - {}: {} occurrences", name, count);
            }
        }
        let _ = writeln!(out);

        if let Some(insights) = &self.insights {
            let _ = writeln!(out, "--- Text Analysis Insights ---");
            if insights.cost_key_phrases.is_empty() && insights.log_key_phrases.is_empty() {
                let _ = writeln!(out, "No key phrases detected");
            } else {
                for phrase in insights
                    .cost_key_phrases
                    .iter()
                    .chain(&insights.log_key_phrases)
                    .take(10)
                {
                    let _ = writeln!(out, "  - {}", phrase);
                }
            }
            if let Some(sentiment) = &insights.log_sentiment {
                let _ = writeln!(out, "Log sentiment: {}", sentiment);
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "--- Recommendations ---");
        for recommendation in &self.recommendations {
            let _ = writeln!(out, "  - {}", recommendation);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "END OF REPORT");
        let _ = writeln!(out, "{rule}");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertEvaluator, AlertSeverity};
    use crate::cost::{CostAggregator, CostRecord};
    use lens_config::CostThresholds;

    fn cost_summary() -> CostSummary {
        let records = vec![
            CostRecord {
                service: "EC2".to_string(),
                date: "2025-01-01".parse().unwrap(),
                cost: 100.0,
            },
            CostRecord {
                service: "EC2".to_string(),
                date: "2025-01-05".parse().unwrap(),
                cost: 130.0,
            },
        ];
        CostAggregator::aggregate(&records)
    }

    fn log_summary() -> LogSummary {
        LogSummary {
            total_entries: 10,
            error_count: 1,
            warning_count: 2,
            info_count: 7,
            error_percentage: 10.0,
            warning_percentage: 20.0,
            info_percentage: 70.0,
            ..Default::default()
        }
    }

    fn assembler() -> ReportAssembler {
        ReportAssembler::new("CloudLens", LogThresholds::default())
    }

    #[test]
    fn test_payload_carries_core_fields() {
        let cost = cost_summary();
        let logs = log_summary();
        let health = HealthScore::compute(logs.error_percentage, logs.error_count, logs.warning_count);
        let evaluator = AlertEvaluator::new(CostThresholds::default(), LogThresholds::default());
        let alerts = evaluator.evaluate(&cost, &logs);

        let report = assembler().assemble(&cost, &logs, &alerts, &health, None);

        assert_eq!(report.health_score, 100);
        assert_eq!(report.log_levels.error, 1);
        assert_eq!(report.total_services, 1);
        assert_eq!(report.cost_breakdown.len(), 1);
        assert_eq!(report.cost_breakdown[0].service, "EC2");
        assert_eq!(
            report.cost_breakdown[0].trend_direction,
            TrendDirection::Increasing
        );
        assert!((report.cost_breakdown[0].percentage - 100.0).abs() < 1e-9);
        // EC2 is the only service, so it triggers the high-cost alert.
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_recommendations_from_alerts_and_share() {
        let cost = cost_summary();
        let logs = log_summary();
        let health = HealthScore::compute(10.0, 1, 2);
        let evaluator = AlertEvaluator::new(CostThresholds::default(), LogThresholds::default());
        let alerts = evaluator.evaluate(&cost, &logs);

        let report = assembler().assemble(&cost, &logs, &alerts, &health, None);

        // One per alert plus one for the dominant service.
        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[0].starts_with("Address HIGH cost alert"));
        assert!(report.recommendations[1].contains("EC2"));
    }

    #[test]
    fn test_fallback_recommendation() {
        let cost = CostAggregator::aggregate(&[]);
        let logs = LogSummary::default();
        let health = HealthScore::compute(0.0, 0, 0);

        let report = assembler().assemble(&cost, &logs, &[], &health, None);

        assert_eq!(
            report.recommendations,
            vec!["No action needed - all metrics within expected ranges".to_string()]
        );
    }

    #[test]
    fn test_log_volume_recommendation() {
        let cost = CostAggregator::aggregate(&[]);
        let logs = LogSummary {
            total_entries: 100,
            error_count: 16,
            warning_count: 5,
            error_percentage: 16.0,
            ..Default::default()
        };
        let health = HealthScore::compute(16.0, 16, 5);
        let evaluator = AlertEvaluator::new(CostThresholds::default(), LogThresholds::default());
        let alerts = evaluator.evaluate(&cost, &logs);

        let report = assembler().assemble(&cost, &logs, &alerts, &health, None);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("elevated log volume")));
    }

    #[test]
    fn test_overall_trend_tiers() {
        let mut logs = log_summary();
        logs.error_percentage = 20.0;
        assert_eq!(ReportAssembler::overall_trend(&logs), OverallTrend::Up);
        logs.error_percentage = 2.0;
        assert_eq!(ReportAssembler::overall_trend(&logs), OverallTrend::Down);
        logs.error_percentage = 10.0;
        assert_eq!(ReportAssembler::overall_trend(&logs), OverallTrend::Neutral);
    }

    #[test]
    fn test_render_text_includes_sections() {
        let cost = cost_summary();
        let logs = log_summary();
        let health = HealthScore::compute(10.0, 1, 2);
        let report = assembler().assemble(&cost, &logs, &[], &health, None);

        let text = report.render_text();
        assert!(text.contains("CLOUDLENS - ANALYSIS REPORT"));
        assert!(text.contains("--- Cost Analysis ---"));
        assert!(text.contains("--- Log Analysis ---"));
        assert!(text.contains("--- Recommendations ---"));
        assert!(text.contains("EC2: $230.00"));
        assert!(text.contains("2025-01-01 to 2025-01-05"));
    }

    #[test]
    fn test_payload_serializes_expected_field_names() {
        let cost = cost_summary();
        let logs = log_summary();
        let health = HealthScore::compute(10.0, 1, 2);
        let report = assembler().assemble(&cost, &logs, &[], &health, None);

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("cost_summary_text").is_some());
        assert!(value.get("log_summary_text").is_some());
        assert_eq!(value["log_health_status"], "Healthy");
        assert!(value.get("log_levels").is_some());
        assert!(value.get("cost_breakdown").is_some());
        assert!(value.get("recommendations").is_some());
        assert_eq!(value["trend"], "neutral");
        // Insights are omitted entirely when absent.
        assert!(value.get("insights").is_none());
    }
}
