//! Deterministic log health scoring.

use serde::{Deserialize, Serialize};

/// Text used when no deduction applied.
pub const HEALTHY_REASON: &str = "all metrics within normal thresholds";

/// Health tier derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "Healthy"),
            HealthStatus::Degraded => write!(f, "Degraded"),
            HealthStatus::Critical => write!(f, "Critical"),
        }
    }
}

/// A 0-100 score summarizing log-based operational health, with the
/// deductions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u8,
    pub status: HealthStatus,
    pub reasons: Vec<String>,
}

impl HealthScore {
    /// Compute the score from log metrics.
    ///
    /// Starts at 100 and applies capped deductions in a fixed order:
    /// error rate above 15% (up to 30 points), error count above 10
    /// (up to 20), warning count above 20 (half a point each, up to
    /// 15). The result is clamped at zero and truncated to an integer.
    pub fn compute(error_rate: f64, error_count: u64, warning_count: u64) -> Self {
        let mut score = 100.0_f64;
        let mut reasons = Vec::new();

        if error_rate > 15.0 {
            let deduction = ((error_rate - 15.0) * 2.0).min(30.0);
            score -= deduction;
            reasons.push(format!("elevated error rate ({:.1}%)", error_rate));
        }

        if error_count > 10 {
            let deduction = ((error_count - 10) as f64).min(20.0);
            score -= deduction;
            reasons.push(format!("{} errors above baseline", error_count));
        }

        if warning_count > 20 {
            let deduction = ((warning_count - 20) as f64 * 0.5).min(15.0);
            score -= deduction;
            reasons.push(format!("{} warnings above baseline", warning_count));
        }

        let score = score.max(0.0).trunc() as u8;
        let status = if score >= 80 {
            HealthStatus::Healthy
        } else if score >= 50 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Critical
        };

        Self {
            score,
            status,
            reasons,
        }
    }

    /// All deduction reasons joined for display, or the fixed healthy
    /// sentinel when none applied.
    pub fn reason_text(&self) -> String {
        if self.reasons.is_empty() {
            HEALTHY_REASON.to_string()
        } else {
            self.reasons.join("; ")
        }
    }
}
