//! Dashboard configuration payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lens_config::Config;

/// The `config.json` payload the dashboard reads alongside the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub analysis_config: AnalysisConfigSection,
    pub project_info: ProjectInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfigSection {
    pub log_files_to_analyze: Vec<String>,
    pub cost_categories_to_watch: Vec<String>,
    pub abnormal_thresholds: AbnormalThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbnormalThresholds {
    pub cost_increase_percentage: i64,
    pub critical_log_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub last_updated: DateTime<Utc>,
}

impl DashboardConfig {
    /// Build the payload from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let log_files = config
            .log_analysis
            .data_sources
            .iter()
            .filter_map(|source| {
                source
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .collect();

        Self {
            analysis_config: AnalysisConfigSection {
                log_files_to_analyze: log_files,
                cost_categories_to_watch: config.cost_analysis.monitored_services(),
                abnormal_thresholds: AbnormalThresholds {
                    cost_increase_percentage: config
                        .cost_analysis
                        .thresholds
                        .cost_increase_alert_percent
                        as i64,
                    critical_log_count: config.log_analysis.thresholds.max_error_count,
                },
            },
            project_info: ProjectInfo {
                name: config.general.project_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                last_updated: Utc::now(),
            },
        }
    }
}
