//! Data models for CloudLens configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub cost_analysis: CostAnalysisConfig,
    pub log_analysis: LogAnalysisConfig,
    pub enrichment: EnrichmentConfig,
    pub notifications: NotificationConfig,
    pub storage: StorageConfig,
}

/// Project-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub project_name: String,
    pub report_filename: String,
    pub enable_enrichment: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: "CloudLens".to_string(),
            report_filename: "final_report.txt".to_string(),
            enable_enrichment: true,
        }
    }
}

/// Cost analysis input and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAnalysisConfig {
    pub enabled: bool,
    pub data_source: PathBuf,
    /// Service names surfaced in the dashboard config payload.
    pub monitor_services: Vec<String>,
    pub thresholds: CostThresholds,
}

impl Default for CostAnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_source: PathBuf::from("data/cost.json"),
            monitor_services: Vec::new(),
            thresholds: CostThresholds::default(),
        }
    }
}

impl CostAnalysisConfig {
    /// Services to surface on the dashboard, falling back to common ones.
    pub fn monitored_services(&self) -> Vec<String> {
        if self.monitor_services.is_empty() {
            ["EC2", "RDS", "S3", "Lambda", "DynamoDB"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.monitor_services.clone()
        }
    }
}

/// Thresholds applied to cost aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostThresholds {
    /// Surfaced in the dashboard config payload; no alert is derived from it.
    pub cost_increase_alert_percent: f64,
    /// A service strictly above this share of total cost raises a high alert.
    pub high_cost_service_percent: f64,
}

impl Default for CostThresholds {
    fn default() -> Self {
        Self {
            cost_increase_alert_percent: 15.0,
            high_cost_service_percent: 30.0,
        }
    }
}

/// Log analysis inputs, thresholds, and issue patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogAnalysisConfig {
    pub enabled: bool,
    pub data_sources: Vec<LogSource>,
    pub thresholds: LogThresholds,
    pub error_patterns: Vec<ErrorPattern>,
}

impl Default for LogAnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_sources: vec![LogSource::new("data/logs.txt")],
            thresholds: LogThresholds::default(),
            error_patterns: Vec::new(),
        }
    }
}

impl LogAnalysisConfig {
    /// Configured issue patterns, or the built-in defaults when none are set.
    pub fn effective_patterns(&self) -> Vec<ErrorPattern> {
        if self.error_patterns.is_empty() {
            default_error_patterns()
        } else {
            self.error_patterns.clone()
        }
    }
}

/// Thresholds applied to log aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogThresholds {
    pub max_error_rate_percent: f64,
    pub max_error_count: u64,
    pub max_warning_count: u64,
}

impl Default for LogThresholds {
    fn default() -> Self {
        Self {
            max_error_rate_percent: 10.0,
            max_error_count: 15,
            max_warning_count: 25,
        }
    }
}

/// A named set of case-insensitive keywords that bucket log messages
/// into an issue category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPattern {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ErrorPattern {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Built-in issue patterns used when the config defines none.
pub fn default_error_patterns() -> Vec<ErrorPattern> {
    vec![
        ErrorPattern::new("Connection Issues", &["connection", "timeout", "unreachable"]),
        ErrorPattern::new("Permission Errors", &["AccessDenied", "permission", "unauthorized"]),
        ErrorPattern::new(
            "Resource Limits",
            &["memory", "disk", "throughput", "limit exceeded"],
        ),
    ]
}

/// A normalized log source descriptor.
///
/// Accepts either a bare path string or a full mapping in YAML; both
/// deserialize into the same shape so downstream code never branches on
/// the input form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "LogSourceSpec")]
pub struct LogSource {
    pub path: PathBuf,
    pub kind: String,
    pub description: String,
}

impl LogSource {
    /// Create an application-kind source described by its path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let description = path.display().to_string();
        Self {
            path,
            kind: "application".to_string(),
            description,
        }
    }

    /// Set the source kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Raw YAML forms accepted for a log source.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LogSourceSpec {
    Path(String),
    Full {
        path: PathBuf,
        #[serde(default = "default_source_kind")]
        kind: String,
        #[serde(default)]
        description: Option<String>,
    },
}

fn default_source_kind() -> String {
    "application".to_string()
}

impl From<LogSourceSpec> for LogSource {
    fn from(spec: LogSourceSpec) -> Self {
        match spec {
            LogSourceSpec::Path(path) => LogSource::new(path),
            LogSourceSpec::Full {
                path,
                kind,
                description,
            } => {
                let description =
                    description.unwrap_or_else(|| path.display().to_string());
                Self {
                    path,
                    kind,
                    description,
                }
            }
        }
    }
}

/// NLP enrichment service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Endpoint of the text analysis service; enrichment is skipped when unset.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Notification channel settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub notify_only_on_alerts: bool,
    pub email: EmailConfig,
    pub slack: SlackConfig,
}

/// Email delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub sender: Option<String>,
    pub recipients: Vec<String>,
    pub subject_prefix: String,
    pub include_full_report: bool,
    pub transport: EmailTransportConfig,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sender: None,
            recipients: Vec::new(),
            subject_prefix: "[CloudLens]".to_string(),
            include_full_report: true,
            transport: EmailTransportConfig::default(),
        }
    }
}

/// How outgoing email is transported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmailTransportConfig {
    Smtp {
        host: String,
        port: u16,
        username: String,
        password: String,
        use_tls: bool,
    },
    /// Writes messages to a directory instead of sending them.
    File { path: PathBuf },
}

impl Default for EmailTransportConfig {
    fn default() -> Self {
        EmailTransportConfig::File {
            path: PathBuf::from("out/emails"),
        }
    }
}

/// Slack webhook settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlackConfig {
    pub enabled: bool,
    pub webhook_url: Option<String>,
}

/// Artifact output and upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub output_dir: PathBuf,
    /// Base URL artifacts are PUT to; upload is skipped when unset.
    pub upload_url: Option<String>,
    pub upload_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            upload_url: None,
            upload_timeout_secs: 30,
        }
    }
}
