//! # lens_core
//!
//! The CloudLens analysis core: cost aggregation with per-service trend
//! classification, multi-source log aggregation with severity and issue
//! pattern statistics, threshold-driven alerting, deterministic health
//! scoring, and final report assembly.
//!
//! Every stage is a pure function over its inputs (plus the two fallible
//! load steps), so running the pipeline twice on identical data yields
//! identical summaries, alerts, and scores. Cost data problems abort the
//! run; log sources degrade per-source; enrichment is optional and
//! supplied from outside.
//!
//! ## Pipeline
//!
//! ```rust,no_run
//! use lens_config::Config;
//! use lens_core::{AlertEvaluator, CostAggregator, HealthScore, LogAggregator, ReportAssembler};
//!
//! let config = Config::default();
//! let cost = CostAggregator::analyze(&config.cost_analysis.data_source).unwrap();
//! let logs = LogAggregator::new(config.log_analysis.effective_patterns())
//!     .analyze(&config.log_analysis.data_sources);
//! let alerts = AlertEvaluator::new(
//!     config.cost_analysis.thresholds.clone(),
//!     config.log_analysis.thresholds.clone(),
//! )
//! .evaluate(&cost, &logs);
//! let health = HealthScore::compute(logs.error_percentage, logs.error_count, logs.warning_count);
//! let report = ReportAssembler::new("CloudLens", config.log_analysis.thresholds.clone())
//!     .assemble(&cost, &logs, &alerts, &health, None);
//! println!("{}", report.render_text());
//! ```

pub mod alerts;
pub mod cost;
pub mod error;
pub mod health;
pub mod logs;
pub mod report;

pub use alerts::{Alert, AlertCategory, AlertEvaluator, AlertSeverity};
pub use cost::{
    CostAggregator, CostRecord, CostSummary, CostTrend, DateRange, ServiceCostSummary,
    TrendDirection,
};
pub use error::{CoreError, CoreResult};
pub use health::{HealthScore, HealthStatus};
pub use logs::{LogAggregator, LogEntry, LogLevel, LogSummary};
pub use report::{
    CostBreakdownEntry, DetectedEntity, InsightsSummary, LogLevelCounts, OverallTrend, Report,
    ReportAssembler,
};
