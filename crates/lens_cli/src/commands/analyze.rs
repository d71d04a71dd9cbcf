//! Analyze command - run the full analysis pipeline.
//!
//! Stages run strictly in sequence: cost aggregation, log aggregation,
//! alert evaluation, health scoring, optional enrichment, report
//! assembly, artifact write, optional upload, optional notification.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use lens_config::{Config, ConfigLoader};
use lens_core::{
    AlertEvaluator, CostAggregator, CostSummary, DetectedEntity, HealthScore, InsightsSummary,
    LogAggregator, LogSummary, Report, ReportAssembler,
};
use lens_enrich::{analyze_or_empty, HttpAnalyzer, NoopAnalyzer, TextAnalyzer, TextInsights};
use lens_notify::Notifier;
use lens_storage::{ArtifactStore, DashboardConfig, Uploader};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "lens.yaml")]
    config: PathBuf,

    /// Override the artifact output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Skip NLP enrichment even if configured
    #[arg(long)]
    no_enrich: bool,

    /// Skip notifications even if configured
    #[arg(long)]
    no_notify: bool,

    /// Skip artifact upload even if configured
    #[arg(long)]
    no_upload: bool,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let mut config =
        ConfigLoader::load(&args.config).context("Failed to load configuration")?;
    if let Some(dir) = &args.output_dir {
        config.storage.output_dir = dir.clone();
    }

    info!("Starting analysis run for {}", config.general.project_name);

    // Cost aggregation is fatal on bad input; there is no meaningful
    // report without cost data.
    let cost = if config.cost_analysis.enabled {
        CostAggregator::analyze(&config.cost_analysis.data_source)
            .context("Cost data analysis failed")?
    } else {
        info!("Cost analysis disabled");
        CostAggregator::aggregate(&[])
    };
    info!("Cost analysis complete: {} service(s)", cost.total_services);

    let logs = if config.log_analysis.enabled {
        LogAggregator::new(config.log_analysis.effective_patterns())
            .analyze(&config.log_analysis.data_sources)
    } else {
        info!("Log analysis disabled");
        LogSummary::default()
    };
    info!("Log analysis complete: {} entries", logs.total_entries);

    let alerts = AlertEvaluator::new(
        config.cost_analysis.thresholds.clone(),
        config.log_analysis.thresholds.clone(),
    )
    .evaluate(&cost, &logs);
    info!("{} alert(s) detected", alerts.len());

    let health = HealthScore::compute(logs.error_percentage, logs.error_count, logs.warning_count);
    info!("Health: {} (score {})", health.status, health.score);

    let insights = if args.no_enrich {
        info!("Enrichment skipped (--no-enrich)");
        None
    } else {
        enrich(&config, &cost, &logs).await
    };

    let report = ReportAssembler::new(
        config.general.project_name.clone(),
        config.log_analysis.thresholds.clone(),
    )
    .assemble(&cost, &logs, &alerts, &health, insights);

    let report_text = report.render_text();
    write_artifacts(&config, &report, &report_text, args.no_upload).await?;

    if args.no_notify {
        info!("Notifications skipped (--no-notify)");
    } else {
        Notifier::new(config.general.project_name.clone(), config.notifications.clone())
            .send(&report_text, &report.alerts)
            .await
            .context("Notification delivery failed")?;
    }

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("{}", report_text);
    }

    info!("Analysis complete - {} alert(s) detected", report.alerts.len());
    Ok(())
}

/// Run both summaries through the text analysis service. Failures
/// degrade to empty insights; only configuration decides whether the
/// service is contacted at all.
async fn enrich(
    config: &Config,
    cost: &CostSummary,
    logs: &LogSummary,
) -> Option<InsightsSummary> {
    if !config.general.enable_enrichment {
        info!("Enrichment disabled in configuration");
        return None;
    }

    let analyzer: Box<dyn TextAnalyzer> = match &config.enrichment.endpoint {
        Some(endpoint) => {
            match HttpAnalyzer::new(
                endpoint.clone(),
                Duration::from_secs(config.enrichment.timeout_secs),
            ) {
                Ok(analyzer) => Box::new(analyzer),
                Err(e) => {
                    warn!("Could not build enrichment client: {}", e);
                    Box::new(NoopAnalyzer)
                }
            }
        }
        None => {
            info!("No enrichment endpoint configured");
            Box::new(NoopAnalyzer)
        }
    };

    let cost_insights = analyze_or_empty(analyzer.as_ref(), &cost.text_summary()).await;
    let log_insights = analyze_or_empty(analyzer.as_ref(), &logs.text_summary()).await;

    Some(distill(&cost_insights, &log_insights))
}

/// Reduce raw analysis results to the distilled form the report carries.
fn distill(cost: &TextInsights, logs: &TextInsights) -> InsightsSummary {
    InsightsSummary {
        cost_key_phrases: cost
            .key_phrases
            .iter()
            .take(5)
            .map(|p| p.text.clone())
            .collect(),
        cost_sentiment: cost.sentiment.as_ref().map(|s| s.label.clone()),
        log_key_phrases: logs
            .key_phrases
            .iter()
            .take(5)
            .map(|p| p.text.clone())
            .collect(),
        log_sentiment: logs.sentiment.as_ref().map(|s| s.label.clone()),
        entities: logs
            .entities
            .iter()
            .take(5)
            .map(|e| DetectedEntity {
                text: e.text.clone(),
                kind: e.kind.clone(),
                confidence: (e.score * 1000.0).round() / 10.0,
            })
            .collect(),
    }
}

/// Persist all artifacts, then upload them when configured.
async fn write_artifacts(
    config: &Config,
    report: &Report,
    report_text: &str,
    no_upload: bool,
) -> Result<()> {
    let store = ArtifactStore::new(&config.storage.output_dir);

    store
        .write_text(&config.general.report_filename, report_text)
        .context("Failed to write text report")?;
    store
        .write_json("final_report.json", report)
        .context("Failed to write report payload")?;
    let dashboard = DashboardConfig::from_config(config);
    store
        .write_json("config.json", &dashboard)
        .context("Failed to write dashboard payload")?;

    if no_upload {
        info!("Upload skipped (--no-upload)");
        return Ok(());
    }

    if let Some(base_url) = &config.storage.upload_url {
        let uploader = Uploader::new(
            base_url.clone(),
            Duration::from_secs(config.storage.upload_timeout_secs),
        )
        .context("Upload client setup failed")?;

        uploader
            .upload(&config.general.report_filename, report_text, "text/plain")
            .await
            .context("Report upload failed")?;

        let report_json =
            serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        uploader
            .upload("final_report.json", &report_json, "application/json")
            .await
            .context("Report payload upload failed")?;

        let config_json =
            serde_json::to_string_pretty(&dashboard).context("Failed to serialize dashboard payload")?;
        uploader
            .upload("config.json", &config_json, "application/json")
            .await
            .context("Dashboard payload upload failed")?;
    }

    Ok(())
}
