//! CLI command definitions.
//!
//! This module defines the command structure for the CloudLens CLI.
//! Each subcommand maps to one workflow against the configured inputs.

use clap::{Parser, Subcommand};

pub mod analyze;
pub mod validate;

/// CloudLens - cloud cost and log analysis
#[derive(Parser)]
#[command(name = "lens")]
#[command(version, about = "CloudLens - cloud cost and log analysis")]
#[command(long_about = r#"
CloudLens ingests cloud cost records and multi-source application logs,
aggregates them into per-service trends and severity statistics, applies
the configured alert thresholds, scores operational health, and emits a
text report plus a JSON payload for the dashboard, with optional NLP
enrichment and email/Slack delivery.

WORKFLOWS:
  analyze   → Run the full analysis pipeline and write report artifacts
  validate  → Check the configuration file for problems

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation or data failure
  4 - Delivery failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis pipeline
    Analyze(analyze::AnalyzeArgs),

    /// Validate the configuration file
    Validate(validate::ValidateArgs),
}
