//! Validate command - check the configuration file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use lens_config::{ConfigLoader, ConfigValidator};

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "lens.yaml")]
    config: PathBuf,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating configuration: {:?}", args.config);

    let config = ConfigLoader::load(&args.config).context("Failed to load configuration")?;
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("  warning: {}", warning);
    }
    for error in &result.errors {
        println!("  error: {}", error);
    }

    println!();
    println!(
        "  Sources:   {} log, 1 cost",
        config.log_analysis.data_sources.len()
    );
    println!(
        "  Patterns:  {}",
        config.log_analysis.effective_patterns().len()
    );

    if result.valid {
        println!();
        println!("✅ Configuration valid");
        Ok(())
    } else {
        println!();
        println!("❌ Configuration invalid");
        std::process::exit(3);
    }
}
