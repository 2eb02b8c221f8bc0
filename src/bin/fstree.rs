//! fstree CLI Binary
//!
//! Command-line interface for scanning and mirroring directory subtrees.

use anyhow::Context;
use clap::Parser;
use fstree::cli::{Cli, RunContext};
use fstree::config::{ConfigLoader, FstreeConfig};
use fstree::logging::{init_logging, LoggingConfig};
use fstree::AppError;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = match build_logging_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", fstree::cli::map_error(&e));
            process::exit(1);
        }
    };
    if let Err(e) = init_logging(Some(&logging_config)).context("Failed to initialize logging") {
        eprintln!("{:#}", e);
        process::exit(1);
    }

    info!("fstree starting");

    let context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", fstree::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output.text);
            if let Some(warnings) = output.warnings {
                eprintln!("{}", warnings);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", fstree::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Invalid settings are rejected even when logging stays off.
fn build_logging_config(cli: &Cli) -> Result<LoggingConfig, AppError> {
    let loaded = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(std::path::Path::new(".")),
    };
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    // CLI arguments take priority
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    FstreeConfig {
        logging: config.clone(),
        ..FstreeConfig::default()
    }
    .ensure_valid()?;

    if cli.verbose {
        Ok(config)
    } else {
        Ok(LoggingConfig::off())
    }
}
