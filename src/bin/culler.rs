//! culler CLI Binary
//!
//! Command-line interface for finding duplicated directory trees.

use clap::Parser;
use culler::cli::{map_error, Cli, RunContext};
use culler::config::CullerConfig;
use culler::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let workspace = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine working directory: {}", e);
            process::exit(1);
        }
    };

    let context = match RunContext::new(workspace, cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, context.config());
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "culler starting");

    match context.execute(&cli.command) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from the config file and CLI args
fn build_logging_config(cli: &Cli, config: &CullerConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
        return logging;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }

    // Explicit flags win over --verbose
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = file.clone();
    }

    logging
}
