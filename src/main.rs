//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `record_batcher` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use record_batcher::initialization::init_logger_with;
use record_batcher::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // DATABASE_URL and LISTEN_ADDR may come from a .env file
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_server(config).await {
        Ok(report) => {
            println!(
                "Flushed {} record{} in {} flushes ({} dropped) over {:.1}s",
                report.records_flushed,
                if report.records_flushed == 1 { "" } else { "s" },
                report.flushes,
                report.records_dropped,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("record_batcher error: {:#}", e);
            process::exit(1);
        }
    }
}
