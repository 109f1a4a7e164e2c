//! Logger setup for the service.
//!
//! Every flush logs through the `log` facade; this module installs the
//! `env_logger` backend that renders those lines as colored text or JSON.

use std::io::Write;

use colored::Colorize;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose output is capped regardless of the requested level.
///
/// `sqlx::query` logs every statement, which is one line per saved chunk.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("sqlx::query", LevelFilter::Warn),
    ("sqlx", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("axum", LevelFilter::Info),
];

/// Installs the global logger.
///
/// `RUST_LOG` is parsed first, then `level` is applied on top of it for this
/// crate and as the default, so `--log-level` always wins. The noisy modules
/// in `QUIET_MODULES` stay capped.
///
/// ```bash
/// # Per-chunk detail from the writer, everything else at info
/// RUST_LOG=record_batcher::flush=debug record_batcher --log-level info
///
/// # One JSON object per line for log shippers
/// record_batcher --log-format json
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already
/// installed in this process.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("record_batcher", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    plain_line(record.level(), record.target(), &record.args().to_string())
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)
}

/// `{"ts":..,"level":..,"target":..,"msg":..}` with the message escaped.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let label = level.as_str();
    let label = match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.dimmed(),
    };
    format!(
        "{} {:<5} {} {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        label,
        target.cyan(),
        msg
    )
}
