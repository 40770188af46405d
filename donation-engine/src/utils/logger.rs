//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use crate::core::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger from `LOG_LEVEL` / `LOG_DIR`
pub fn init_logger_from_config(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level` when set. Calling this twice
/// is harmless: the second subscriber is simply not installed.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match log_target(log_dir) {
        LogTarget::File(log_path) => {
            let file_appender = tracing_appender::rolling::daily(log_path, "donation-engine");
            let _ = subscriber.with_writer(file_appender).with_ansi(false).try_init();
        }
        LogTarget::Stdout => {
            let _ = subscriber.try_init();
        }
        LogTarget::MissingDir(dir) => {
            // Warn only once a subscriber exists to record it
            let _ = subscriber.try_init();
            tracing::warn!(log_dir = %dir, "Log directory does not exist, logging to stdout");
        }
    }
}

/// Where log output goes
#[derive(Debug, PartialEq, Eq)]
enum LogTarget {
    Stdout,
    File(PathBuf),
    MissingDir(String),
}

fn log_target(log_dir: Option<&str>) -> LogTarget {
    match log_dir {
        None => LogTarget::Stdout,
        Some(dir) if Path::new(dir).is_dir() => LogTarget::File(PathBuf::from(dir)),
        Some(dir) => LogTarget::MissingDir(dir.to_string()),
    }
}
