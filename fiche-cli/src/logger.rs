//! Logging Infrastructure
//!
//! Console logs go to stderr so command output on stdout stays clean.
//! With a log directory, a daily rotated `fiche.YYYY-MM-DD.log` file is
//! written as well and files older than [`RETENTION_DAYS`] are removed at
//! startup.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Days of log files kept on disk
pub const RETENTION_DAYS: i64 = 14;

const LOG_PREFIX: &str = "fiche";
const LOG_SUFFIX: &str = "log";

/// Remove `fiche.YYYY-MM-DD.log` files older than the retention window
///
/// Returns how many files were deleted.
pub fn cleanup_old_logs(log_dir: &Path, today: NaiveDate) -> anyhow::Result<usize> {
    let cutoff = today - chrono::Duration::days(RETENTION_DAYS);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name
            .strip_prefix(LOG_PREFIX)
            .and_then(|d| d.strip_prefix('.'))
            .and_then(|d| d.strip_suffix(LOG_SUFFIX))
            .and_then(|d| d.strip_suffix('.'))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level used when `RUST_LOG` is unset (e.g., "warn", "debug")
/// * `json_format` - JSON lines instead of the human format
/// * `log_dir` - Optional directory for daily rotated log files
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (json_console, text_console) = if json_format {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr);
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr);
        (None, Some(layer))
    };

    let (json_file, text_file) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_PREFIX)
                .filename_suffix(LOG_SUFFIX)
                .build(dir)?;
            let writer = std::sync::Mutex::new(appender);
            if json_format {
                let layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(writer);
                (Some(layer), None)
            } else {
                let layer = fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(writer);
                (None, Some(layer))
            }
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(text_console)
        .with(json_file)
        .with(text_file)
        .try_init()?;

    if let Some(dir) = log_dir
        && let Err(e) = cleanup_old_logs(dir, chrono::Local::now().date_naive())
    {
        tracing::warn!(error = %e, "Failed to cleanup old logs");
    }

    Ok(())
}
