//! File logging for the terminal UI.
//!
//! The terminal belongs to ratatui while the app runs, so log records go
//! to rotating files in the configured log directory instead of stderr.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "albumlist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Normalizes a user-supplied level name.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{}`; expected {}",
            other,
            LOG_LEVELS.join("|")
        )),
    }
}

/// Starts file logging at `level`, a name already checked by
/// [`normalize_level`].
///
/// The returned handle must be kept alive for as long as records should be
/// written; dropping it flushes and stops the logger.
///
/// # Errors
///
/// Returns a readable message when the directory cannot be created or
/// the logger backend fails to start.
pub fn init_logging(level: &'static str, log_dir: &Path) -> Result<LoggerHandle, String> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        format!(
            "failed to create log directory `{}`: {}",
            log_dir.display(),
            e
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level `{}`: {}", level, e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| format!("failed to start logger: {}", e))?;

    info!(
        "albumlist {} started level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(handle)
}
