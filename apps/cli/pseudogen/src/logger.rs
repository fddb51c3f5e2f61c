//! Logging for the pseudogen CLI.
//!
//! stdout carries the pseudocode, so log records only ever go to stderr
//! (colored, level from `-v`) and optionally to a plain-text file.

use crate::error::PseudogenError;

use common::ErrorLocation;

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, debug, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Level used for the log file regardless of `-v`.
const FILE_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Initialize the logger.
///
/// Safe to call more than once; later calls log a warning and return Ok.
///
/// # Arguments
///
/// * `stderr_level` - Level for the stderr sink (`Off` disables it)
/// * `log_file` - Optional file that receives debug-level records
///
/// # Errors
///
/// Returns [`PseudogenError::Output`] if the log file cannot be opened or a
/// global logger is already installed by someone else.
pub fn initialize(stderr_level: LevelFilter, log_file: Option<&Path>) -> Result<(), PseudogenError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(stderr_level, log_file);
        if result.is_ok() {
            debug!("Logger initialized: stderr={stderr_level:?}, file={log_file:?}");
        }
    });

    result
}

#[track_caller]
pub(crate) fn initialize_internal(
    stderr_level: LevelFilter,
    log_file: Option<&Path>,
) -> Result<(), PseudogenError> {
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let overall_level = match log_file {
        Some(_) => stderr_level.max(FILE_LOG_LEVEL),
        None => stderr_level,
    };

    let stderr_dispatch = Dispatch::new()
        .level(stderr_level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
            ))
        })
        .chain(stderr());

    let mut base_dispatch = Dispatch::new()
        .level(overall_level)
        .chain(stderr_dispatch);

    if let Some(path) = log_file {
        let file_dispatch = Dispatch::new()
            .level(FILE_LOG_LEVEL)
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{file}:{line}]",
                    date = format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    file = record.file().unwrap_or("unknown"),
                    line = record.line().unwrap_or(0)
                ))
            })
            .chain(fern::log_file(path).map_err(|e| PseudogenError::Output {
                message: format!("Failed to create log file {}: {e}", path.display()),
                location: ErrorLocation::from(std::panic::Location::caller()),
            })?);

        base_dispatch = base_dispatch.chain(file_dispatch);
    }

    base_dispatch.apply().map_err(|e| PseudogenError::Output {
        message: format!("Failed to initialize logger: {e}"),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })?;

    Ok(())
}
