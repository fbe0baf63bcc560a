//! Logging utilities for the scheduler.
//!
//! All crates log through `tracing`; this module installs the subscriber once
//! at startup. `RUST_LOG` is honored, and a `scheduler=<level>` directive is
//! added on top so the workspace crates log at the requested level.

use scheduler_config::LoggingConfig;
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for the rolling log files.
const LOG_FILE_PREFIX: &str = "scheduler.log";

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use scheduler_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level, stdout only.
pub fn init_with_level(level: Level) {
    // No file layer, so there is no guard to keep.
    let _ = install(level, None);
}

/// Initialize logging from the `logging` config section.
///
/// When `directory` is set a daily rolling file is written next to stdout
/// output. The returned guard flushes that file on drop, so the caller has to
/// hold it for the lifetime of the process.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = config
        .level
        .as_deref()
        .and_then(|level| Level::from_str(level).ok())
        .unwrap_or(Level::INFO);
    install(level, config.directory.as_deref())
}

fn install(level: Level, directory: Option<&str>) -> Option<WorkerGuard> {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("scheduler={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    // try_init: a global subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
