//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/habitquest/habitquest.log` (or platform
//! equivalent) with 5 MB size-based rotation. Only warnings reach the
//! terminal so they do not interleave with command output. Set
//! `DEBUG_LOGGING=1` to enable debug output for habitquest crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "habitquest.log";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,habitquest_cli=debug,habitquest_core=debug"
    } else {
        "info"
    }
}

/// Initialize logging (file + stderr).
///
/// Returns a `WorkerGuard` that must be held until exit so buffered lines
/// are flushed. Returns `None` and logs to stderr only when the log file
/// cannot be created.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|config| config.join("habitquest")) else {
        init_stderr_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber is not up yet
        eprintln!("Failed to create log directory {log_dir:?}: {e}, logging to stderr only");
        init_stderr_only(debug_logging);
        return None;
    }

    // Keep habitquest.log and habitquest.log.1
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_BYTES),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {log_path:?}: {e}");
            init_stderr_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(EnvFilter::new(filter_directive(debug_logging)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(if debug_logging { LevelFilter::DEBUG } else { LevelFilter::WARN });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "habitquest logging initialized");

    Some(guard)
}

fn init_stderr_only(debug_logging: bool) {
    let level = if debug_logging { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(level);

    tracing_subscriber::registry().with(stderr_layer).init();
}
