// Logger initialization
//
// Console mode logs to stderr. The terminal dashboard owns the screen, so it
// logs to a daily rolling file instead.

use crate::config::LogConfig;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "citation-dashboard.log";

fn env_filter(config: &LogConfig) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.filter.clone().into())
}

/// Initialize tracing for one-shot CLI commands.
pub fn init_console_logger(config: &LogConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize tracing for TUI mode. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_file_logger(config: &LogConfig) -> WorkerGuard {
    let dir = log_dir(config);
    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    guard
}

/// Resolve the log directory: explicit config, then the user data dir.
pub fn log_dir(config: &LogConfig) -> PathBuf {
    config.dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("citation-dashboard")
            .join("logs")
    })
}
