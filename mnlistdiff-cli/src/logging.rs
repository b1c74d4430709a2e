//! Logging setup for the command-line tool.
//!
//! Logs go to stderr so that stdout carries only the rendered diff.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CliError, CliResult};

/// Initialize console logging.
///
/// Uses `level` when given, otherwise `RUST_LOG`, otherwise `warn`.
pub fn init_console_logging(level: Option<LevelFilter>) -> CliResult<()> {
    let env_filter = match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LevelFilter::WARN.to_string())),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
