//! Log file setup
//!
//! Logs go to `<log_dir>/macroai.log`, never to the terminal, so the TUI
//! and the stdout of one-shot modes stay clean.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::config::Settings;
use crate::cli::{Error, Result};

/// Log file name inside the log directory
pub const LOG_FILE: &str = "macroai.log";

/// Env var holding a tracing filter directive
pub const LOG_ENV: &str = "MACROAI_LOG";

/// Install the global tracing subscriber
///
/// Keep the returned guard alive until exit; dropping it flushes the
/// background writer.
pub fn init_logging(settings: &Settings) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&settings.log_dir)?;
    let appender = tracing_appender::rolling::never(&settings.log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .map_err(|e| Error::Logging(format!("invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(guard)
}
