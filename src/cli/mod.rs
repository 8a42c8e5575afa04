//! CLI module
//!
//! Provides:
//! - Argument parsing (clap)
//! - Settings resolution (defaults → TOML file → env → flags)
//! - Log file setup
//! - One-shot mode dispatch (analyze, status)

pub mod args;
pub mod config;
pub mod dispatch;
pub mod logging;

// Re-exports
pub use args::{parse_args, Args, Mode};
pub use config::Settings;
pub use dispatch::{build_client, run_cli_mode, ExitCode};
pub use logging::init_logging;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(#[from] clap::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot parse config file {path}: {source}")]
    ConfigFile {
        path: String,
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] crate::analysis::TransportError),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
