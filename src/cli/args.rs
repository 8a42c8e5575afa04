//! CLI argument parsing
//!
//! ```text
//! macroai [options] [mode]
//!
//! MODES:
//!   (no mode)          TUI mode
//!   tui                TUI mode
//!   analyze <query>... One-shot analysis (--json for machine output)
//!   status             Probe the analysis service
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::Result;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "macroai", version, about = "Meal nutrition analysis client")]
pub struct Args {
    /// Config file (default: $MACROAI_CONFIG, then ./macroai.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Analysis service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (0 = wait indefinitely)
    #[arg(long = "timeout", global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory for macroai.log
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive terminal UI (default)
    Tui,

    /// Analyze a meal description and print the breakdown
    Analyze {
        /// Meal description (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check that the analysis service is reachable
    Status,
}

impl Mode {
    /// Query text of `analyze` mode
    pub fn query_text(&self) -> Option<String> {
        match self {
            Mode::Analyze { query, .. } => Some(query.join(" ")),
            _ => None,
        }
    }
}

/// Parse CLI arguments without exiting the process
pub fn parse_args<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Args::try_parse_from(args)?)
}
