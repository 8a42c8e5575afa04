//! Settings resolution
//!
//! Priority (later wins):
//! 1. Built-in defaults
//! 2. TOML config file: --config <path>, else $MACROAI_CONFIG, else
//!    ./macroai.toml when present
//! 3. Environment: $MACROAI_BASE_URL, $MACROAI_TIMEOUT_SECS
//! 4. Flags: --base-url, --timeout, --log-dir
//!
//! ```toml
//! [service]
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 30
//!
//! [logging]
//! dir = "/var/log/macroai"
//! filter = "macroai=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::cli::args::Args;
use crate::cli::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const CONFIG_FILE: &str = "macroai.toml";

pub const ENV_CONFIG: &str = "MACROAI_CONFIG";
pub const ENV_BASE_URL: &str = "MACROAI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MACROAI_TIMEOUT_SECS";

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service base URL, no trailing slash
    pub base_url: String,
    /// Request timeout (`None` waits indefinitely)
    pub request_timeout: Option<Duration>,
    /// Directory that receives macroai.log
    pub log_dir: PathBuf,
    /// Default tracing filter (overridden by $MACROAI_LOG)
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            log_dir: std::env::temp_dir(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    service: ServiceSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    dir: Option<PathBuf>,
    filter: Option<String>,
}

impl Settings {
    /// Resolve settings from args and the process environment
    pub fn resolve(args: &Args) -> Result<Self> {
        Self::resolve_with_env(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an injectable environment lookup
    pub fn resolve_with_env<F>(args: &Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = config_path(args, &env)? {
            settings.apply_file(&load_file(&path)?);
            debug!(path = %path.display(), "loaded config file");
        }

        if let Some(url) = env(ENV_BASE_URL) {
            settings.base_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            settings.request_timeout = timeout_from_secs(secs);
        }

        if let Some(ref url) = args.base_url {
            settings.base_url = url.clone();
        }
        if let Some(secs) = args.timeout_secs {
            settings.request_timeout = timeout_from_secs(secs);
        }
        if let Some(ref dir) = args.log_dir {
            settings.log_dir = dir.clone();
        }

        settings.base_url = normalize_base_url(&settings.base_url)?;
        Ok(settings)
    }

    fn apply_file(&mut self, file: &FileConfig) {
        if let Some(ref url) = file.service.base_url {
            self.base_url = url.clone();
        }
        if let Some(secs) = file.service.timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(ref dir) = file.logging.dir {
            self.log_dir = dir.clone();
        }
        if let Some(ref filter) = file.logging.filter {
            self.log_filter = filter.clone();
        }
    }
}

fn config_path<F>(args: &Args, env: &F) -> Result<Option<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = args
        .config
        .clone()
        .or_else(|| env(ENV_CONFIG).map(PathBuf::from));

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let default = PathBuf::from(CONFIG_FILE);
    Ok(default.exists().then_some(default))
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| Error::ConfigFile {
        path: path.display().to_string(),
        source,
    })
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Validate scheme and strip trailing slashes
pub fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    else {
        return Err(Error::Config(format!(
            "base_url must start with http:// or https://, got '{}'",
            url
        )));
    };
    if rest.trim_matches('/').is_empty() {
        return Err(Error::Config(format!("base_url has no host: '{}'", url)));
    }
    Ok(url.trim_end_matches('/').to_string())
}
