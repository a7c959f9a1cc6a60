//! Runtime settings: command line flags layered over an optional YAML file

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILE,
    DEFAULT_POLL_INTERVAL_MS,
};
use crate::error::ConfigError;
use crate::i18n::Lang;

/// Shortest accepted polling interval
const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Live lottery display for a Meshtastic lottery backend
#[derive(Parser, Debug, Default)]
#[command(name = "lottery-display")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "LOTTERY_API_URL")]
    pub api_url: Option<String>,

    /// Status polling interval in milliseconds
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Display language
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Config file path (defaults to ~/.lottery-display/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Contents of the optional config file; every key may be omitted
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub lang: Option<Lang>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load the file at `path`. A missing or blank file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(FileConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings after merging flags, file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub poll_interval: Duration,
    pub lang: Lang,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::merge(Cli::default(), FileConfig::default())
    }
}

impl Settings {
    pub fn resolve(cli: Cli) -> Result<Settings, ConfigError> {
        let path = cli.config.clone().unwrap_or_else(FileConfig::default_path);
        let file = FileConfig::load(&path)?;
        Ok(Settings::merge(cli, file))
    }

    /// Flags win over the file, the file wins over built-in defaults
    pub fn merge(cli: Cli, file: FileConfig) -> Settings {
        let api_url = cli
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let poll_ms = cli
            .poll_ms
            .or(file.poll_interval_ms)
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
            .max(MIN_POLL_INTERVAL_MS);

        Settings {
            api_url: api_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(poll_ms),
            lang: cli.lang.or(file.lang).unwrap_or_default(),
            log_file: cli
                .log_file
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
