//! Host configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs.

use std::env;
use std::path::PathBuf;

/// Log output format for the host binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one object per line
    Json,
    /// Human-readable output for terminals
    Pretty,
}

/// Host configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON dictionary of `zwift_id -> raw rider`
    pub riders_json_path: PathBuf,
    /// Ids to compact the repository to after loading (`None` keeps all)
    pub retain_rider_ids: Option<Vec<u64>>,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            riders_json_path: PathBuf::from("tests/fixtures/riders.json"),
            retain_rider_ids: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            riders_json_path: env::var("RIDERS_JSON_PATH")
                .map(PathBuf::from)
                .map_err(|_| ConfigError::Missing("RIDERS_JSON_PATH"))?,
            retain_rider_ids: match env::var("RETAIN_RIDER_IDS") {
                Ok(value) if !value.trim().is_empty() => Some(parse_id_list(&value)?),
                _ => None,
            },
            log_format: match env::var("LOG_FORMAT") {
                Ok(value) => parse_log_format(&value)?,
                Err(_) => LogFormat::Json,
            },
        })
    }
}

/// Parse a comma-separated list of numeric ids, ignoring blanks.
fn parse_id_list(value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse().map_err(|_| ConfigError::Invalid {
                var: "RETAIN_RIDER_IDS",
                value: id.to_string(),
            })
        })
        .collect()
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        _ => Err(ConfigError::Invalid {
            var: "LOG_FORMAT",
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
