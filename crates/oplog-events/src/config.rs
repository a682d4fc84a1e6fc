//! Capture and logging configuration, loaded from TOML and the environment.

use serde::Deserialize;
use thiserror::Error;

use crate::event::EventDomain;

/// Top-level oplog configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OplogConfig {
    /// Capture settings.
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which events are recorded and how much room the journal reserves.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Domains whose events are dropped by the recorder (e.g. `["DIRECTORY"]`).
    #[serde(default)]
    pub disabled_domains: Vec<EventDomain>,

    /// Initial capacity of the in-memory journal.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "oplog_events=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_journal_capacity() -> usize {
    1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            disabled_domains: Vec::new(),
            journal_capacity: default_journal_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `OPLOG_LOG_LEVEL` overrides `logging.level`
/// - `OPLOG_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `OPLOG_DISABLED_DOMAINS` overrides `capture.disabled_domains`
///   (comma separated, e.g. `DIRECTORY,NAVIGATION`; empty clears the list)
/// - `OPLOG_JOURNAL_CAPACITY` overrides `capture.journal_capacity`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<OplogConfig, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                OplogConfig::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => OplogConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `OPLOG_*` overrides, reading variables through `lookup`.
pub fn apply_env_overrides<F>(config: &mut OplogConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup("OPLOG_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("OPLOG_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(domains) = lookup("OPLOG_DISABLED_DOMAINS") {
        config.capture.disabled_domains = parse_domain_list(&domains);
    }
    if let Some(capacity) = lookup("OPLOG_JOURNAL_CAPACITY") {
        if let Ok(parsed) = capacity.parse() {
            config.capture.journal_capacity = parsed;
        }
    }
}

fn parse_domain_list(raw: &str) -> Vec<EventDomain> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter_map(|label| match label.parse() {
            Ok(domain) => Some(domain),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unknown domain in OPLOG_DISABLED_DOMAINS");
                None
            }
        })
        .collect()
}
