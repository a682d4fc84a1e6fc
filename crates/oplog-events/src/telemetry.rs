//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs a global `fmt` subscriber configured from `config`.
///
/// An invalid level string falls back to `info`. Returns `false` if a
/// global subscriber was already installed, e.g. by the embedding host, in
/// which case that subscriber keeps receiving oplog's events.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::info!(level = %config.level, json = config.json, "oplog tracing initialized");
    } else {
        tracing::debug!("global tracing subscriber already set, keeping it");
    }
    installed
}
