//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::LogConfig;

/// Installs a global `fmt` subscriber filtered by `config.filter`.
///
/// Returns `false` if a global subscriber was already installed (for
/// example by the embedding application or an earlier call); the existing
/// one stays in place.
pub fn init(config: &LogConfig) -> bool {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .try_init()
        .is_ok()
}
