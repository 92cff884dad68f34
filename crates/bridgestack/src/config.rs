//! Proxy configuration.

use bridgestack_session::SessionConfig;
use serde::{Deserialize, Serialize};

use crate::BridgeError;

/// Logging settings, consumed by [`telemetry::init`](crate::telemetry::init).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// An `EnvFilter` directive such as `"info"` or
    /// `"bridgestack_session=debug"`. `None` falls back to `RUST_LOG`, then
    /// `info`.
    pub filter: Option<String>,

    /// Colourise output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: None,
            ansi: true,
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub session: SessionConfig,
    pub log: LogConfig,
}

impl ProxyConfig {
    /// # Errors
    /// [`BridgeError::Config`] if `json` is not a valid config document.
    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// [`BridgeError::Config`] if `json` is not a valid config document.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, BridgeError> {
        Ok(serde_json::from_slice(json)?)
    }
}
