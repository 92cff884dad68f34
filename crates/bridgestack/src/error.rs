//! Unified error type for Bridgestack.

use bridgestack_item::ItemError;
use bridgestack_protocol::ProtocolError;
use bridgestack_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes let `?` convert sub-crate errors directly.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Version registry construction failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Item-type data could not be loaded.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// A session could not be established.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The proxy configuration document is malformed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
