//! Error types for the session layer.

/// Errors that can occur while setting up a session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// The client negotiated a protocol number the proxy has no codec for.
    /// The connection must be refused; retrying will not help.
    #[error("unsupported client protocol version {0}")]
    UnsupportedVersion(u32),
}
