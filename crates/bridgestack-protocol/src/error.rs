//! Error types for the protocol layer.
//!
//! Only registry construction can fail. Looking up a version that was never
//! registered is not an error here: [`VersionRegistry::lookup`] returns
//! `None` and the session layer turns that into a refused connection.
//!
//! [`VersionRegistry::lookup`]: crate::VersionRegistry::lookup

/// Errors raised while building a [`VersionRegistry`](crate::VersionRegistry).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Entries must be registered in strictly ascending version order.
    #[error("protocol {next} registered after {previous}; versions must ascend")]
    NotAscending { previous: u32, next: u32 },

    /// The same protocol number was registered twice.
    #[error("protocol {0} is already registered")]
    Duplicate(u32),

    /// A registry needs at least one entry to have a default.
    #[error("version registry has no entries")]
    Empty,
}
