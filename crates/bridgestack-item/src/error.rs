//! Error types for the item layer.
//!
//! Item stack operations never fail: malformed input degrades to the empty
//! stack. Errors only come from loading item-type data.

/// Errors that can occur while loading item-type data.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// A component name that is neither a known key nor a numeric id.
    #[error("unknown component key: {0}")]
    UnknownComponent(String),

    /// Two item types in one table share an id.
    #[error("item type {0} is defined twice")]
    DuplicateType(i32),

    /// The item manifest is not valid JSON or has the wrong shape.
    #[cfg(feature = "json")]
    #[error("invalid item manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
