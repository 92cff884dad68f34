//! Session configuration.

use serde::{Deserialize, Serialize};

/// Starting points for the ids a session hands out.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// First network id assigned to an item stack. Id 0 is reserved for the
    /// empty stack.
    pub first_item_net_id: i32,

    /// First bundle id assigned to a newly seen bundle.
    pub first_bundle_id: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            first_item_net_id: 1,
            first_bundle_id: 0,
        }
    }
}
