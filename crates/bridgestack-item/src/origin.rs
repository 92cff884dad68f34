//! The origin (server-side) protocol's item stack.

use serde::{Deserialize, Serialize};

use crate::ComponentPatch;

/// An item stack exactly as the origin protocol sends it.
///
/// No normalisation happens here: an `OriginStack` with `amount == 0` is
/// kept as-is and only becomes "empty" once lifted into an
/// [`ItemStack`](crate::ItemStack).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OriginStack {
    pub id: i32,
    pub amount: i32,
    /// The component patch, omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<ComponentPatch>,
}

impl OriginStack {
    pub fn new(id: i32, amount: i32) -> Self {
        Self {
            id,
            amount,
            patch: None,
        }
    }

    pub fn with_patch(mut self, patch: ComponentPatch) -> Self {
        self.patch = Some(patch);
        self
    }
}
