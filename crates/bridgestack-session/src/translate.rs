//! Outbound translation: from [`ItemStack`] to the remote client's item.
//!
//! The per-protocol encoding (runtime ids, NBT, block states, ...) is the
//! translator's business. This module fixes the parts every translation
//! shares: empty stacks become air, and the result is stamped with the
//! stack's network id and, for bundles, the bundle id.

use bridgestack_item::{ComponentPatch, ItemStack};
use bridgestack_protocol::CodecEntry;
use serde::{Deserialize, Serialize};

use crate::ProxySession;

/// An item in the remote (client-side) protocol's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// The remote protocol's runtime id for the item definition.
    pub definition_id: i32,
    pub count: i32,
    pub damage: i32,
    /// Custom display name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    pub net_id: i32,
    /// Tells the client to address this item by `net_id`.
    pub uses_net_id: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<i32>,
}

impl RemoteItem {
    /// The remote empty slot.
    pub fn air() -> Self {
        Self {
            definition_id: 0,
            count: 0,
            damage: 0,
            custom_name: None,
            net_id: 0,
            uses_net_id: false,
            bundle_id: None,
        }
    }

    pub fn is_air(&self) -> bool {
        self.definition_id == 0
    }
}

/// Converts an origin-side `(type, quantity, patch)` into the remote item
/// encoding for a given codec.
///
/// Implementations may branch on `codec.protocol_version()` feature gates.
/// They leave `net_id`, `uses_net_id` and `bundle_id` alone; those are
/// stamped afterwards by [`to_remote_item`].
pub trait OutboundTranslator {
    fn translate(
        &self,
        codec: &CodecEntry,
        type_id: i32,
        quantity: i32,
        patch: Option<&ComponentPatch>,
    ) -> RemoteItem;
}

/// Translates `stack` for `session`'s client.
pub fn to_remote_item(
    stack: &ItemStack,
    session: &ProxySession,
    translator: &dyn OutboundTranslator,
) -> RemoteItem {
    if stack.is_empty() {
        return RemoteItem::air();
    }
    let mut remote = translator.translate(
        session.codec(),
        stack.type_id(),
        stack.quantity(),
        stack.wire_patch(),
    );
    remote.net_id = stack.network_id();
    remote.uses_net_id = true;
    session.bundle_cache().check_for_bundle(stack, &mut remote);
    remote
}
