//! The per-client translation session.

use bridgestack_item::{BundleState, ItemRegistry, ItemStack, OriginStack};
use bridgestack_protocol::{CodecEntry, ProtocolVersion, VersionRegistry};

use crate::{BundleCache, NetIdAllocator, SessionBundles, SessionConfig, SessionError};

/// Translation state for one connected client.
///
/// Owned by the task handling that client's packets. Nothing in here is
/// shared with other sessions, so it needs no locking.
#[derive(Debug, Clone)]
pub struct ProxySession {
    codec: CodecEntry,
    net_ids: NetIdAllocator,
    bundles: BundleCache,
}

impl ProxySession {
    /// Sets up a session for a client that negotiated `protocol_version`.
    ///
    /// # Errors
    /// [`SessionError::UnsupportedVersion`] if `registry` has no entry for
    /// the version. The caller must refuse the connection.
    pub fn establish(
        protocol_version: u32,
        registry: &VersionRegistry,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        let Some(codec) = registry.lookup(protocol_version) else {
            tracing::info!(
                protocol_version,
                supported = %registry.supported_versions_summary(),
                "refusing client with unsupported protocol version"
            );
            return Err(SessionError::UnsupportedVersion(protocol_version));
        };

        tracing::debug!(
            protocol_version,
            label = codec.version_label(),
            codec = %codec.codec(),
            "session codec selected"
        );

        Ok(Self {
            codec: codec.clone(),
            net_ids: NetIdAllocator::new(config.first_item_net_id),
            bundles: BundleCache::new(config),
        })
    }

    /// The negotiated protocol version. Feature gates hang off this.
    pub fn protocol_version(&self) -> ProtocolVersion {
        self.codec.protocol_version()
    }

    pub fn codec(&self) -> &CodecEntry {
        &self.codec
    }

    pub fn next_item_net_id(&mut self) -> i32 {
        self.net_ids.next_id()
    }

    pub fn bundle_cache(&self) -> &BundleCache {
        &self.bundles
    }

    pub fn bundle_cache_mut(&mut self) -> &mut BundleCache {
        &mut self.bundles
    }

    /// The session's bundle tracker, borrowing the cache and the net-id
    /// source together.
    pub fn bundle_tracker(&mut self) -> SessionBundles<'_> {
        SessionBundles::new(&mut self.bundles, &mut self.net_ids)
    }

    /// Lifts a stack received from the origin side: assigns it a network id
    /// and attaches bundle state if it is a bundle.
    pub fn lift_origin(
        &mut self,
        origin: Option<OriginStack>,
        registry: &dyn ItemRegistry,
    ) -> ItemStack {
        let mut stack = ItemStack::from_origin(origin);
        if stack.is_empty() {
            return stack;
        }
        let net_id = self.next_item_net_id();
        stack.set_network_id(net_id);
        self.bundles.initialize(&mut stack, registry);
        stack
    }

    /// Runs bundle reconciliation for a slot update against this session's
    /// tracker. `previous` is the bundle state of the stack being replaced.
    pub fn reconcile_slot(&mut self, new_stack: &mut ItemStack, previous: Option<&BundleState>) {
        let mut tracker = self.bundle_tracker();
        new_stack.reconcile_bundle(&mut tracker, previous);
    }
}
