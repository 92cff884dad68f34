//! Session-scoped allocation of network ids and bundle ids.
//!
//! [`NetIdAllocator`] hands out item network ids, [`BundleCache`] hands out
//! bundle ids and remembers which are live. [`SessionBundles`] borrows both
//! for the duration of one reconcile and implements
//! [`BundleTracker`](bridgestack_item::BundleTracker).

use std::collections::HashSet;

use bridgestack_item::{BundleState, BundleTracker, ComponentKey, ItemRegistry, ItemStack};

use crate::{RemoteItem, SessionConfig};

// ---------------------------------------------------------------------------
// NetIdAllocator
// ---------------------------------------------------------------------------

/// Monotonic source of item network ids.
#[derive(Debug, Clone)]
pub struct NetIdAllocator {
    next: i32,
}

impl NetIdAllocator {
    pub fn new(first: i32) -> Self {
        Self { next: first }
    }

    /// Returns a network id that has not been handed out before.
    ///
    /// The counter wraps at `i32::MAX` the way the client's 32-bit ids do.
    pub fn next_id(&mut self) -> i32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> i32 {
        self.next
    }
}

// ---------------------------------------------------------------------------
// BundleCache
// ---------------------------------------------------------------------------

/// Tracks the bundles a session's client currently knows about.
///
/// Bundle ids are allocated at most once. Releasing a bundle only forgets
/// it; the id is never reissued.
#[derive(Debug, Clone)]
pub struct BundleCache {
    next_bundle_id: i32,
    live: HashSet<i32>,
}

impl BundleCache {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            next_bundle_id: config.first_bundle_id,
            live: HashSet::new(),
        }
    }

    /// Attaches a fresh [`BundleState`] to `stack` if its type carries
    /// bundle contents. Call on stacks just received from the origin side.
    ///
    /// Returns `true` if the stack is a bundle.
    pub fn initialize(&self, stack: &mut ItemStack, registry: &dyn ItemRegistry) -> bool {
        let state = stack
            .get_component(ComponentKey::BundleContents, registry)
            .and_then(BundleState::from_component);
        let is_bundle = state.is_some();
        stack.set_bundle_state(state);
        is_bundle
    }

    /// Stamps `stack`'s bundle id onto an outbound `remote` item. Leaves
    /// `remote` untouched for stacks that are not bundles.
    pub fn check_for_bundle(&self, stack: &ItemStack, remote: &mut RemoteItem) {
        if stack.bundle_state().is_none() {
            return;
        }
        let bundle_id = stack.bundle_id();
        if !self.is_live(bundle_id) {
            tracing::debug!(bundle_id, "sending bundle that this session has not registered");
        }
        remote.bundle_id = Some(bundle_id);
    }

    /// Whether `bundle_id` is currently live in this session.
    pub fn is_live(&self, bundle_id: i32) -> bool {
        self.live.contains(&bundle_id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn allocate(&mut self) -> i32 {
        let id = self.next_bundle_id;
        self.next_bundle_id = self.next_bundle_id.wrapping_add(1);
        self.live.insert(id);
        id
    }
}

// ---------------------------------------------------------------------------
// SessionBundles
// ---------------------------------------------------------------------------

/// The session's [`BundleTracker`]: a bundle cache plus the net-id source
/// for bundle contents.
pub struct SessionBundles<'a> {
    pub(crate) cache: &'a mut BundleCache,
    pub(crate) net_ids: &'a mut NetIdAllocator,
}

impl<'a> SessionBundles<'a> {
    pub fn new(cache: &'a mut BundleCache, net_ids: &'a mut NetIdAllocator) -> Self {
        Self { cache, net_ids }
    }
}

impl BundleTracker for SessionBundles<'_> {
    fn mark_new(&mut self, state: &mut BundleState) {
        let bundle_id = self.cache.allocate();
        state.set_bundle_id(bundle_id);
        for item in state.contents_for_ids_mut() {
            item.set_network_id(self.net_ids.next_id());
        }
    }

    /// Keeps the old bundle id and, for each new item, reuses the network id
    /// of the first not-yet-claimed old item with the same type and patch.
    /// Items without a match get fresh ids.
    fn remap(&mut self, new_state: &mut BundleState, old_state: &BundleState) {
        let old_id = old_state.bundle_id();
        if !self.cache.is_live(old_id) {
            tracing::debug!(bundle_id = old_id, "remap against unknown bundle, registering as new");
            self.mark_new(new_state);
            return;
        }
        new_state.set_bundle_id(old_id);

        let old_items = old_state.contents();
        let mut claimed = vec![false; old_items.len()];
        for item in new_state.contents_for_ids_mut() {
            let matched = (0..old_items.len()).find(|&index| {
                let old = &old_items[index];
                !claimed[index]
                    && old.type_id() == item.type_id()
                    && old.wire_patch() == item.wire_patch()
            });
            match matched {
                Some(index) => {
                    claimed[index] = true;
                    item.set_network_id(old_items[index].network_id());
                }
                None => item.set_network_id(self.net_ids.next_id()),
            }
        }
    }

    fn release(&mut self, bundle_id: i32) {
        if !self.cache.live.remove(&bundle_id) {
            tracing::debug!(bundle_id, "released a bundle that was not live");
        }
    }
}
