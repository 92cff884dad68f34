//! The canonical in-memory item stack.
//!
//! An [`ItemStack`] is `(type_id, quantity, patch)` plus the network id the
//! remote client uses to address it. It is what inventory logic works on:
//! origin stacks and slot displays are lifted into it on the way in, and it
//! is lowered back into an [`OriginStack`] (or translated for the remote
//! side) on the way out.
//!
//! # The empty stack
//!
//! A stack with `quantity <= 0` or `type_id == AIR_ID` is empty no matter
//! what else is stored in it. Every accessor normalises: an empty stack
//! reports type 0, quantity 0, network id 0 and no components.

use std::cell::OnceCell;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::registry::AIR_ID;
use crate::{
    BundleState, ComponentKey, ComponentPatch, ComponentSet, ComponentValue, ItemRegistry,
    ItemType, OriginStack, PatchEntry, SlotDisplay,
};

/// Network id given to freshly created, non-empty stacks.
pub const DEFAULT_NETWORK_ID: i32 = 1;

/// One inventory item stack.
///
/// Equality and hashing look only at the normalised
/// `(type_id, quantity, wire_patch, network_id)`. Bundle state is
/// session-scoped and the cached item type is a lookup cache, so neither
/// takes part.
#[derive(Debug, Clone)]
pub struct ItemStack {
    type_id: i32,
    quantity: i32,
    patch: Option<ComponentPatch>,
    network_id: i32,
    bundle_state: Option<BundleState>,
    /// Memoised registry lookup for `type_id`. `type_id` never changes after
    /// construction, so the cache never goes stale.
    item_type: OnceCell<Arc<ItemType>>,
}

impl ItemStack {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Stores the given fields as-is. Normalisation happens on read.
    pub fn of(type_id: i32, quantity: i32, patch: Option<ComponentPatch>) -> Self {
        Self {
            type_id,
            quantity,
            patch,
            network_id: DEFAULT_NETWORK_ID,
            bundle_state: None,
            item_type: OnceCell::new(),
        }
    }

    /// The canonical empty stack.
    pub fn empty() -> Self {
        Self {
            type_id: AIR_ID,
            quantity: 0,
            patch: None,
            network_id: 0,
            bundle_state: None,
            item_type: OnceCell::new(),
        }
    }

    /// Lifts an origin stack. `None` is the empty stack.
    pub fn from_origin(stack: Option<OriginStack>) -> Self {
        match stack {
            Some(stack) => Self::of(stack.id, stack.amount, stack.patch),
            None => Self::empty(),
        }
    }

    /// Lifts a slot display.
    ///
    /// Display shapes that don't name a concrete stack degrade to the empty
    /// stack with a warning.
    pub fn from_display(display: SlotDisplay) -> Self {
        match display {
            SlotDisplay::Empty => Self::empty(),
            SlotDisplay::Item { item } => Self::of(item, 1, None),
            SlotDisplay::Stack { stack } => Self::from_origin(Some(stack)),
            other @ (SlotDisplay::AnyFuel
            | SlotDisplay::Tag { .. }
            | SlotDisplay::WithRemainder { .. }
            | SlotDisplay::Composite { .. }
            | SlotDisplay::Unknown) => {
                tracing::warn!(
                    display = ?other,
                    "unsure how to convert slot display to an item stack"
                );
                Self::empty()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Normalised accessors
    // -----------------------------------------------------------------------

    /// `true` if this stack holds nothing.
    ///
    /// This is the one normalisation rule every other accessor builds on. The
    /// raw fields are left alone, so a stack can be "empty" while its stored
    /// quantity is negative or its patch still has entries; readers just never
    /// see them.
    pub fn is_empty(&self) -> bool {
        self.quantity <= 0 || self.type_id == AIR_ID
    }

    /// The item type id, or [`AIR_ID`] for an empty stack.
    pub fn type_id(&self) -> i32 {
        if self.is_empty() { 0 } else { self.type_id }
    }

    /// The stack size. Never negative: an empty stack reports 0.
    pub fn quantity(&self) -> i32 {
        if self.is_empty() { 0 } else { self.quantity }
    }

    /// The handle the remote client uses for this exact stack.
    ///
    /// Empty stacks report 0 because the client has nothing to address. A
    /// stack that later becomes non-empty again gets its stored id back.
    pub fn network_id(&self) -> i32 {
        if self.is_empty() { 0 } else { self.network_id }
    }

    /// Overwrites the network id. Normally only the session's id allocator
    /// calls this.
    pub fn set_network_id(&mut self, network_id: i32) {
        self.network_id = network_id;
    }

    /// The bundle identity, or `-1` if this is not a tracked bundle.
    pub fn bundle_id(&self) -> i32 {
        if self.is_empty() {
            return -1;
        }
        self.bundle_state.as_ref().map_or(-1, BundleState::bundle_id)
    }

    /// Session-side bundle bookkeeping, present only on bundles.
    ///
    /// It is not part of the stack's identity: two stacks that differ only
    /// here compare equal.
    pub fn bundle_state(&self) -> Option<&BundleState> {
        self.bundle_state.as_ref()
    }

    /// Edit the bundle through [`BundleState::contents_mut`] so the change is
    /// flushed into the patch on the next [`to_origin_stack`](Self::to_origin_stack).
    pub fn bundle_state_mut(&mut self) -> Option<&mut BundleState> {
        self.bundle_state.as_mut()
    }

    pub fn set_bundle_state(&mut self, bundle_state: Option<BundleState>) {
        self.bundle_state = bundle_state;
    }

    // -----------------------------------------------------------------------
    // Components
    // -----------------------------------------------------------------------

    /// The patch as it goes over the wire: overrides and tombstones only,
    /// without inherited defaults.
    pub fn wire_patch(&self) -> Option<&ComponentPatch> {
        if self.is_empty() { None } else { self.patch.as_ref() }
    }

    /// Defaults with the patch applied. A read-only snapshot; use
    /// [`get_or_create_patch`](Self::get_or_create_patch) to change the stack.
    pub fn effective_components(&self, registry: &dyn ItemRegistry) -> Option<ComponentSet> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.resolve_type(registry)
                .components()
                .overlay(self.patch.as_ref()),
        )
    }

    /// `true` once this instance has a patch at all, even an empty one.
    pub fn has_overrides(&self) -> bool {
        self.patch.is_some()
    }

    /// Looks up one component: the patch decides if it mentions the key
    /// (a tombstone yields `None` without consulting defaults), otherwise
    /// the type default applies.
    pub fn get_component<'a>(
        &'a self,
        key: ComponentKey,
        registry: &dyn ItemRegistry,
    ) -> Option<&'a ComponentValue> {
        match self.wire_patch().and_then(|patch| patch.get(key)) {
            Some(PatchEntry::Set(value)) => Some(value),
            Some(PatchEntry::Removed) => None,
            None => self.resolve_type(registry).component(key),
        }
    }

    /// [`get_component`](Self::get_component), calling `fallback` only on a
    /// miss.
    pub fn get_component_or(
        &self,
        key: ComponentKey,
        registry: &dyn ItemRegistry,
        fallback: impl FnOnce() -> ComponentValue,
    ) -> ComponentValue {
        match self.get_component(key, registry) {
            Some(value) => value.clone(),
            None => fallback(),
        }
    }

    /// The patch, allocated empty on first use.
    pub fn get_or_create_patch(&mut self) -> &mut ComponentPatch {
        self.patch.get_or_insert_with(ComponentPatch::new)
    }

    // -----------------------------------------------------------------------
    // Damage
    // -----------------------------------------------------------------------

    fn int_component(&self, key: ComponentKey, registry: &dyn ItemRegistry) -> i32 {
        self.get_component_or(key, registry, || ComponentValue::Int(0))
            .as_int()
            .unwrap_or(0)
    }

    pub fn max_damage(&self, registry: &dyn ItemRegistry) -> i32 {
        self.int_component(ComponentKey::MaxDamage, registry)
    }

    /// Stored damage, floored at zero and capped at [`max_damage`](Self::max_damage).
    pub fn damage(&self, registry: &dyn ItemRegistry) -> i32 {
        let damage = self.int_component(ComponentKey::Damage, registry).max(0);
        damage.min(self.max_damage(registry))
    }

    pub fn is_damageable(&self, registry: &dyn ItemRegistry) -> bool {
        self.get_component(ComponentKey::MaxDamage, registry).is_some()
            && self.get_component(ComponentKey::Unbreakable, registry).is_none()
            && self.get_component(ComponentKey::Damage, registry).is_some()
    }

    pub fn next_hit_breaks(&self, registry: &dyn ItemRegistry) -> bool {
        self.is_damageable(registry)
            && self.damage(registry) >= self.max_damage(registry).saturating_sub(1)
    }

    // -----------------------------------------------------------------------
    // Quantity
    // -----------------------------------------------------------------------

    /// Adds `delta` (possibly negative) without clamping. Check
    /// [`is_empty`](Self::is_empty) afterwards.
    ///
    /// Arithmetic wraps like the origin protocol's 32-bit counts: a stack
    /// pushed past `i32::MAX` turns negative and therefore empty.
    pub fn quantity_delta(&mut self, delta: i32) {
        self.quantity = self.quantity.wrapping_add(delta);
    }

    pub fn quantity_add(&mut self, amount: i32) {
        self.quantity_delta(amount);
    }

    pub fn quantity_sub(&mut self, amount: i32) {
        self.quantity = self.quantity.wrapping_sub(amount);
    }

    // -----------------------------------------------------------------------
    // Outbound conversions
    // -----------------------------------------------------------------------

    /// Lowers this stack to the origin protocol. `None` for the empty stack.
    ///
    /// Locally edited bundle contents are written into the patch first:
    /// non-empty contents become the `bundle_contents` component, empty
    /// contents remove it. This is where bundle edits become visible on the
    /// wire, and it is repeatable: the same state flushes to the same patch.
    pub fn to_origin_stack(&mut self, quantity_override: Option<i32>) -> Option<OriginStack> {
        if self.is_empty() {
            return None;
        }
        self.flush_bundle_contents();
        Some(OriginStack {
            id: self.type_id,
            amount: quantity_override.unwrap_or(self.quantity),
            patch: self.patch.clone(),
        })
    }

    fn flush_bundle_contents(&mut self) {
        let contents = match self.bundle_state.as_mut() {
            Some(bundle) if !bundle.is_fresh_from_origin() => bundle.to_component(),
            _ => return,
        };
        match contents {
            Some(component) => {
                self.get_or_create_patch()
                    .set(ComponentKey::BundleContents, component);
            }
            None => {
                // An empty bundle has no component at all.
                if let Some(patch) = self.patch.as_mut() {
                    patch.clear(ComponentKey::BundleContents);
                }
            }
        }
    }

    /// Wraps this stack as a slot display. Goes through
    /// [`to_origin_stack`](Self::to_origin_stack), so bundle edits flush.
    pub fn to_display(&mut self) -> SlotDisplay {
        match self.to_origin_stack(None) {
            Some(stack) => SlotDisplay::Stack { stack },
            None => SlotDisplay::Empty,
        }
    }

    // -----------------------------------------------------------------------
    // Type resolution and copies
    // -----------------------------------------------------------------------

    /// The item type, memoised after the first lookup. Air for the empty
    /// stack.
    pub fn resolve_type(&self, registry: &dyn ItemRegistry) -> &Arc<ItemType> {
        if self.is_empty() {
            return ItemType::air_ref();
        }
        self.item_type.get_or_init(|| registry.lookup_type(self.type_id))
    }

    /// A deep copy with its own patch and bundle state, keeping the network
    /// id. Used to snapshot a slot before a change.
    pub fn duplicate(&self, quantity_override: Option<i32>) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        let mut copy = self.clone();
        if let Some(quantity) = quantity_override {
            copy.quantity = quantity;
        }
        copy
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Option<OriginStack>> for ItemStack {
    fn from(stack: Option<OriginStack>) -> Self {
        Self::from_origin(stack)
    }
}

impl From<SlotDisplay> for ItemStack {
    fn from(display: SlotDisplay) -> Self {
        Self::from_display(display)
    }
}

impl PartialEq for ItemStack {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
            && self.quantity() == other.quantity()
            && self.wire_patch() == other.wire_patch()
            && self.network_id() == other.network_id()
    }
}

impl Eq for ItemStack {}

impl Hash for ItemStack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
        self.quantity().hash(state);
        self.wire_patch().hash(state);
        self.network_id().hash(state);
    }
}

// =========================================================================
// Tests
// =========================================================================
