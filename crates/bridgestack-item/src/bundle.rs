//! Bundles: items that contain other item stacks.
//!
//! The remote client addresses a bundle by a bundle id and each stack inside
//! it by its own network id. When a slot holding a bundle is updated, those
//! ids must carry over from the previous state; if they change, the client
//! throws away and rebuilds the bundle UI, which shows up as flicker.
//!
//! This module decides *when* ids must carry over ([`ItemStack::reconcile_bundle`]).
//! How new ids are allocated and how contents are matched is the job of a
//! session-scoped [`BundleTracker`].

use crate::{ComponentValue, ItemStack};

/// Bundle id of a bundle that has not been registered yet.
pub const UNASSIGNED_BUNDLE_ID: i32 = -1;

// ---------------------------------------------------------------------------
// BundleState
// ---------------------------------------------------------------------------

/// Session-side view of a bundle's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleState {
    bundle_id: i32,
    contents: Vec<ItemStack>,
    /// `true` while the contents are exactly what the origin last sent.
    fresh_from_origin: bool,
}

impl BundleState {
    /// State for contents just received from the origin side.
    pub fn from_origin(contents: Vec<ItemStack>) -> Self {
        Self {
            bundle_id: UNASSIGNED_BUNDLE_ID,
            contents,
            fresh_from_origin: true,
        }
    }

    /// State decoded from a `bundle_contents` component value.
    ///
    /// Returns `None` if the value is not a list of stacks.
    pub fn from_component(value: &ComponentValue) -> Option<Self> {
        let items = value.as_items()?;
        let contents = items
            .iter()
            .cloned()
            .map(|stack| ItemStack::from_origin(Some(stack)))
            .collect();
        Some(Self::from_origin(contents))
    }

    pub fn bundle_id(&self) -> i32 {
        self.bundle_id
    }

    pub fn set_bundle_id(&mut self, bundle_id: i32) {
        self.bundle_id = bundle_id;
    }

    pub fn contents(&self) -> &[ItemStack] {
        &self.contents
    }

    /// Mutable access to the contents. Marks the state as locally edited, so
    /// the next outbound conversion writes it back into the patch.
    pub fn contents_mut(&mut self) -> &mut Vec<ItemStack> {
        self.fresh_from_origin = false;
        &mut self.contents
    }

    /// Mutable access for id bookkeeping only; does not mark the state as
    /// edited.
    pub fn contents_for_ids_mut(&mut self) -> &mut [ItemStack] {
        &mut self.contents
    }

    pub fn is_fresh_from_origin(&self) -> bool {
        self.fresh_from_origin
    }

    pub fn set_fresh_from_origin(&mut self, fresh: bool) {
        self.fresh_from_origin = fresh;
    }

    /// The contents as a `bundle_contents` component value, or `None` when
    /// the bundle is empty (an empty bundle carries no component).
    ///
    /// Emptiness is judged after lowering, so a bundle whose stacks have all
    /// been used up counts as empty even though `contents` still holds them.
    pub fn to_component(&mut self) -> Option<ComponentValue> {
        let stacks: Vec<_> = self
            .contents
            .iter_mut()
            .filter_map(|stack| stack.to_origin_stack(None))
            .collect();
        if stacks.is_empty() {
            return None;
        }
        Some(ComponentValue::Items(stacks))
    }
}

// ---------------------------------------------------------------------------
// BundleTracker
// ---------------------------------------------------------------------------

/// Allocates and carries over bundle and content network ids.
///
/// Implementations are scoped to one session and must never hand out the
/// same bundle id twice.
pub trait BundleTracker {
    /// Registers a bundle seen for the first time: assigns a fresh bundle id
    /// and network ids for its contents.
    fn mark_new(&mut self, state: &mut BundleState);

    /// Carries ids from `old_state` over to `new_state`, which replaces it.
    fn remap(&mut self, new_state: &mut BundleState, old_state: &BundleState);

    /// The bundle with this id left its slot and was not replaced by
    /// another bundle.
    fn release(&mut self, bundle_id: i32) {
        let _ = bundle_id;
    }
}

impl ItemStack {
    /// Stabilises bundle identities after this stack replaced a slot whose
    /// previous bundle state was `previous`.
    ///
    /// - both present: same bundle, updated. Remap against `previous`.
    /// - only this stack has one: new bundle. Register it.
    /// - only `previous` has one: bundle left the slot. Release its id.
    /// - neither: nothing to do.
    pub fn reconcile_bundle(
        &mut self,
        tracker: &mut dyn BundleTracker,
        previous: Option<&BundleState>,
    ) {
        match (self.bundle_state_mut(), previous) {
            (Some(current), Some(previous)) => {
                tracing::debug!(bundle_id = previous.bundle_id(), "remapping updated bundle");
                tracker.remap(current, previous);
            }
            (Some(current), None) => {
                tracker.mark_new(current);
                tracing::debug!(bundle_id = current.bundle_id(), "registered new bundle");
            }
            (None, Some(previous)) => {
                if previous.bundle_id() != UNASSIGNED_BUNDLE_ID {
                    tracing::debug!(bundle_id = previous.bundle_id(), "releasing removed bundle");
                    tracker.release(previous.bundle_id());
                }
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentKey, ComponentPatch, OriginStack, PatchEntry};

    /// Records every call instead of allocating anything.
    #[derive(Default)]
    struct RecordingTracker {
        next_id: i32,
        calls: Vec<String>,
    }

    impl BundleTracker for RecordingTracker {
        fn mark_new(&mut self, state: &mut BundleState) {
            self.calls.push("mark_new".into());
            state.set_bundle_id(self.next_id);
            self.next_id += 1;
        }

        fn remap(&mut self, new_state: &mut BundleState, old_state: &BundleState) {
            self.calls.push(format!("remap {}", old_state.bundle_id()));
            new_state.set_bundle_id(old_state.bundle_id());
        }

        fn release(&mut self, bundle_id: i32) {
            self.calls.push(format!("release {bundle_id}"));
        }
    }

    const BUNDLE: i32 = 10;
    const STONE: i32 = 3;

    fn bundle_with(contents: Vec<ItemStack>) -> ItemStack {
        let mut stack = ItemStack::of(BUNDLE, 1, None);
        stack.set_bundle_state(Some(BundleState::from_origin(contents)));
        stack
    }

    // =====================================================================
    // reconcile_bundle
    // =====================================================================

    #[test]
    fn test_reconcile_new_bundle_marks_new() {
        let mut tracker = RecordingTracker::default();
        let mut stack = bundle_with(vec![]);
        stack.reconcile_bundle(&mut tracker, None);
        assert_eq!(tracker.calls, vec!["mark_new"]);
        assert_eq!(stack.bundle_id(), 0);
    }

    #[test]
    fn test_reconcile_updated_bundle_remaps_against_previous() {
        let mut tracker = RecordingTracker::default();
        let mut previous = BundleState::from_origin(vec![]);
        previous.set_bundle_id(7);

        let mut stack = bundle_with(vec![ItemStack::of(STONE, 1, None)]);
        stack.reconcile_bundle(&mut tracker, Some(&previous));
        assert_eq!(tracker.calls, vec!["remap 7"]);
        assert_eq!(stack.bundle_id(), 7);
    }

    #[test]
    fn test_reconcile_removed_bundle_releases_old_id() {
        let mut tracker = RecordingTracker::default();
        let mut previous = BundleState::from_origin(vec![]);
        previous.set_bundle_id(4);

        let mut stack = ItemStack::of(STONE, 1, None);
        stack.reconcile_bundle(&mut tracker, Some(&previous));
        assert_eq!(tracker.calls, vec!["release 4"]);
    }

    #[test]
    fn test_reconcile_without_bundles_is_noop() {
        let mut tracker = RecordingTracker::default();
        let mut stack = ItemStack::of(STONE, 1, None);
        stack.reconcile_bundle(&mut tracker, None);
        assert!(tracker.calls.is_empty());
    }

    // =====================================================================
    // Flush on emit
    // =====================================================================

    #[test]
    fn test_fresh_bundle_is_not_flushed() {
        let mut stack = bundle_with(vec![ItemStack::of(STONE, 2, None)]);
        let origin = stack.to_origin_stack(None).unwrap();
        assert_eq!(origin.patch, None);
    }

    #[test]
    fn test_edited_bundle_flushes_contents_into_patch() {
        let mut stack = bundle_with(vec![]);
        stack
            .bundle_state_mut()
            .unwrap()
            .contents_mut()
            .push(ItemStack::of(STONE, 2, None));

        let origin = stack.to_origin_stack(None).unwrap();
        let patch = origin.patch.unwrap();
        assert_eq!(
            patch.get(ComponentKey::BundleContents),
            Some(&PatchEntry::Set(ComponentValue::Items(vec![OriginStack::new(STONE, 2)])))
        );
    }

    #[test]
    fn test_flush_is_repeatable() {
        let mut stack = bundle_with(vec![ItemStack::of(STONE, 2, None)]);
        stack.bundle_state_mut().unwrap().set_fresh_from_origin(false);

        let first = stack.to_origin_stack(None).unwrap();
        let second = stack.to_origin_stack(None).unwrap();
        assert_eq!(first.patch, second.patch);
        assert!(first.patch.unwrap().contains(ComponentKey::BundleContents));
    }

    #[test]
    fn test_emptied_bundle_removes_component_entirely() {
        let mut patch = ComponentPatch::new();
        patch.set(
            ComponentKey::BundleContents,
            ComponentValue::Items(vec![OriginStack::new(STONE, 1)]),
        );
        let mut stack = ItemStack::of(BUNDLE, 1, Some(patch));
        stack.set_bundle_state(BundleState::from_component(&ComponentValue::Items(vec![
            OriginStack::new(STONE, 1),
        ])));

        stack.bundle_state_mut().unwrap().contents_mut().clear();
        let origin = stack.to_origin_stack(None).unwrap();
        let patch = origin.patch.unwrap();
        // Removed from the patch, not tombstoned.
        assert_eq!(patch.get(ComponentKey::BundleContents), None);
        assert!(stack.has_overrides());
    }

    #[test]
    fn test_bundle_of_used_up_stacks_removes_component_entirely() {
        let contents = ComponentValue::Items(vec![OriginStack::new(STONE, 1)]);
        let mut patch = ComponentPatch::new();
        patch.set(ComponentKey::BundleContents, contents.clone());
        let mut stack = ItemStack::of(BUNDLE, 1, Some(patch));
        stack.set_bundle_state(BundleState::from_component(&contents));

        // The stack is still in the list, but with quantity 0 it is empty.
        stack
            .bundle_state_mut()
            .unwrap()
            .contents_mut()[0]
            .quantity_sub(1);
        let origin = stack.to_origin_stack(None).unwrap();
        assert_eq!(origin.patch.unwrap().get(ComponentKey::BundleContents), None);
    }

    #[test]
    fn test_to_component_skips_empty_stacks() {
        let mut state =
            BundleState::from_origin(vec![ItemStack::empty(), ItemStack::of(STONE, 2, None)]);
        assert_eq!(
            state.to_component(),
            Some(ComponentValue::Items(vec![OriginStack::new(STONE, 2)]))
        );
    }

    #[test]
    fn test_emptied_bundle_without_patch_stays_without_patch() {
        let mut stack = bundle_with(vec![]);
        stack.bundle_state_mut().unwrap().set_fresh_from_origin(false);
        let origin = stack.to_origin_stack(None).unwrap();
        assert_eq!(origin.patch, None);
    }

    #[test]
    fn test_duplicate_copies_bundle_state() {
        let mut original = bundle_with(vec![ItemStack::of(STONE, 1, None)]);
        original.bundle_state_mut().unwrap().set_bundle_id(3);

        let mut copy = original.duplicate(None);
        copy.bundle_state_mut().unwrap().contents_mut().clear();
        assert_eq!(copy.bundle_id(), 3);
        assert_eq!(original.bundle_state().unwrap().contents().len(), 1);
    }

    #[test]
    fn test_from_component_rejects_non_list() {
        assert_eq!(BundleState::from_component(&ComponentValue::Int(1)), None);
    }
}
