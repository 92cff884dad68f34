//! Integration tests for the item model against a JSON item manifest.

use bridgestack_item::{
    BundleState, BundleTracker, ComponentKey, ComponentPatch, ComponentValue, ItemRegistry,
    ItemStack, ItemTable, OriginStack, PatchEntry, SlotDisplay,
};

const MANIFEST: &str = r#"[
    { "id": 1, "identifier": "minecraft:iron_sword",
      "components": { "max_stack_size": 1, "max_damage": 250, "damage": 0 } },
    { "id": 2, "identifier": "minecraft:elytra",
      "components": { "max_stack_size": 1, "max_damage": 432, "damage": 0, "glider": null } },
    { "id": 3, "identifier": "minecraft:stone",
      "components": { "max_stack_size": 64 } },
    { "id": 10, "identifier": "minecraft:bundle",
      "components": { "max_stack_size": 1, "bundle_contents": [] } }
]"#;

const SWORD: i32 = 1;
const ELYTRA: i32 = 2;
const STONE: i32 = 3;
const BUNDLE: i32 = 10;

fn table() -> ItemTable {
    ItemTable::from_json_str(MANIFEST).expect("manifest is valid")
}

// =========================================================================
// Sequential tracker: fresh ids, remap keeps the old bundle id.
// =========================================================================

#[derive(Default)]
struct CountingTracker {
    next_bundle_id: i32,
    released: Vec<i32>,
}

impl BundleTracker for CountingTracker {
    fn mark_new(&mut self, state: &mut BundleState) {
        state.set_bundle_id(self.next_bundle_id);
        self.next_bundle_id += 1;
    }

    fn remap(&mut self, new_state: &mut BundleState, old_state: &BundleState) {
        new_state.set_bundle_id(old_state.bundle_id());
    }

    fn release(&mut self, bundle_id: i32) {
        self.released.push(bundle_id);
    }
}

fn lift_bundle(registry: &dyn ItemRegistry, origin: OriginStack) -> ItemStack {
    let mut stack = ItemStack::from_origin(Some(origin));
    let state = stack
        .get_component(ComponentKey::BundleContents, registry)
        .and_then(BundleState::from_component);
    stack.set_bundle_state(state);
    stack
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_manifest_defaults_apply_to_stacks_without_patch() {
    let registry = table();
    let stone = ItemStack::of(STONE, 32, None);
    assert_eq!(
        stone.get_component(ComponentKey::MaxStackSize, &registry),
        Some(&ComponentValue::Int(64))
    );
    assert!(!stone.is_damageable(&registry));
    assert!(ItemStack::of(SWORD, 1, None).is_damageable(&registry));
}

#[test]
fn test_broken_elytra_patch_from_json() {
    let registry = table();
    let origin: OriginStack = serde_json::from_str(
        r#"{ "id": 2, "amount": 1, "patch": { "glider": "removed", "damage": { "set": 431 } } }"#,
    )
    .unwrap();
    let elytra = ItemStack::from_origin(Some(origin));

    assert_eq!(elytra.type_id(), ELYTRA);
    assert_eq!(elytra.get_component(ComponentKey::Glider, &registry), None);
    assert_eq!(elytra.damage(&registry), 431);
    assert!(elytra.next_hit_breaks(&registry));
}

#[test]
fn test_unknown_type_resolves_to_air() {
    let registry = table();
    let stack = ItemStack::of(999, 1, None);
    assert!(stack.resolve_type(&registry).is_air());
    assert_eq!(stack.get_component(ComponentKey::MaxStackSize, &registry), None);
}

#[test]
fn test_wire_patch_and_effective_components_differ() {
    let registry = table();
    let mut patch = ComponentPatch::new();
    patch.set(ComponentKey::CustomName, "Excalibur");
    let sword = ItemStack::of(SWORD, 1, Some(patch));

    assert_eq!(sword.wire_patch().map(ComponentPatch::len), Some(1));
    let effective = sword.effective_components(&registry).unwrap();
    assert_eq!(effective.len(), 4);
    assert_eq!(
        effective.get(ComponentKey::CustomName).and_then(ComponentValue::as_text),
        Some("Excalibur")
    );
}

#[test]
fn test_slot_display_json_lifts_into_stack() {
    let display: SlotDisplay = serde_json::from_str(
        r#"{ "type": "stack", "stack": { "id": 3, "amount": 5 } }"#,
    )
    .unwrap();
    let mut stack = ItemStack::from(display);
    assert_eq!(stack.quantity(), 5);
    assert_eq!(stack.to_display(), SlotDisplay::Stack { stack: OriginStack::new(STONE, 5) });

    let fuel: SlotDisplay = serde_json::from_str(r#"{ "type": "any_fuel" }"#).unwrap();
    assert!(ItemStack::from(fuel).is_empty());
}

#[test]
fn test_bundle_lifecycle_keeps_identity_then_releases() {
    let registry = table();
    let mut tracker = CountingTracker::default();

    let origin = OriginStack::new(BUNDLE, 1).with_patch(
        [(
            ComponentKey::BundleContents,
            PatchEntry::Set(ComponentValue::Items(vec![OriginStack::new(STONE, 4)])),
        )]
        .into_iter()
        .collect(),
    );

    let mut first = lift_bundle(&registry, origin.clone());
    first.reconcile_bundle(&mut tracker, None);
    assert_eq!(first.bundle_id(), 0);
    assert_eq!(first.bundle_state().unwrap().contents().len(), 1);

    // The same bundle arrives again with one stone taken out.
    let mut second = lift_bundle(&registry, origin);
    second
        .bundle_state_mut()
        .unwrap()
        .contents_mut()[0]
        .quantity_sub(1);
    second.reconcile_bundle(&mut tracker, first.bundle_state());
    assert_eq!(second.bundle_id(), 0);

    let lowered = second.to_origin_stack(None).unwrap();
    assert_eq!(
        lowered.patch.unwrap().get(ComponentKey::BundleContents),
        Some(&PatchEntry::Set(ComponentValue::Items(vec![OriginStack::new(STONE, 3)])))
    );

    // Replaced by a plain stone: the bundle id is released.
    let mut stone = ItemStack::of(STONE, 1, None);
    stone.reconcile_bundle(&mut tracker, second.bundle_state());
    assert_eq!(tracker.released, vec![0]);
}

#[test]
fn test_unknown_component_key_in_manifest_is_rejected() {
    let err = ItemTable::from_json_str(
        r#"[{ "id": 5, "identifier": "minecraft:apple", "components": { "flavour": 1 } }]"#,
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("invalid item manifest"));
}

#[test]
fn test_duplicate_type_in_manifest_is_rejected() {
    let err = ItemTable::from_json_str(
        r#"[{ "id": 3, "identifier": "a" }, { "id": 3, "identifier": "b" }]"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "item type 3 is defined twice");
}
