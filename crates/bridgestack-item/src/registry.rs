//! Item types and the registry that resolves them.
//!
//! The proxy's real item database (mappings between both protocols, block
//! states, ...) lives elsewhere. Stacks only need two things from it, which
//! the [`ItemRegistry`] trait captures: the type descriptor for an id and
//! that type's default components.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::{ComponentKey, ComponentSet, ComponentValue, ItemError};

/// The reserved type id meaning "no item".
pub const AIR_ID: i32 = 0;

static AIR: LazyLock<Arc<ItemType>> =
    LazyLock::new(|| Arc::new(ItemType::new(AIR_ID, "minecraft:air", ComponentSet::new())));

// ---------------------------------------------------------------------------
// ItemType
// ---------------------------------------------------------------------------

/// Static description of one item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    id: i32,
    identifier: String,
    #[serde(default)]
    components: ComponentSet,
}

impl ItemType {
    pub fn new(id: i32, identifier: impl Into<String>, components: ComponentSet) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            components,
        }
    }

    /// The canonical descriptor for the empty stack.
    pub fn air() -> Arc<ItemType> {
        Arc::clone(&AIR)
    }

    pub(crate) fn air_ref() -> &'static Arc<ItemType> {
        &AIR
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Namespaced identifier, e.g. `minecraft:elytra`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The type's default components.
    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    pub fn component(&self, key: ComponentKey) -> Option<&ComponentValue> {
        self.components.get(key)
    }

    pub fn is_air(&self) -> bool {
        self.id == AIR_ID
    }
}

// ---------------------------------------------------------------------------
// ItemRegistry
// ---------------------------------------------------------------------------

/// Resolves item type ids.
///
/// Lookups are assumed total for any id that reached an
/// [`ItemStack`](crate::ItemStack). An id missing from the registry is a
/// data-integrity bug, not something callers recover from.
pub trait ItemRegistry {
    fn lookup_type(&self, type_id: i32) -> Arc<ItemType>;

    fn default_components(&self, type_id: i32) -> ComponentSet {
        self.lookup_type(type_id).components().clone()
    }
}

// ---------------------------------------------------------------------------
// ItemTable
// ---------------------------------------------------------------------------

/// A simple in-memory [`ItemRegistry`] keyed by type id.
///
/// Can be loaded from a JSON manifest:
///
/// ```rust
/// use bridgestack_item::{ComponentKey, ItemRegistry, ItemTable};
///
/// let table = ItemTable::from_json_str(r#"[
///     { "id": 1, "identifier": "minecraft:elytra",
///       "components": { "max_damage": 432, "glider": null } }
/// ]"#).unwrap();
///
/// let elytra = table.lookup_type(1);
/// assert!(elytra.components().contains(ComponentKey::Glider));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    types: HashMap<i32, Arc<ItemType>>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a list of types.
    ///
    /// # Errors
    /// [`ItemError::DuplicateType`] if two types share an id.
    pub fn from_types(types: impl IntoIterator<Item = ItemType>) -> Result<Self, ItemError> {
        let mut table = Self::new();
        for item_type in types {
            table.insert(item_type)?;
        }
        Ok(table)
    }

    /// Parses a JSON array of item types.
    ///
    /// # Errors
    /// [`ItemError::Manifest`] for malformed JSON, or
    /// [`ItemError::DuplicateType`].
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, ItemError> {
        let types: Vec<ItemType> = serde_json::from_str(json)?;
        Self::from_types(types)
    }

    /// # Errors
    /// [`ItemError::DuplicateType`] if the id is already present.
    pub fn insert(&mut self, item_type: ItemType) -> Result<(), ItemError> {
        let id = item_type.id;
        if self.types.contains_key(&id) {
            return Err(ItemError::DuplicateType(id));
        }
        self.types.insert(id, Arc::new(item_type));
        Ok(())
    }

    /// Direct lookup without the air fallback.
    ///
    /// Use this to ask whether a type exists. Stacks go through
    /// [`ItemRegistry::lookup_type`] instead, which never fails.
    pub fn get(&self, type_id: i32) -> Option<&Arc<ItemType>> {
        self.types.get(&type_id)
    }

    /// Number of registered types. Air is implicit and not counted.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ItemRegistry for ItemTable {
    fn lookup_type(&self, type_id: i32) -> Arc<ItemType> {
        if type_id == AIR_ID {
            return ItemType::air();
        }
        match self.types.get(&type_id) {
            Some(item_type) => Arc::clone(item_type),
            None => {
                tracing::error!(type_id, "item type missing from registry, treating as air");
                ItemType::air()
            }
        }
    }
}
