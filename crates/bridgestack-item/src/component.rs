//! Data components: the attributes an item carries.
//!
//! Every item type has a default [`ComponentSet`]. An individual stack only
//! stores a [`ComponentPatch`], the difference against those defaults. For
//! any key a patch is in one of three states:
//!
//! ```text
//! key not in patch          → inherit the type's default
//! PatchEntry::Removed       → default suppressed (e.g. an elytra without glider)
//! PatchEntry::Set(value)    → override
//! ```
//!
//! Lookups match on `Option<&PatchEntry>` so all three cases are spelled out
//! at every use site.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ItemError, OriginStack};

// ---------------------------------------------------------------------------
// ComponentKey
// ---------------------------------------------------------------------------

/// Identifies one kind of data component.
///
/// Only the keys this crate reasons about get their own variant. Anything
/// else the origin protocol sends is carried through as `Other(network_id)`.
///
/// Serialized as a string (`"max_damage"`, or the decimal id for `Other`) so
/// component maps stay readable JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ComponentKey {
    MaxStackSize,
    MaxDamage,
    Damage,
    Unbreakable,
    CustomName,
    Glider,
    BundleContents,
    Other(u32),
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MaxStackSize => "max_stack_size",
            Self::MaxDamage => "max_damage",
            Self::Damage => "damage",
            Self::Unbreakable => "unbreakable",
            Self::CustomName => "custom_name",
            Self::Glider => "glider",
            Self::BundleContents => "bundle_contents",
            Self::Other(id) => return write!(f, "{id}"),
        };
        f.write_str(name)
    }
}

impl FromStr for ComponentKey {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.strip_prefix("minecraft:").unwrap_or(s) {
            "max_stack_size" => Self::MaxStackSize,
            "max_damage" => Self::MaxDamage,
            "damage" => Self::Damage,
            "unbreakable" => Self::Unbreakable,
            "custom_name" => Self::CustomName,
            "glider" => Self::Glider,
            "bundle_contents" => Self::BundleContents,
            other => other
                .parse()
                .map(Self::Other)
                .map_err(|_| ItemError::UnknownComponent(s.to_string()))?,
        };
        Ok(key)
    }
}

impl From<ComponentKey> for String {
    fn from(key: ComponentKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ComponentKey {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// ComponentValue
// ---------------------------------------------------------------------------

/// The value stored under a component key.
///
/// Untagged in JSON: `null` is a marker component, numbers are ints,
/// strings are text and arrays are nested stacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    /// Presence-only components such as `unbreakable` or `glider`.
    Unit,
    Int(i32),
    Text(String),
    /// Nested stacks, used by bundle contents.
    Items(Vec<OriginStack>),
}

impl ComponentValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[OriginStack]> {
        match self {
            Self::Items(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i32> for ComponentValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ComponentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// ComponentPatch
// ---------------------------------------------------------------------------

/// One entry in a [`ComponentPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchEntry {
    /// Tombstone: the type's default for this key is suppressed.
    Removed,
    /// Override the default with this value.
    Set(ComponentValue),
}

/// A sparse difference against an item type's default components.
///
/// Ordered by key so that equal patches hash equally and serialize
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentPatch {
    entries: BTreeMap<ComponentKey, PatchEntry>,
}

impl ComponentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw patch state for `key`. `None` means "inherit".
    pub fn get(&self, key: ComponentKey) -> Option<&PatchEntry> {
        self.entries.get(&key)
    }

    /// Overrides `key` with `value`.
    pub fn set(&mut self, key: ComponentKey, value: impl Into<ComponentValue>) {
        self.entries.insert(key, PatchEntry::Set(value.into()));
    }

    /// Writes a tombstone for `key`, suppressing the type default.
    pub fn remove_default(&mut self, key: ComponentKey) {
        self.entries.insert(key, PatchEntry::Removed);
    }

    /// Drops whatever the patch says about `key`, so it inherits again.
    pub fn clear(&mut self, key: ComponentKey) -> Option<PatchEntry> {
        self.entries.remove(&key)
    }

    pub fn contains(&self, key: ComponentKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &PatchEntry)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ComponentKey, PatchEntry)> for ComponentPatch {
    fn from_iter<I: IntoIterator<Item = (ComponentKey, PatchEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentSet
// ---------------------------------------------------------------------------

/// A complete set of components: an item type's defaults, or the merged
/// view of defaults plus a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSet {
    values: BTreeMap<ComponentKey, ComponentValue>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ComponentKey) -> Option<&ComponentValue> {
        self.values.get(&key)
    }

    pub fn contains(&self, key: ComponentKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn insert(&mut self, key: ComponentKey, value: impl Into<ComponentValue>) {
        self.values.insert(key, value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: ComponentKey, value: impl Into<ComponentValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Applies `patch` on top of these defaults: overrides replace,
    /// tombstones delete, everything else is inherited.
    pub fn overlay(&self, patch: Option<&ComponentPatch>) -> ComponentSet {
        let mut merged = self.clone();
        if let Some(patch) = patch {
            for (key, entry) in patch.iter() {
                match entry {
                    PatchEntry::Removed => {
                        merged.values.remove(&key);
                    }
                    PatchEntry::Set(value) => {
                        merged.values.insert(key, value.clone());
                    }
                }
            }
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &ComponentValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ComponentKey, ComponentValue)> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = (ComponentKey, ComponentValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
