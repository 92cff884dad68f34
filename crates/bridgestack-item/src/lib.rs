//! Item model for Bridgestack.
//!
//! This crate holds the canonical, protocol-neutral representation of an
//! inventory item and the rules for moving it between the two protocols:
//!
//! - **Components** ([`ComponentKey`], [`ComponentValue`], [`ComponentPatch`],
//!   [`ComponentSet`]): an item's attributes, stored as a patch against its
//!   type's defaults.
//! - **Stacks** ([`ItemStack`]): type, quantity, patch and network id, with
//!   the empty-stack normalisation every accessor applies.
//! - **Origin shapes** ([`OriginStack`], [`SlotDisplay`]): what the server
//!   side sends, lifted into and lowered from [`ItemStack`].
//! - **Registry** ([`ItemRegistry`], [`ItemType`], [`ItemTable`]): default
//!   components per item type.
//! - **Bundles** ([`BundleState`], [`BundleTracker`]): nested stacks whose
//!   network ids must survive updates.
//!
//! # Flow
//!
//! ```text
//! OriginStack / SlotDisplay ─→ ItemStack ─→ (inventory logic)
//!                                  │
//!                                  ├─→ reconcile_bundle(tracker, previous)
//!                                  └─→ to_origin_stack() / outbound translator
//! ```
//!
//! Stacks are owned by one session and mutated from that session's task
//! only, so nothing here locks.

mod bundle;
mod component;
mod display;
mod error;
mod origin;
mod registry;
mod stack;

pub use bundle::{BundleState, BundleTracker, UNASSIGNED_BUNDLE_ID};
pub use component::{ComponentKey, ComponentPatch, ComponentSet, ComponentValue, PatchEntry};
pub use display::SlotDisplay;
pub use error::ItemError;
pub use origin::OriginStack;
pub use registry::{AIR_ID, ItemRegistry, ItemTable, ItemType};
pub use stack::{DEFAULT_NETWORK_ID, ItemStack};
