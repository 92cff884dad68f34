//! # Bridgestack
//!
//! Item-state translation core for a proxy that connects clients speaking
//! the versioned Bedrock protocol to a server speaking a single Java
//! protocol revision.
//!
//! The work is split across crates, re-exported here:
//!
//! - [`bridgestack_protocol`]: which client versions are supported and
//!   which feature gates apply to each.
//! - [`bridgestack_item`]: the component-patch item model and bundle
//!   reconciliation.
//! - [`bridgestack_session`]: per-client ids, bundle cache and outbound
//!   translation.
//!
//! ## Quick Start
//!
//! ```rust
//! use bridgestack::prelude::*;
//!
//! let config = ProxyConfig::from_json_str(r#"{ "log": { "filter": "debug" } }"#)?;
//! let _ = bridgestack::telemetry::init(&config.log);
//!
//! // Built once at startup, shared read-only by all sessions.
//! let versions = VersionRegistry::bedrock();
//!
//! let mut session = ProxySession::establish(800, versions, &config.session)?;
//! let items = ItemTable::from_json_str(r#"[{ "id": 1, "identifier": "minecraft:stone" }]"#)?;
//! let stack = session.lift_origin(Some(OriginStack::new(1, 64)), &items);
//! assert_eq!(stack.quantity(), 64);
//! # Ok::<(), BridgeError>(())
//! ```

mod config;
mod error;
pub mod telemetry;

pub use config::{LogConfig, ProxyConfig};
pub use error::BridgeError;

pub use bridgestack_item;
pub use bridgestack_protocol;
pub use bridgestack_session;

/// Everything a proxy front-end usually needs in one import.
pub mod prelude {
    pub use crate::{BridgeError, LogConfig, ProxyConfig};
    pub use bridgestack_item::{
        BundleState, BundleTracker, ComponentKey, ComponentPatch, ComponentSet, ComponentValue,
        ItemRegistry, ItemStack, ItemTable, ItemType, OriginStack, PatchEntry, SlotDisplay,
    };
    pub use bridgestack_protocol::{
        CodecEntry, JavaEdition, ProtocolVersion, VersionRegistry,
    };
    pub use bridgestack_session::{
        OutboundTranslator, ProxySession, RemoteItem, SessionConfig, to_remote_item,
    };
}
