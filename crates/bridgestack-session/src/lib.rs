//! Per-session translation state for Bridgestack.
//!
//! Each connected client gets one [`ProxySession`]. It owns everything about
//! item translation that depends on that client:
//!
//! 1. **Negotiated codec**: chosen from the
//!    [`VersionRegistry`](bridgestack_protocol::VersionRegistry) at
//!    establishment; unknown versions are refused.
//! 2. **Network ids**: the counter stacks and bundle contents draw their
//!    remote-addressable ids from.
//! 3. **Bundle cache**: the [`BundleCache`] that keeps bundle ids stable.
//! 4. **Outbound translation**: [`to_remote_item`] hands a stack to an
//!    [`OutboundTranslator`] and stamps the session's ids onto the result.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session layer (this crate)   ← owns ids, codec choice, bundle tracking
//!     ↕
//! Item layer                   ← ItemStack, BundleState, BundleTracker
//! Protocol layer               ← VersionRegistry, ProtocolVersion gates
//! ```

mod bundle_cache;
mod config;
mod error;
mod session;
mod translate;

pub use bundle_cache::{BundleCache, NetIdAllocator, SessionBundles};
pub use config::SessionConfig;
pub use error::SessionError;
pub use session::ProxySession;
pub use translate::{OutboundTranslator, RemoteItem, to_remote_item};
