//! Protocol version registry for Bridgestack.
//!
//! The proxy speaks two protocol families:
//!
//! - **Bedrock** (client side): many revisions are accepted. Each connecting
//!   client negotiates a protocol number, and the [`VersionRegistry`] decides
//!   which [`CodecEntry`] applies, or that the client is unsupported.
//! - **Java** (server side): exactly one revision, described by
//!   [`JavaEdition`].
//!
//! Version-specific behavior is toggled through the feature gates on
//! [`ProtocolVersion`], never by comparing raw numbers at call sites.
//!
//! ```text
//! handshake(version) → VersionRegistry::lookup → CodecEntry → session
//! ```
//!
//! The registry is built once at process start and read-only afterwards, so
//! it can be shared by every session worker without locking.

mod error;
mod gates;
mod java;
mod registry;

pub use error::ProtocolError;
pub use gates::ProtocolVersion;
pub use java::JavaEdition;
pub use registry::{
    CodecDescriptor, CodecEntry, ProtocolFamily, VersionRegistry, VersionRegistryBuilder,
};
