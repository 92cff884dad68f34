//! The single server-side (Java) protocol revision.

use crate::CodecDescriptor;

/// Java edition codec information.
///
/// Unlike the client side there is no negotiation: the proxy is built
/// against one Java revision and connects upstream with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaEdition;

impl JavaEdition {
    pub const PROTOCOL_VERSION: u32 = 770;
    pub const MINECRAFT_VERSION: &'static str = "1.21.5";

    pub const fn codec() -> CodecDescriptor {
        CodecDescriptor::java(Self::PROTOCOL_VERSION)
    }

    /// Supported game version names. Always a single entry.
    pub fn versions() -> Vec<&'static str> {
        vec![Self::MINECRAFT_VERSION]
    }

    pub fn supported_versions_summary() -> String {
        Self::versions().join(", ")
    }
}
