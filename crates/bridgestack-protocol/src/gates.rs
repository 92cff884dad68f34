//! Negotiated protocol numbers and the feature gates keyed off them.
//!
//! Every version-dependent branch in the proxy asks a named predicate on
//! [`ProtocolVersion`] instead of comparing numbers inline. When support for
//! old revisions is dropped, the predicates that become constant are easy to
//! find and delete.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Bedrock protocol number as negotiated during the handshake.
///
/// Serialized as the bare number (`#[serde(transparent)]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    /// 1.21.60: creative inventory packets were rewritten.
    pub const V1_21_60: Self = Self(776);
    /// 1.21.70.
    pub const V1_21_70: Self = Self(786);
    /// 1.21.80.
    pub const V1_21_80: Self = Self(800);

    /// `true` if this revision is `threshold` or newer.
    pub fn is_at_least(self, threshold: Self) -> bool {
        self >= threshold
    }

    /// Clients older than 1.21.60 still use the legacy creative inventory
    /// encoding.
    pub fn is_pre_creative_inventory_rewrite(self) -> bool {
        !self.is_at_least(Self::V1_21_60)
    }

    pub fn is_1_21_70_or_higher(self) -> bool {
        self.is_at_least(Self::V1_21_70)
    }

    pub fn is_1_21_80_or_higher(self) -> bool {
        self.is_at_least(Self::V1_21_80)
    }

    /// The 1.21.70 client build mishandles form responses.
    ///
    /// Exact match only: later revisions fixed it and must not inherit the
    /// workaround.
    pub fn has_broken_forms(self) -> bool {
        self == Self::V1_21_70
    }
}

impl From<u32> for ProtocolVersion {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
