//! The table of supported Bedrock protocol revisions.
//!
//! Each entry pairs a negotiated protocol number with a human-readable game
//! version label and the [`CodecDescriptor`] the codec layer uses to pick its
//! packet definitions. Entries are kept in ascending protocol order, which
//! makes the newest entry the default and lets lookups binary-search.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, ProtocolVersion};

// ---------------------------------------------------------------------------
// Codec descriptors
// ---------------------------------------------------------------------------

/// Which side of the proxy a codec belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolFamily {
    /// The client-facing protocol. Many revisions are supported.
    Bedrock,
    /// The server-facing protocol. Exactly one revision is supported.
    Java,
}

/// Opaque handle naming the packet codec for one protocol revision.
///
/// The byte-level codecs live outside this crate; this descriptor is what
/// the codec layer keys its packet tables by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecDescriptor {
    pub family: ProtocolFamily,
    pub revision: u32,
}

impl CodecDescriptor {
    pub const fn bedrock(revision: u32) -> Self {
        Self {
            family: ProtocolFamily::Bedrock,
            revision,
        }
    }

    pub const fn java(revision: u32) -> Self {
        Self {
            family: ProtocolFamily::Java,
            revision,
        }
    }
}

impl fmt::Display for CodecDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            ProtocolFamily::Bedrock => write!(f, "bedrock_v{}", self.revision),
            ProtocolFamily::Java => write!(f, "java_v{}", self.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// CodecEntry
// ---------------------------------------------------------------------------

/// One supported protocol revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecEntry {
    protocol_version: ProtocolVersion,
    version_label: String,
    codec: CodecDescriptor,
}

impl CodecEntry {
    /// Creates an entry whose codec is the Bedrock codec of the same revision.
    pub fn new(protocol_version: u32, version_label: impl Into<String>) -> Self {
        Self::with_codec(
            protocol_version,
            version_label,
            CodecDescriptor::bedrock(protocol_version),
        )
    }

    pub fn with_codec(
        protocol_version: u32,
        version_label: impl Into<String>,
        codec: CodecDescriptor,
    ) -> Self {
        Self {
            protocol_version: ProtocolVersion(protocol_version),
            version_label: version_label.into(),
            codec,
        }
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    /// Game versions covered by this revision, e.g. `"1.21.70 - 1.21.73"`.
    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    pub fn codec(&self) -> CodecDescriptor {
        self.codec
    }
}

// ---------------------------------------------------------------------------
// VersionRegistry
// ---------------------------------------------------------------------------

/// Bedrock revisions accepted by the proxy, oldest first.
///
/// The newest entry is the default codec and the ceiling for every
/// "supports X" feature gate.
const BEDROCK_VERSIONS: &[(u32, &str)] = &[
    (291, "1.7.0/1.7.1"),
    (313, "1.8.0/1.8.1"),
    (332, "1.9.0"),
    (340, "1.10.0/1.10.1"),
    (354, "1.11.0 - 1.11.4"),
    (361, "1.12.0/1.12.1"),
    (388, "1.13.0 - 1.13.3"),
    (389, "1.14.0 - 1.14.41"),
    (390, "1.14.60"),
    (407, "1.16.0 - 1.16.10"),
    (408, "1.16.20 - 1.16.61"),
    (419, "1.16.100/1.16.101"),
    (422, "1.16.200/1.16.201"),
    (428, "1.16.210"),
    (431, "1.16.220/1.16.221"),
    (440, "1.17.0 - 1.17.2"),
    (448, "1.17.10/1.17.11"),
    (465, "1.17.30 - 1.17.34"),
    (471, "1.17.40/1.17.41"),
    (475, "1.18.0 - 1.18.2"),
    (486, "1.18.10 - 1.18.12"),
    (503, "1.18.30 - 1.18.33"),
    (527, "1.19.0 - 1.19.2"),
    (534, "1.19.10/1.19.11"),
    (544, "1.19.20"),
    (545, "1.19.21/1.19.22"),
    (554, "1.19.30/1.19.31"),
    (557, "1.19.40/1.19.41"),
    (560, "1.19.50/1.19.51"),
    (567, "1.19.60 - 1.19.62"),
    (568, "1.19.63"),
    (575, "1.19.70 - 1.19.73"),
    (582, "1.19.80 - 1.19.83"),
    (589, "1.20.0/1.20.1"),
    (594, "1.20.10 - 1.20.15"),
    (618, "1.20.30 - 1.20.32"),
    (622, "1.20.40/1.20.41"),
    (630, "1.20.50/1.20.51"),
    (649, "1.20.60 - 1.20.62"),
    (662, "1.20.70 - 1.20.73"),
    (671, "1.20.80/1.20.81"),
    (685, "1.21.0/1.21.1"),
    (686, "1.21.2/1.21.3"),
    (712, "1.21.20 - 1.21.23"),
    (729, "1.21.30/1.21.31"),
    (748, "1.21.40 - 1.21.44"),
    (766, "1.21.50/1.21.51"),
    (776, "1.21.60 - 1.21.62"),
    (786, "1.21.70 - 1.21.73"),
    (800, "1.21.80 - 1.21.82"),
];

static BEDROCK: OnceLock<VersionRegistry> = OnceLock::new();

/// An immutable, ascending table of [`CodecEntry`] values.
///
/// Build one with [`VersionRegistry::builder`], or use the process-wide
/// table from [`VersionRegistry::bedrock`]. There is no way to add entries
/// to a built registry, so `&VersionRegistry` can be handed to any number of
/// session workers at once.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    /// Invariant: non-empty, strictly ascending by protocol version.
    entries: Vec<CodecEntry>,
}

impl VersionRegistry {
    pub fn builder() -> VersionRegistryBuilder {
        VersionRegistryBuilder::default()
    }

    /// The process-wide Bedrock registry.
    ///
    /// Built on first access and never modified afterwards. Call this once
    /// during startup so the table exists before sessions accept traffic.
    pub fn bedrock() -> &'static VersionRegistry {
        BEDROCK.get_or_init(|| {
            let mut builder = Self::builder();
            for (version, label) in BEDROCK_VERSIONS {
                builder = builder
                    .register(*version, *label)
                    .expect("built-in version table is strictly ascending");
            }
            let registry = builder.build().expect("built-in version table is non-empty");
            tracing::debug!(
                versions = registry.len(),
                default = %registry.default_entry().protocol_version(),
                "bedrock version registry initialised"
            );
            registry
        })
    }

    /// Finds the entry for an exact protocol number.
    ///
    /// `None` means the client is unsupported and must be refused.
    pub fn lookup(&self, protocol_version: u32) -> Option<&CodecEntry> {
        self.entries
            .binary_search_by_key(&protocol_version, |entry| entry.protocol_version.0)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// The newest registered entry.
    pub fn default_entry(&self) -> &CodecEntry {
        // Non-empty is enforced by the builder.
        &self.entries[self.entries.len() - 1]
    }

    /// Version labels in registration (ascending) order.
    pub fn supported_version_labels(&self) -> Vec<&str> {
        self.entries.iter().map(CodecEntry::version_label).collect()
    }

    /// All labels joined for display, e.g. in a "wrong version" kick message.
    pub fn supported_versions_summary(&self) -> String {
        self.supported_version_labels().join(", ")
    }

    pub fn entries(&self) -> &[CodecEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a built registry; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects entries for a [`VersionRegistry`], enforcing ascending order.
#[derive(Debug, Default)]
pub struct VersionRegistryBuilder {
    entries: Vec<CodecEntry>,
}

impl VersionRegistryBuilder {
    /// Registers a Bedrock revision with its own codec.
    ///
    /// # Errors
    /// [`ProtocolError::Duplicate`] or [`ProtocolError::NotAscending`] if
    /// `protocol_version` is not greater than the last registered one.
    pub fn register(
        self,
        protocol_version: u32,
        version_label: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        self.push(CodecEntry::new(protocol_version, version_label))
    }

    /// Registers a prepared entry.
    ///
    /// # Errors
    /// Same as [`register`](Self::register).
    pub fn push(mut self, entry: CodecEntry) -> Result<Self, ProtocolError> {
        let next = entry.protocol_version.0;
        if let Some(last) = self.entries.last() {
            let previous = last.protocol_version.0;
            if next == previous {
                return Err(ProtocolError::Duplicate(next));
            }
            if next < previous {
                return Err(ProtocolError::NotAscending { previous, next });
            }
        }
        self.entries.push(entry);
        Ok(self)
    }

    /// # Errors
    /// [`ProtocolError::Empty`] if nothing was registered.
    pub fn build(self) -> Result<VersionRegistry, ProtocolError> {
        if self.entries.is_empty() {
            return Err(ProtocolError::Empty);
        }
        Ok(VersionRegistry {
            entries: self.entries,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small_registry() -> VersionRegistry {
        VersionRegistry::builder()
            .register(10, "a")
            .and_then(|b| b.register(20, "b"))
            .and_then(|b| b.register(30, "c"))
            .and_then(VersionRegistryBuilder::build)
            .expect("ascending entries")
    }

    // =====================================================================
    // Builder
    // =====================================================================

    #[test]
    fn test_register_descending_version_is_rejected() {
        let err = VersionRegistry::builder()
            .register(20, "b")
            .and_then(|b| b.register(10, "a"))
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::NotAscending {
                previous: 20,
                next: 10
            }
        );
    }

    #[test]
    fn test_register_duplicate_version_is_rejected() {
        let err = VersionRegistry::builder()
            .register(766, "1.21.50/1.21.51")
            .and_then(|b| b.register(766, "1.21.50/1.21.51"))
            .unwrap_err();
        assert_eq!(err, ProtocolError::Duplicate(766));
    }

    #[test]
    fn test_build_empty_registry_fails() {
        assert_eq!(
            VersionRegistry::builder().build().unwrap_err(),
            ProtocolError::Empty
        );
    }

    // =====================================================================
    // lookup / default_entry
    // =====================================================================

    #[test]
    fn test_lookup_registered_version_returns_matching_entry() {
        let registry = small_registry();
        for version in [10, 20, 30] {
            let entry = registry.lookup(version).expect("registered");
            assert_eq!(entry.protocol_version(), ProtocolVersion(version));
        }
    }

    #[test]
    fn test_lookup_unregistered_version_returns_none() {
        let registry = small_registry();
        assert!(registry.lookup(0).is_none());
        assert!(registry.lookup(15).is_none());
        assert!(registry.lookup(31).is_none());
    }

    #[test]
    fn test_default_entry_is_newest() {
        let registry = small_registry();
        assert_eq!(registry.default_entry().version_label(), "c");
    }

    #[test]
    fn test_supported_version_labels_keep_registration_order() {
        let registry = small_registry();
        assert_eq!(registry.supported_version_labels(), vec!["a", "b", "c"]);
        assert_eq!(registry.supported_versions_summary(), "a, b, c");
    }

    // =====================================================================
    // Built-in Bedrock table
    // =====================================================================

    #[test]
    fn test_bedrock_table_is_strictly_ascending() {
        for pair in BEDROCK_VERSIONS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_bedrock_default_is_max_registered_version() {
        let registry = VersionRegistry::bedrock();
        let max = registry
            .entries()
            .iter()
            .map(|entry| entry.protocol_version())
            .max()
            .expect("non-empty");
        assert_eq!(registry.default_entry().protocol_version(), max);
        assert_eq!(registry.default_entry().version_label(), "1.21.80 - 1.21.82");
    }

    #[test]
    fn test_bedrock_every_registered_version_round_trips_through_lookup() {
        let registry = VersionRegistry::bedrock();
        for (version, label) in BEDROCK_VERSIONS {
            let entry = registry.lookup(*version).expect("registered");
            assert_eq!(entry.protocol_version().0, *version);
            assert_eq!(entry.version_label(), *label);
            assert_eq!(entry.codec(), CodecDescriptor::bedrock(*version));
        }
    }

    #[test]
    fn test_bedrock_returns_same_instance() {
        assert!(std::ptr::eq(
            VersionRegistry::bedrock(),
            VersionRegistry::bedrock()
        ));
    }

    #[test]
    fn test_codec_descriptor_display() {
        assert_eq!(CodecDescriptor::bedrock(800).to_string(), "bedrock_v800");
        assert_eq!(CodecDescriptor::java(770).to_string(), "java_v770");
    }

    #[test]
    fn test_codec_entry_serializes_family_in_snake_case() {
        let entry = CodecEntry::new(800, "1.21.80 - 1.21.82");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["protocol_version"], 800);
        assert_eq!(json["codec"]["family"], "bedrock");
    }
}
