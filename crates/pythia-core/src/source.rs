//! Property source contract and resolved value type.
//!
//! A [`PropertySource`] is a named provider of key/value configuration data.
//! Sources are ordered by an integer ordinal: the higher the ordinal, the more
//! significant the source during merging. Sources are stateless lookup
//! functions from the resolver's perspective; any caching or I/O is their own
//! concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::ConfigError;

/// A failure raised by an individual property source during lookup or
/// enumeration.
///
/// Source failures are recoverable by contract: the resolver logs them and
/// treats the failing source as having produced no value, so a single broken
/// collaborator never aborts resolution across the remaining sources.
#[derive(Debug, Error)]
#[error("property source '{name}' failed: {cause}")]
pub struct SourceError {
    /// Name of the source that failed.
    name: String,
    /// The underlying failure.
    cause: anyhow::Error,
}

impl SourceError {
    /// Creates a new source error wrapping an arbitrary cause.
    pub fn new(name: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self {
            name: name.into(),
            cause: cause.into(),
        }
    }

    /// Creates a source error from a plain message.
    pub fn message(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cause: anyhow::Error::msg(message.into()),
        }
    }

    /// Returns the name of the failing source.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying cause.
    #[must_use]
    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }
}

/// A single resolved configuration entry.
///
/// A `PropertyValue` carries the key it was resolved for, the (possibly
/// absent) textual value, the name of the originating source, and an open
/// map of auxiliary metadata entries such as timestamps or TTLs.
///
/// # Invariants
///
/// - The key is never empty.
/// - Metadata keys are never empty once inserted; this is enforced by
///   [`PropertyValue::with_metadata`].
///
/// # Example
///
/// ```
/// use pythia_core::PropertyValue;
///
/// let value = PropertyValue::of("server.port", "8080", "defaults")
///     .with_metadata("loaded-from", "built-in")
///     .unwrap();
///
/// assert_eq!(value.key(), "server.port");
/// assert_eq!(value.value(), Some("8080"));
/// assert_eq!(value.source(), "defaults");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    key: String,
    value: Option<String>,
    source: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl PropertyValue {
    /// Creates a present value for `key` originating from `source`.
    #[must_use]
    pub fn of(key: impl Into<String>, value: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            source: source.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Creates an absent value for `key` originating from `source`.
    ///
    /// An absent value records that a source was consulted for a key without
    /// producing one; its `value()` is `None`.
    #[must_use]
    pub fn absent(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            source: source.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Returns the key this value was resolved for.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the textual value, or `None` if absent.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the name of the originating source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the auxiliary metadata map.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Adds a metadata entry, returning the updated value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the metadata key is empty.
    pub fn with_metadata(
        mut self,
        meta_key: impl Into<String>,
        meta_value: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let meta_key = meta_key.into();
        if meta_key.is_empty() {
            return Err(ConfigError::invalid_value(
                &self.key,
                "metadata keys must not be empty",
            ));
        }
        self.metadata.insert(meta_key, meta_value.into());
        Ok(self)
    }

    /// Consumes the value and returns the textual value, if present.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        self.value
    }
}

/// A named, ordinal-ordered provider of key/value configuration data.
///
/// Implementations may be backed by anything: in-memory maps, the process
/// environment, files, or remote stores. The resolver only relies on this
/// contract and isolates per-source failures.
///
/// # Ordering
///
/// Sources are merged in ascending ordinal order: the source with the lowest
/// ordinal is applied first (least significant) and the highest ordinal is
/// applied last (most significant, wins under the overriding policy). Sources
/// with equal ordinals are ordered by name so the merge order is reproducible
/// across runs.
pub trait PropertySource: Send + Sync {
    /// Returns the unique name of this source, used for tie-breaking and
    /// diagnostics.
    fn name(&self) -> &str;

    /// Returns the ordinal of this source; higher ordinals win during merge.
    fn ordinal(&self) -> i32;

    /// Looks up a single key.
    ///
    /// Returns `Ok(None)` if the source does not define the key.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the lookup itself fails (I/O, backend
    /// outage, ...). The resolver treats such a failure as an absent value
    /// for this source only.
    fn get(&self, key: &str) -> Result<Option<PropertyValue>, SourceError>;

    /// Returns the full property map of this source.
    ///
    /// Only meaningful for scannable sources; non-scannable sources should
    /// return an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if enumeration fails; the resolver skips the
    /// source for that pass.
    fn properties(&self) -> Result<BTreeMap<String, PropertyValue>, SourceError>;

    /// Whether this source supports full enumeration.
    ///
    /// Non-scannable sources (point lookups only) are skipped during full-map
    /// resolution but still participate in single-key lookups.
    fn is_scannable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_accessors() {
        let value = PropertyValue::of("a", "1", "test");
        assert_eq!(value.key(), "a");
        assert_eq!(value.value(), Some("1"));
        assert_eq!(value.source(), "test");
        assert!(value.metadata().is_empty());
    }

    #[test]
    fn test_property_value_absent() {
        let value = PropertyValue::absent("a", "test");
        assert_eq!(value.value(), None);
        assert_eq!(value.into_value(), None);
    }

    #[test]
    fn test_metadata_insertion() {
        let value = PropertyValue::of("a", "1", "test")
            .with_metadata("ttl", "30s")
            .unwrap();
        assert_eq!(value.metadata().get("ttl").map(String::as_str), Some("30s"));
    }

    #[test]
    fn test_metadata_rejects_empty_key() {
        let result = PropertyValue::of("a", "1", "test").with_metadata("", "x");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("metadata"));
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::message("etcd", "connection refused");
        assert!(err.to_string().contains("etcd"));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.source_name(), "etcd");
    }

    #[test]
    fn test_property_value_serialization() {
        let value = PropertyValue::of("a", "1", "test")
            .with_metadata("ttl", "30s")
            .unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert!(json.contains("\"key\":\"a\""));
        assert!(json.contains("\"ttl\":\"30s\""));

        let back: PropertyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_empty_metadata_skipped_in_serialization() {
        let value = PropertyValue::of("a", "1", "test");
        let json = serde_json::to_string(&value).unwrap();
        assert!(!json.contains("metadata"));
    }
}
