//! Mutable runtime-override property source.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use pythia_core::{PropertySource, PropertyValue, SourceError};

/// Default ordinal for runtime overrides: above everything else.
pub const OVERRIDE_ORDINAL: i32 = 1000;

/// A mutable property source for runtime overrides.
///
/// Unlike the other built-in sources this one has interior mutability:
/// `set`/`unset` take effect immediately for subsequent resolutions without
/// rebuilding the context. The high default ordinal makes overrides win over
/// every conventional layer.
///
/// # Example
///
/// ```
/// use pythia_core::PropertySource;
/// use pythia_sources::RuntimeOverrideSource;
///
/// let source = RuntimeOverrideSource::new("overrides");
/// source.set("feature.enabled", "true");
/// assert_eq!(source.get("feature.enabled").unwrap().unwrap().value(), Some("true"));
///
/// source.unset("feature.enabled");
/// assert!(source.get("feature.enabled").unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct RuntimeOverrideSource {
    name: String,
    ordinal: i32,
    entries: RwLock<BTreeMap<String, String>>,
}

impl RuntimeOverrideSource {
    /// Creates an empty override source at [`OVERRIDE_ORDINAL`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: OVERRIDE_ORDINAL,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Overrides the ordinal.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Sets an override.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Removes an override.
    pub fn unset(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Removes every override.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of active overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no override is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl PropertySource for RuntimeOverrideSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, key: &str) -> Result<Option<PropertyValue>, SourceError> {
        Ok(self
            .entries
            .read()
            .get(key)
            .map(|v| PropertyValue::of(key, v, &self.name)))
    }

    fn properties(&self) -> Result<BTreeMap<String, PropertyValue>, SourceError> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), PropertyValue::of(k, v, &self.name)))
            .collect())
    }
}
