//! Immutable in-memory property source.

use std::collections::BTreeMap;

use pythia_core::{PropertySource, PropertyValue, SourceError};

/// Default ordinal for in-memory map sources: the programmatic-defaults
/// layer, below the environment.
pub const MAP_ORDINAL: i32 = 100;

/// An immutable, named in-memory property source.
///
/// # Example
///
/// ```
/// use pythia_core::PropertySource;
/// use pythia_sources::MapSource;
///
/// let source = MapSource::new("defaults")
///     .with("server.port", "8080")
///     .with("server.host", "0.0.0.0");
///
/// assert_eq!(source.get("server.port").unwrap().unwrap().value(), Some("8080"));
/// ```
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    ordinal: i32,
    entries: BTreeMap<String, String>,
    scannable: bool,
}

impl MapSource {
    /// Creates an empty source with the given name at [`MAP_ORDINAL`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: MAP_ORDINAL,
            entries: BTreeMap::new(),
            scannable: true,
        }
    }

    /// Creates a source from existing entries.
    #[must_use]
    pub fn from_entries<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            ordinal: MAP_ORDINAL,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            scannable: true,
        }
    }

    /// Adds an entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Overrides the ordinal.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Marks the source as supporting point lookups only.
    #[must_use]
    pub fn not_scannable(mut self) -> Self {
        self.scannable = false;
        self
    }
}

impl PropertySource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, key: &str) -> Result<Option<PropertyValue>, SourceError> {
        Ok(self
            .entries
            .get(key)
            .map(|v| PropertyValue::of(key, v, &self.name)))
    }

    fn properties(&self) -> Result<BTreeMap<String, PropertyValue>, SourceError> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), PropertyValue::of(k, v, &self.name)))
            .collect())
    }

    fn is_scannable(&self) -> bool {
        self.scannable
    }
}
