//! Process environment property source.

use std::collections::BTreeMap;

use pythia_core::{PropertySource, PropertyValue, SourceError};

/// Default ordinal for the environment source.
///
/// Environment variables sit above programmatic defaults and file-backed
/// sources but below explicit runtime overrides.
pub const ENVIRONMENT_ORDINAL: i32 = 300;

/// A property source backed by a snapshot of the process environment.
///
/// The environment is captured once at construction; later changes to the
/// process environment are not reflected. With a prefix, only variables
/// starting with the prefix are kept and the prefix is stripped from the
/// exposed keys, so `APP_SERVER_PORT` surfaces as `SERVER_PORT` for the
/// prefix `APP_`.
///
/// # Example
///
/// ```
/// use pythia_core::PropertySource;
/// use pythia_sources::EnvironmentSource;
///
/// let source = EnvironmentSource::from_entries([
///     ("APP_SERVER_PORT", "8080"),
///     ("HOME", "/root"),
/// ])
/// .with_prefix("APP_");
///
/// assert_eq!(source.get("SERVER_PORT").unwrap().unwrap().value(), Some("8080"));
/// assert!(source.get("HOME").unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentSource {
    entries: BTreeMap<String, String>,
    ordinal: i32,
}

impl EnvironmentSource {
    /// Captures the current process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::from_entries(std::env::vars())
    }

    /// Builds a source from explicit entries, mainly for tests.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ordinal: ENVIRONMENT_ORDINAL,
        }
    }

    /// Keeps only variables starting with `prefix`, stripping it from the
    /// exposed keys.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.entries = self
            .entries
            .into_iter()
            .filter_map(|(k, v)| k.strip_prefix(prefix).map(|stripped| (stripped.to_string(), v)))
            .collect();
        self
    }

    /// Overrides the ordinal.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl Default for EnvironmentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySource for EnvironmentSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, key: &str) -> Result<Option<PropertyValue>, SourceError> {
        Ok(self
            .entries
            .get(key)
            .map(|v| PropertyValue::of(key, v, self.name())))
    }

    fn properties(&self) -> Result<BTreeMap<String, PropertyValue>, SourceError> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), PropertyValue::of(k, v, self.name())))
            .collect())
    }
}
