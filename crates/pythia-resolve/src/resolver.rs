//! The `Configuration` facade: the caller-facing resolution entry point.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use pythia_convert::{dispatch, PropertyConverter};
use pythia_core::{
    ConfigError, FilterScope, PropertyFilter, PropertySource, PropertyValue, DEFAULT_PRIORITY,
};

use crate::{converge, CombinationPolicy, ContextBuilder, ContextSnapshot};

/// The configuration facade.
///
/// A `Configuration` holds the current [`ContextSnapshot`] and answers
/// lookups against it. Reads are lock-free in spirit: a reader clones the
/// snapshot `Arc` under a momentary read lock and then iterates without any
/// lock held, so a slow source never blocks other readers or writers.
/// Mutations serialize on a dedicated guard, rebuild a fresh snapshot, and
/// swap it in atomically; readers holding the previous snapshot are
/// unaffected.
///
/// # Example
///
/// ```
/// use pythia_core::fixtures::StaticSource;
/// use pythia_resolve::Configuration;
///
/// let config = Configuration::builder()
///     .with_default_converters()
///     .with_source(StaticSource::new("defaults", 100, &[("retries", "3")]))
///     .build();
///
/// assert_eq!(config.get_as::<u32>("retries").unwrap(), Some(3));
/// assert_eq!(config.get("missing"), None);
/// ```
pub struct Configuration {
    snapshot: RwLock<Arc<ContextSnapshot>>,
    mutation: Mutex<()>,
}

impl Configuration {
    /// Creates a configuration around an initial snapshot.
    #[must_use]
    pub fn new(snapshot: ContextSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            mutation: Mutex::new(()),
        }
    }

    /// Creates a new context builder.
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Returns the current snapshot.
    ///
    /// The snapshot is immutable; it keeps answering consistently even if
    /// the configuration is mutated concurrently.
    #[must_use]
    pub fn context(&self) -> Arc<ContextSnapshot> {
        self.snapshot.read().clone()
    }

    /// Rebuilds the snapshot through `rebuild` and swaps it in.
    ///
    /// Writers serialize on the mutation guard; the rebuild itself runs
    /// without any lock that readers touch, and the swap is a momentary
    /// write of the snapshot pointer.
    fn swap(&self, rebuild: impl FnOnce(ContextBuilder) -> ContextBuilder) {
        let _guard = self.mutation.lock();
        let builder = self.context().to_builder();
        let next = Arc::new(rebuild(builder).build_snapshot());
        *self.snapshot.write() = next;
    }

    /// Adds a property source, installing a fresh snapshot.
    pub fn add_source(&self, source: impl PropertySource + 'static) {
        self.swap(|b| b.with_source(source));
    }

    /// Removes every source with the given name, installing a fresh snapshot.
    pub fn remove_source(&self, name: &str) {
        self.swap(|b| b.without_source(name));
    }

    /// Adds a property filter, installing a fresh snapshot.
    pub fn add_filter(&self, filter: impl PropertyFilter + 'static) {
        self.swap(|b| b.with_filter(filter));
    }

    /// Removes every filter with the given name, installing a fresh snapshot.
    pub fn remove_filter(&self, name: &str) {
        self.swap(|b| b.without_filter(name));
    }

    /// Registers a converter for `T` at [`DEFAULT_PRIORITY`], installing a
    /// fresh snapshot.
    pub fn register_converter<T: 'static>(&self, converter: impl PropertyConverter<T> + 'static) {
        self.register_converter_with_priority(converter, DEFAULT_PRIORITY);
    }

    /// Registers a converter for `T` with an explicit priority, installing a
    /// fresh snapshot.
    pub fn register_converter_with_priority<T: 'static>(
        &self,
        converter: impl PropertyConverter<T> + 'static,
        priority: i32,
    ) {
        self.swap(|b| b.with_converter_priority(converter, priority));
    }

    /// Removes every converter registered for `T`, installing a fresh
    /// snapshot.
    pub fn unregister_converters_for<T: 'static>(&self) {
        self.swap(ContextBuilder::without_converters_for::<T>);
    }

    /// Replaces the combination policy, installing a fresh snapshot.
    pub fn set_policy(&self, policy: impl CombinationPolicy + 'static) {
        self.swap(|b| b.with_policy(policy));
    }

    /// Resolves the raw (filtered) value for a key.
    ///
    /// Every source is consulted exactly once in ascending significance and
    /// folded through the combination policy; the accumulated value then runs
    /// through the filter chain in single-key scope. A failing source is
    /// logged and treated as absent for that source only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let snapshot = self.context();
        let mut accumulated: Option<PropertyValue> = None;
        for source in snapshot.sources() {
            accumulated = snapshot
                .policy()
                .collect(accumulated, key, source.as_ref());
        }

        let mut entries: IndexMap<String, Option<String>> = IndexMap::new();
        entries.insert(key.to_string(), accumulated.and_then(PropertyValue::into_value));
        converge(snapshot.filters(), FilterScope::SingleKey, &mut entries);
        entries.swap_remove(key).flatten()
    }

    /// Resolves a key, falling back to `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: impl Into<String>) -> String {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Resolves a key and converts it to `T`.
    ///
    /// An absent key is `Ok(None)`; no conversion is attempted for it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeConversion`] if no converter is registered
    /// for `T` or every registered converter was exhausted without producing
    /// a value.
    pub fn get_as<T: 'static>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => dispatch::<T>(self.context().converters(), key, &raw).map(Some),
        }
    }

    /// Resolves the full merged property map.
    ///
    /// Scannable sources are enumerated in ascending significance and merged
    /// by key overwrite, matching the single-key overriding semantics; the
    /// merged map then runs through the filter chain in full-map scope. Keys
    /// whose filtered value is suppressed are dropped. The result is an owned
    /// snapshot with no live view back into the sources.
    #[must_use]
    pub fn properties(&self) -> BTreeMap<String, String> {
        let snapshot = self.context();
        let mut merged: IndexMap<String, Option<String>> = IndexMap::new();
        for source in snapshot.sources() {
            if !source.is_scannable() {
                tracing::debug!(
                    source = source.name(),
                    "source supports point lookups only, skipping enumeration"
                );
                continue;
            }
            match source.properties() {
                Ok(entries) => {
                    for (key, value) in entries {
                        if let Some(text) = value.into_value() {
                            merged.insert(key, Some(text));
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        source = source.name(),
                        %error,
                        "property source enumeration failed, skipping source"
                    );
                }
            }
        }

        converge(snapshot.filters(), FilterScope::FullMap, &mut merged);
        merged
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect()
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("context", &self.context())
            .finish()
    }
}
