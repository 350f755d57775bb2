//! Immutable context snapshots and their builder.
//!
//! A [`ContextSnapshot`] is the effectively-immutable view of everything a
//! resolution pass needs: the ordered source list, the ordered filter chain,
//! the converter registry, and the active combination policy. Mutations never
//! touch an existing snapshot; they build a fresh one which is swapped in
//! atomically, so concurrent readers never observe a partially-updated list
//! and never hold a lock while iterating.

use std::sync::Arc;

use pythia_convert::{ConverterRegistry, PropertyConverter};
use pythia_core::{PropertyFilter, PropertySource, DEFAULT_PRIORITY};

use crate::{CombinationPolicy, Configuration, OverridingPolicy};

/// An immutable snapshot of the active resolution context.
pub struct ContextSnapshot {
    /// Sorted ascending by `(ordinal, name)`: the least significant source
    /// first, the most significant last. The name tie-break makes the merge
    /// order of equal-ordinal sources reproducible across runs; under the
    /// overriding policy the lexicographically greater name is applied later
    /// and therefore wins.
    sources: Vec<Arc<dyn PropertySource>>,
    /// Sorted descending by priority, ties broken by name; higher priority
    /// filters run earlier in each convergence pass.
    filters: Vec<Arc<dyn PropertyFilter>>,
    converters: ConverterRegistry,
    policy: Arc<dyn CombinationPolicy>,
}

impl ContextSnapshot {
    /// Creates a new builder with the default overriding policy and an empty
    /// converter registry.
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Returns the ordered source list, least significant first.
    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn PropertySource>] {
        &self.sources
    }

    /// Returns the ordered filter chain.
    #[must_use]
    pub fn filters(&self) -> &[Arc<dyn PropertyFilter>] {
        &self.filters
    }

    /// Returns the converter registry.
    #[must_use]
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Returns the active combination policy.
    #[must_use]
    pub fn policy(&self) -> &dyn CombinationPolicy {
        self.policy.as_ref()
    }

    /// Copies this snapshot back into a builder for derived snapshots.
    #[must_use]
    pub fn to_builder(&self) -> ContextBuilder {
        ContextBuilder {
            sources: self.sources.clone(),
            filters: self.filters.clone(),
            converters: self.converters.clone(),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl std::fmt::Debug for ContextSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextSnapshot")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("converters", &self.converters)
            .field("policy", &self.policy.name())
            .finish()
    }
}

/// Builder for [`ContextSnapshot`] and [`Configuration`].
///
/// # Example
///
/// ```
/// use pythia_core::fixtures::StaticSource;
/// use pythia_resolve::{AppendingPolicy, Configuration};
///
/// let config = Configuration::builder()
///     .with_source(StaticSource::new("defaults", 100, &[("greeting", "hi")]))
///     .with_policy(AppendingPolicy::default())
///     .build();
///
/// assert_eq!(config.get("greeting").as_deref(), Some("hi"));
/// ```
pub struct ContextBuilder {
    sources: Vec<Arc<dyn PropertySource>>,
    filters: Vec<Arc<dyn PropertyFilter>>,
    converters: ConverterRegistry,
    policy: Arc<dyn CombinationPolicy>,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextBuilder {
    /// Creates an empty builder with the overriding policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            filters: Vec::new(),
            converters: ConverterRegistry::new(),
            policy: Arc::new(OverridingPolicy),
        }
    }

    /// Adds a property source.
    #[must_use]
    pub fn with_source(self, source: impl PropertySource + 'static) -> Self {
        self.with_source_arc(Arc::new(source))
    }

    /// Adds an already shared property source.
    #[must_use]
    pub fn with_source_arc(mut self, source: Arc<dyn PropertySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Removes every source with the given name.
    #[must_use]
    pub fn without_source(mut self, name: &str) -> Self {
        self.sources.retain(|s| s.name() != name);
        self
    }

    /// Adds a property filter.
    #[must_use]
    pub fn with_filter(self, filter: impl PropertyFilter + 'static) -> Self {
        self.with_filter_arc(Arc::new(filter))
    }

    /// Adds an already shared property filter.
    #[must_use]
    pub fn with_filter_arc(mut self, filter: Arc<dyn PropertyFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Removes every filter with the given name.
    #[must_use]
    pub fn without_filter(mut self, name: &str) -> Self {
        self.filters.retain(|f| f.name() != name);
        self
    }

    /// Registers a converter for `T` at [`DEFAULT_PRIORITY`].
    #[must_use]
    pub fn with_converter<T: 'static>(self, converter: impl PropertyConverter<T> + 'static) -> Self {
        self.with_converter_priority(converter, DEFAULT_PRIORITY)
    }

    /// Registers a converter for `T` with an explicit priority.
    #[must_use]
    pub fn with_converter_priority<T: 'static>(
        mut self,
        converter: impl PropertyConverter<T> + 'static,
        priority: i32,
    ) -> Self {
        self.converters
            .register_with_priority::<T>(Arc::new(converter), priority);
        self
    }

    /// Removes every converter registered for `T`.
    #[must_use]
    pub fn without_converters_for<T: 'static>(mut self) -> Self {
        self.converters.unregister::<T>();
        self
    }

    /// Registers the built-in converters for the std scalar types.
    #[must_use]
    pub fn with_default_converters(mut self) -> Self {
        pythia_convert::builtin::register_defaults(&mut self.converters);
        self
    }

    /// Sets the combination policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl CombinationPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Builds the immutable snapshot, sorting sources and filters into their
    /// deterministic orders.
    #[must_use]
    pub fn build_snapshot(self) -> ContextSnapshot {
        let mut sources = self.sources;
        sources.sort_by(|a, b| {
            a.ordinal()
                .cmp(&b.ordinal())
                .then_with(|| a.name().cmp(b.name()))
        });
        let mut filters = self.filters;
        filters.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.name().cmp(b.name()))
        });
        ContextSnapshot {
            sources,
            filters,
            converters: self.converters,
            policy: self.policy,
        }
    }

    /// Builds a [`Configuration`] around the snapshot.
    #[must_use]
    pub fn build(self) -> Configuration {
        Configuration::new(self.build_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pythia_core::fixtures::{ReplaceFilter, StaticSource};
    use pythia_core::{FilterContext, FilterScope};

    /// A filter with an explicit priority, for chain-order tests.
    struct Ranked {
        name: &'static str,
        priority: i32,
    }

    impl PropertyFilter for Ranked {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn filter(&self, value: Option<&str>, _ctx: &FilterContext<'_>) -> Option<String> {
            value.map(str::to_string)
        }
    }

    #[test]
    fn test_sources_sorted_by_ordinal_then_name() {
        let snapshot = ContextSnapshot::builder()
            .with_source(StaticSource::new("zeta", 200, &[]))
            .with_source(StaticSource::new("beta", 100, &[]))
            .with_source(StaticSource::new("alpha", 100, &[]))
            .build_snapshot();

        let names: Vec<_> = snapshot.sources().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_registration_order_does_not_affect_source_order() {
        let forward = ContextSnapshot::builder()
            .with_source(StaticSource::new("a", 100, &[]))
            .with_source(StaticSource::new("b", 200, &[]))
            .build_snapshot();
        let reversed = ContextSnapshot::builder()
            .with_source(StaticSource::new("b", 200, &[]))
            .with_source(StaticSource::new("a", 100, &[]))
            .build_snapshot();

        let forward_names: Vec<_> = forward.sources().iter().map(|s| s.name()).collect();
        let reversed_names: Vec<_> = reversed.sources().iter().map(|s| s.name()).collect();
        assert_eq!(forward_names, reversed_names);
    }

    #[test]
    fn test_filters_sorted_by_priority_then_name() {
        let snapshot = ContextSnapshot::builder()
            .with_filter(Ranked {
                name: "low",
                priority: 1,
            })
            .with_filter(Ranked {
                name: "high",
                priority: 9,
            })
            .with_filter(Ranked {
                name: "also-high",
                priority: 9,
            })
            .build_snapshot();

        let names: Vec<_> = snapshot.filters().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["also-high", "high", "low"]);
    }

    #[test]
    fn test_without_source_and_filter() {
        let snapshot = ContextSnapshot::builder()
            .with_source(StaticSource::new("keep", 100, &[]))
            .with_source(StaticSource::new("drop", 200, &[]))
            .with_filter(ReplaceFilter::new("keep-f", "x", "y"))
            .with_filter(ReplaceFilter::new("drop-f", "x", "y"))
            .without_source("drop")
            .without_filter("drop-f")
            .build_snapshot();

        assert_eq!(snapshot.sources().len(), 1);
        assert_eq!(snapshot.sources()[0].name(), "keep");
        assert_eq!(snapshot.filters().len(), 1);
        assert_eq!(snapshot.filters()[0].name(), "keep-f");
    }

    #[test]
    fn test_default_policy_is_overriding() {
        let snapshot = ContextSnapshot::builder().build_snapshot();
        assert_eq!(snapshot.policy().name(), "overriding");
    }

    #[test]
    fn test_to_builder_round_trip() {
        let snapshot = ContextSnapshot::builder()
            .with_source(StaticSource::new("s", 100, &[("a", "1")]))
            .with_default_converters()
            .build_snapshot();

        let derived = snapshot.to_builder().build_snapshot();
        assert_eq!(derived.sources().len(), 1);
        assert!(derived.converters().contains::<i32>());
        assert_eq!(derived.policy().name(), "overriding");
    }

    #[test]
    fn test_debug_lists_names() {
        let snapshot = ContextSnapshot::builder()
            .with_source(StaticSource::new("s", 100, &[]))
            .build_snapshot();
        let debug = format!("{snapshot:?}");
        assert!(debug.contains("\"s\""));
        assert!(debug.contains("overriding"));
    }
}
