//! Combination policies: the per-key merge strategy across the source list.

use pythia_core::{PropertySource, PropertyValue};

/// Looks up `key` in `source`, isolating failures.
///
/// A source error is logged at warn level and mapped to an absent value, so
/// one broken source never aborts resolution across the remaining sources.
/// Custom [`CombinationPolicy`] implementations should perform their lookups
/// through this helper to inherit the isolation.
#[must_use]
pub fn lookup(source: &dyn PropertySource, key: &str) -> Option<PropertyValue> {
    match source.get(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                source = source.name(),
                key,
                %error,
                "property source lookup failed, treating as absent"
            );
            None
        }
    }
}

/// The per-key merge strategy applied across the ordered source list.
///
/// During a resolution pass the resolver folds every source (ascending
/// significance) through [`collect`](CombinationPolicy::collect), carrying
/// the accumulator forward. Policies must be stateless and side-effect free:
/// `collect` is invoked exactly once per `(key, source)` pair per pass.
pub trait CombinationPolicy: Send + Sync {
    /// Returns the name of this policy, for diagnostics.
    fn name(&self) -> &str;

    /// Combines the accumulated value with the next source's contribution.
    ///
    /// `current` is the accumulator from less significant sources (or `None`
    /// at the start of the pass); the returned value becomes the new
    /// accumulator.
    fn collect(
        &self,
        current: Option<PropertyValue>,
        key: &str,
        source: &dyn PropertySource,
    ) -> Option<PropertyValue>;
}

/// The default policy: a present value from a more significant source
/// replaces the accumulator entirely; an absent one leaves it untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverridingPolicy;

impl CombinationPolicy for OverridingPolicy {
    fn name(&self) -> &str {
        "overriding"
    }

    fn collect(
        &self,
        current: Option<PropertyValue>,
        key: &str,
        source: &dyn PropertySource,
    ) -> Option<PropertyValue> {
        lookup(source, key).or(current)
    }
}

/// A policy that concatenates the values of every source defining the key,
/// least significant first, joined by a separator.
#[derive(Debug, Clone)]
pub struct AppendingPolicy {
    separator: String,
}

impl AppendingPolicy {
    /// Creates an appending policy with the given separator.
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for AppendingPolicy {
    fn default() -> Self {
        Self::new(",")
    }
}

impl CombinationPolicy for AppendingPolicy {
    fn name(&self) -> &str {
        "appending"
    }

    fn collect(
        &self,
        current: Option<PropertyValue>,
        key: &str,
        source: &dyn PropertySource,
    ) -> Option<PropertyValue> {
        match (current, lookup(source, key)) {
            (Some(cur), Some(next)) => {
                let cur_text = cur.value().map(str::to_string);
                let next_text = next.value().map(str::to_string);
                match (cur_text, next_text) {
                    (Some(a), Some(b)) => {
                        let source_name = next.source().to_string();
                        Some(PropertyValue::of(
                            key,
                            format!("{a}{}{b}", self.separator),
                            source_name,
                        ))
                    }
                    (None, Some(_)) => Some(next),
                    _ => Some(cur),
                }
            }
            (current, next) => next.or(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pythia_core::fixtures::{FailingSource, StaticSource};

    #[test]
    fn test_lookup_isolates_failures() {
        let source = FailingSource::new("broken", 10);
        assert!(lookup(&source, "a").is_none());
    }

    #[test]
    fn test_overriding_present_replaces() {
        let source = StaticSource::new("s", 10, &[("a", "new")]);
        let current = Some(PropertyValue::of("a", "old", "earlier"));
        let result = OverridingPolicy.collect(current, "a", &source).unwrap();
        assert_eq!(result.value(), Some("new"));
        assert_eq!(result.source(), "s");
    }

    #[test]
    fn test_overriding_absent_keeps_current() {
        let source = StaticSource::new("s", 10, &[]);
        let current = Some(PropertyValue::of("a", "old", "earlier"));
        let result = OverridingPolicy.collect(current, "a", &source).unwrap();
        assert_eq!(result.value(), Some("old"));
    }

    #[test]
    fn test_overriding_no_source_defines_key() {
        let source = StaticSource::new("s", 10, &[]);
        assert!(OverridingPolicy.collect(None, "a", &source).is_none());
    }

    #[test]
    fn test_overriding_failure_keeps_current() {
        let source = FailingSource::new("broken", 10);
        let current = Some(PropertyValue::of("a", "old", "earlier"));
        let result = OverridingPolicy.collect(current, "a", &source).unwrap();
        assert_eq!(result.value(), Some("old"));
    }

    #[test]
    fn test_appending_concatenates() {
        let source = StaticSource::new("s", 10, &[("a", "two")]);
        let current = Some(PropertyValue::of("a", "one", "earlier"));
        let result = AppendingPolicy::default()
            .collect(current, "a", &source)
            .unwrap();
        assert_eq!(result.value(), Some("one,two"));
        assert_eq!(result.source(), "s");
    }

    #[test]
    fn test_appending_single_side() {
        let source = StaticSource::new("s", 10, &[("a", "only")]);
        let result = AppendingPolicy::default().collect(None, "a", &source).unwrap();
        assert_eq!(result.value(), Some("only"));

        let empty = StaticSource::new("e", 10, &[]);
        let current = Some(PropertyValue::of("a", "kept", "earlier"));
        let result = AppendingPolicy::default()
            .collect(current, "a", &empty)
            .unwrap();
        assert_eq!(result.value(), Some("kept"));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(OverridingPolicy.name(), "overriding");
        assert_eq!(AppendingPolicy::default().name(), "appending");
    }
}
