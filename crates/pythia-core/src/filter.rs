//! Property filter contract.
//!
//! A [`PropertyFilter`] transforms resolved values before they are handed to
//! callers. Filters are chained: the resolver re-applies the full chain until
//! the values stabilize (see the convergence engine in `pythia-resolve`), so
//! a filter must be a pure function of its inputs.

use crate::priority::DEFAULT_PRIORITY;

/// The scope a filter invocation runs under.
///
/// Some filters only make sense during full-map enumeration (for example,
/// concealing secret values in a dump) and should pass values through
/// untouched during direct single-key reads. The scope is explicit, per-call
/// state carried in the [`FilterContext`]; it is never derived from ambient
/// thread identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// A single key is being resolved via a direct lookup.
    SingleKey,
    /// The entire merged property map is being filtered.
    FullMap,
}

/// Per-invocation context handed to a [`PropertyFilter`].
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    key: &'a str,
    scope: FilterScope,
}

impl<'a> FilterContext<'a> {
    /// Creates a context for the given key and scope.
    #[must_use]
    pub fn new(key: &'a str, scope: FilterScope) -> Self {
        Self { key, scope }
    }

    /// Returns the key whose value is being filtered.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key
    }

    /// Returns the scope of this invocation.
    #[must_use]
    pub fn scope(&self) -> FilterScope {
        self.scope
    }

    /// Whether this invocation is a direct single-key lookup.
    #[must_use]
    pub fn is_single_key(&self) -> bool {
        self.scope == FilterScope::SingleKey
    }
}

/// A transformation applied to resolved values.
///
/// Filters receive the current value for a key (or `None` if a previous
/// filter suppressed it) and return the transformed value. Returning `None`
/// suppresses the property: the key becomes absent and stays absent unless a
/// later filter deliberately produces a replacement.
///
/// # Chain order
///
/// Filters carry an integer priority (default [`DEFAULT_PRIORITY`]); higher
/// priority filters run earlier in each pass. Filters with equal priority are
/// ordered by name so identical filter sets always produce the same chain.
///
/// # Invariants
///
/// - A filter MUST be side-effect free and deterministic for a given input;
///   the resolver may invoke it repeatedly while driving values to a fixed
///   point.
/// - A filter MUST NOT assume it sees the raw source value; it may observe
///   the output of earlier filters or of its own previous pass.
pub trait PropertyFilter: Send + Sync {
    /// Returns the unique name of this filter, used for chain ordering
    /// tie-breaks, removal, and diagnostics.
    fn name(&self) -> &str;

    /// Returns the chain priority of this filter; higher runs earlier.
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Transforms the value for `ctx.key()`.
    ///
    /// Returning `None` suppresses the property.
    fn filter(&self, value: Option<&str>, ctx: &FilterContext<'_>) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl PropertyFilter for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn filter(&self, value: Option<&str>, _ctx: &FilterContext<'_>) -> Option<String> {
            value.map(str::to_uppercase)
        }
    }

    #[test]
    fn test_filter_context_accessors() {
        let ctx = FilterContext::new("a.b", FilterScope::SingleKey);
        assert_eq!(ctx.key(), "a.b");
        assert_eq!(ctx.scope(), FilterScope::SingleKey);
        assert!(ctx.is_single_key());

        let ctx = FilterContext::new("a.b", FilterScope::FullMap);
        assert!(!ctx.is_single_key());
    }

    #[test]
    fn test_default_priority() {
        assert_eq!(Upper.priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_filter_preserves_none() {
        let ctx = FilterContext::new("k", FilterScope::SingleKey);
        assert_eq!(Upper.filter(None, &ctx), None);
        assert_eq!(Upper.filter(Some("abc"), &ctx), Some("ABC".to_string()));
    }
}
