//! Built-in scope-aware filters.

use std::collections::BTreeSet;

use pythia_core::{FilterContext, PropertyFilter, DEFAULT_PRIORITY};

/// Conceals the values of selected keys during full-map enumeration.
///
/// Direct single-key reads still return the real value; only the bulk
/// `properties()` view is masked. This is the usual treatment for secrets:
/// code that knows the key may read it, but a configuration dump must not
/// leak it.
///
/// # Example
///
/// ```
/// use pythia_core::fixtures::StaticSource;
/// use pythia_resolve::{Configuration, MaskFilter};
///
/// let config = Configuration::builder()
///     .with_source(StaticSource::new("base", 100, &[("db.password", "hunter2")]))
///     .with_filter(MaskFilter::new(["db.password"]))
///     .build();
///
/// assert_eq!(config.get("db.password").as_deref(), Some("hunter2"));
/// assert_eq!(
///     config.properties().get("db.password").map(String::as_str),
///     Some("*****")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MaskFilter {
    keys: BTreeSet<String>,
    replacement: String,
    priority: i32,
}

impl MaskFilter {
    /// Creates a mask filter concealing the given keys with `*****`.
    #[must_use]
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            replacement: "*****".to_string(),
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Replaces the concealment text.
    #[must_use]
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }

    /// Sets the chain priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl PropertyFilter for MaskFilter {
    fn name(&self) -> &str {
        "mask"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn filter(&self, value: Option<&str>, ctx: &FilterContext<'_>) -> Option<String> {
        if !ctx.is_single_key() && self.keys.contains(ctx.key()) {
            value.map(|_| self.replacement.clone())
        } else {
            value.map(str::to_string)
        }
    }
}
