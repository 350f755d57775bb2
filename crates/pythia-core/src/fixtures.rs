//! Test fixtures for Pythia development and testing.
//!
//! This module provides pre-built mock sources and filters that can be used
//! in tests across the Pythia workspace.
//!
//! # Example
//!
//! ```
//! use pythia_core::fixtures::StaticSource;
//! use pythia_core::PropertySource;
//!
//! let source = StaticSource::new("base", 100, &[("a", "1"), ("b", "2")]);
//! assert_eq!(source.get("a").unwrap().unwrap().value(), Some("1"));
//! ```

use std::collections::BTreeMap;

use crate::{FilterContext, PropertyFilter, PropertySource, PropertyValue, SourceError};

/// An in-memory source built from a fixed set of entries.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    ordinal: i32,
    entries: BTreeMap<String, String>,
    scannable: bool,
}

impl StaticSource {
    /// Creates a scannable source from `(key, value)` pairs.
    #[must_use]
    pub fn new(name: impl Into<String>, ordinal: i32, entries: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            ordinal,
            entries: entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            scannable: true,
        }
    }

    /// Marks the source as supporting point lookups only.
    #[must_use]
    pub fn not_scannable(mut self) -> Self {
        self.scannable = false;
        self
    }
}

impl PropertySource for StaticSource {
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

/// A source whose every operation fails, for failure-isolation tests.
#[derive(Debug, Clone)]
pub struct FailingSource {
    name: String,
    ordinal: i32,
}

impl FailingSource {
    /// Creates a failing source with the given name and ordinal.
    #[must_use]
    pub fn new(name: impl Into<String>, ordinal: i32) -> Self {
        Self {
            name: name.into(),
            ordinal,
        }
    }
}

impl PropertySource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, _key: &str) -> Result<Option<PropertyValue>, SourceError> {
        Err(SourceError::message(&self.name, "simulated backend outage"))
    }

    fn properties(&self) -> Result<BTreeMap<String, PropertyValue>, SourceError> {
        Err(SourceError::message(&self.name, "simulated backend outage"))
    }
}

/// A filter that rewrites one exact value into another.
///
/// Chaining `ReplaceFilter::new("step-a", "x", "y")` and
/// `ReplaceFilter::new("step-b", "y", "z")` turns `"x"` into `"z"` across two
/// convergence passes.
#[derive(Debug, Clone)]
pub struct ReplaceFilter {
    name: String,
    from: String,
    to: String,
}

impl ReplaceFilter {
    /// Creates a filter rewriting `from` into `to`.
    #[must_use]
    pub fn new(name: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

impl PropertyFilter for ReplaceFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, value: Option<&str>, _ctx: &FilterContext<'_>) -> Option<String> {
        match value {
            Some(v) if v == self.from => Some(self.to.clone()),
            other => other.map(str::to_string),
        }
    }
}

/// A pathological filter that flips a value between two states on every call.
///
/// Used to exercise the convergence-loop iteration cap.
#[derive(Debug, Clone)]
pub struct TogglingFilter {
    name: String,
    a: String,
    b: String,
}

impl TogglingFilter {
    /// Creates a filter toggling between `a` and `b`.
    #[must_use]
    pub fn new(name: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            a: a.into(),
            b: b.into(),
        }
    }
}

impl PropertyFilter for TogglingFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, value: Option<&str>, _ctx: &FilterContext<'_>) -> Option<String> {
        match value {
            Some(v) if v == self.a => Some(self.b.clone()),
            Some(v) if v == self.b => Some(self.a.clone()),
            other => other.map(str::to_string),
        }
    }
}

/// A filter that suppresses one exact key by returning `None` for it.
#[derive(Debug, Clone)]
pub struct SuppressFilter {
    name: String,
    key: String,
}

impl SuppressFilter {
    /// Creates a filter erasing the given key.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

impl PropertyFilter for SuppressFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, value: Option<&str>, ctx: &FilterContext<'_>) -> Option<String> {
        if ctx.key() == self.key {
            None
        } else {
            value.map(str::to_string)
        }
    }
}
