//! End-to-end resolution tests.
//!
//! These tests drive the whole pipeline together: ordered source merging
//! through the combination policy, filter convergence in both scopes, and
//! typed access through the converter registry.

use proptest::prelude::*;
use pythia_core::fixtures::{FailingSource, ReplaceFilter, StaticSource, SuppressFilter, TogglingFilter};
use pythia_core::{ConfigError, ServiceRegistry};
use pythia_resolve::{AppendingPolicy, Configuration, MaskFilter};
use pythia_sources::{EnvironmentSource, MapSource, RuntimeOverrideSource};
use std::sync::Arc;

/// The canonical two-layer setup: `Base` (ordinal 100) and `Override`
/// (ordinal 200).
fn base_override() -> Configuration {
    Configuration::builder()
        .with_default_converters()
        .with_source(StaticSource::new("Base", 100, &[("a", "1"), ("b", "2")]))
        .with_source(StaticSource::new("Override", 200, &[("b", "3"), ("c", "4")]))
        .build()
}

#[test]
fn test_overriding_merge_end_to_end() {
    let config = base_override();

    let all = config.properties();
    assert_eq!(all.len(), 3);
    assert_eq!(all["a"], "1");
    assert_eq!(all["b"], "3");
    assert_eq!(all["c"], "4");
    assert_eq!(config.get("b").as_deref(), Some("3"));
}

#[test]
fn test_merge_order_ignores_registration_order() {
    let forward = base_override();
    let reversed = Configuration::builder()
        .with_source(StaticSource::new("Override", 200, &[("b", "3"), ("c", "4")]))
        .with_source(StaticSource::new("Base", 100, &[("a", "1"), ("b", "2")]))
        .build();

    assert_eq!(forward.get("b"), reversed.get("b"));
    assert_eq!(forward.properties(), reversed.properties());
}

#[test]
fn test_equal_ordinals_break_ties_by_name() {
    // Same ordinal: the lexicographically greater name is applied later and
    // wins under the overriding policy, regardless of registration order.
    let first = Configuration::builder()
        .with_source(StaticSource::new("alpha", 100, &[("k", "from-alpha")]))
        .with_source(StaticSource::new("beta", 100, &[("k", "from-beta")]))
        .build();
    let second = Configuration::builder()
        .with_source(StaticSource::new("beta", 100, &[("k", "from-beta")]))
        .with_source(StaticSource::new("alpha", 100, &[("k", "from-alpha")]))
        .build();

    assert_eq!(first.get("k").as_deref(), Some("from-beta"));
    assert_eq!(second.get("k").as_deref(), Some("from-beta"));
}

#[test]
fn test_filter_chain_converges_across_filters() {
    let config = Configuration::builder()
        .with_source(StaticSource::new("base", 100, &[("k", "x")]))
        .with_filter(ReplaceFilter::new("step-a", "x", "y"))
        .with_filter(ReplaceFilter::new("step-b", "y", "z"))
        .build();

    assert_eq!(config.get("k").as_deref(), Some("z"));
    assert_eq!(config.properties()["k"], "z");
}

#[test]
fn test_oscillating_filter_terminates_without_error() {
    let config = Configuration::builder()
        .with_source(StaticSource::new("base", 100, &[("k", "a")]))
        .with_filter(TogglingFilter::new("toggle", "a", "b"))
        .build();

    // The cap cuts the loop; the result is one of the two states.
    let value = config.get("k").unwrap();
    assert!(value == "a" || value == "b");

    let all = config.properties();
    let value = &all["k"];
    assert!(value == "a" || value == "b");
}

#[test]
fn test_null_erasure_drops_key_from_properties() {
    let config = Configuration::builder()
        .with_source(StaticSource::new("base", 100, &[("keep", "1"), ("drop", "2")]))
        .with_filter(SuppressFilter::new("eraser", "drop"))
        .build();

    let all = config.properties();
    assert!(!all.contains_key("drop"));
    assert_eq!(all["keep"], "1");
}

#[test]
fn test_conversion_fallback_to_second_converter() {
    use pythia_convert::{ConversionContext, PropertyConverter};

    struct AlwaysDeclines;

    impl PropertyConverter<i32> for AlwaysDeclines {
        fn convert(&self, _raw: &str, _ctx: &ConversionContext<'_>) -> anyhow::Result<Option<i32>> {
            Ok(None)
        }
    }

    struct Decimal;

    impl PropertyConverter<i32> for Decimal {
        fn convert(&self, raw: &str, _ctx: &ConversionContext<'_>) -> anyhow::Result<Option<i32>> {
            Ok(Some(raw.trim().parse()?))
        }
    }

    let config = Configuration::builder()
        .with_source(StaticSource::new("base", 100, &[("n", "17")]))
        .with_converter::<i32>(AlwaysDeclines)
        .with_converter::<i32>(Decimal)
        .build();

    assert_eq!(config.get_as::<i32>("n").unwrap(), Some(17));
}

#[test]
fn test_conversion_exhaustion_names_key_and_type() {
    let config = Configuration::builder()
        .with_default_converters()
        .with_source(StaticSource::new("base", 100, &[("n", "notanumber")]))
        .build();

    let err = config.get_as::<i32>("n").unwrap_err();
    assert!(matches!(err, ConfigError::TypeConversion { .. }));
    let msg = err.to_string();
    assert!(msg.contains('n'));
    assert!(msg.contains("i32"));
}

#[test]
fn test_priority_ambiguity_is_fatal_distinct_priorities_are_not() {
    struct Singleton {
        label: &'static str,
    }

    // Equal top priorities: selection fails fast.
    let mut ambiguous = ServiceRegistry::new();
    ambiguous.register_with_priority("a", Arc::new(Singleton { label: "a" }), 5);
    ambiguous.register_with_priority("b", Arc::new(Singleton { label: "b" }), 5);
    assert!(matches!(
        ambiguous.resolve::<Singleton>(),
        Err(ConfigError::PriorityConflict { count: 2, .. })
    ));

    // Distinct priorities: the higher one is selected silently.
    let mut clear = ServiceRegistry::new();
    clear.register_with_priority("five", Arc::new(Singleton { label: "five" }), 5);
    clear.register_with_priority("three", Arc::new(Singleton { label: "three" }), 3);
    assert_eq!(clear.resolve::<Singleton>().unwrap().label, "five");
}

#[test]
fn test_partial_source_failure_isolation() {
    let config = Configuration::builder()
        .with_source(StaticSource::new("s1", 100, &[("a", "1")]))
        .with_source(FailingSource::new("s2", 200))
        .with_source(StaticSource::new("s3", 300, &[("b", "2")]))
        .build();

    let all = config.properties();
    assert_eq!(all["a"], "1");
    assert_eq!(all["b"], "2");
    assert_eq!(config.get("a").as_deref(), Some("1"));
    assert_eq!(config.get("b").as_deref(), Some("2"));
}

#[test]
fn test_mask_filter_conceals_enumeration_only() {
    let config = Configuration::builder()
        .with_source(
            MapSource::new("secrets")
                .with("db.password", "hunter2")
                .with("db.host", "localhost"),
        )
        .with_filter(MaskFilter::new(["db.password"]))
        .build();

    assert_eq!(config.get("db.password").as_deref(), Some("hunter2"));
    let all = config.properties();
    assert_eq!(all["db.password"], "*****");
    assert_eq!(all["db.host"], "localhost");
}

#[test]
fn test_appending_policy_concatenates_across_layers() {
    let config = Configuration::builder()
        .with_source(StaticSource::new("low", 100, &[("tags", "alpha")]))
        .with_source(StaticSource::new("high", 200, &[("tags", "beta")]))
        .with_policy(AppendingPolicy::default())
        .build();

    assert_eq!(config.get("tags").as_deref(), Some("alpha,beta"));
}

#[test]
fn test_environment_and_override_layering() {
    let overrides = Arc::new(RuntimeOverrideSource::new("overrides"));
    let config = Configuration::builder()
        .with_source(MapSource::new("defaults").with("MODE", "dev"))
        .with_source(
            EnvironmentSource::from_entries([("APP_MODE", "staging")]).with_prefix("APP_"),
        )
        .with_source_arc(overrides.clone())
        .build();

    // Environment (300) beats defaults (100).
    assert_eq!(config.get("MODE").as_deref(), Some("staging"));

    // Runtime overrides (1000) beat everything, immediately.
    overrides.set("MODE", "prod");
    assert_eq!(config.get("MODE").as_deref(), Some("prod"));

    overrides.unset("MODE");
    assert_eq!(config.get("MODE").as_deref(), Some("staging"));
}

#[test]
fn test_readers_keep_consistent_snapshots_across_mutation() {
    let config = base_override();
    let old_snapshot = config.context();

    config.add_source(StaticSource::new("late", 900, &[("b", "99")]));

    // New reads see the mutation; the old snapshot is frozen.
    assert_eq!(config.get("b").as_deref(), Some("99"));
    assert_eq!(old_snapshot.sources().len(), 2);
}

#[test]
fn test_typed_access_via_default_converters() {
    let config = Configuration::builder()
        .with_default_converters()
        .with_source(
            MapSource::new("defaults")
                .with("port", "0x1F90")
                .with("ratio", "0.75")
                .with("verbose", "on")
                .with("timeout", "1500ms"),
        )
        .build();

    assert_eq!(config.get_as::<u16>("port").unwrap(), Some(8080));
    assert_eq!(config.get_as::<f64>("ratio").unwrap(), Some(0.75));
    assert_eq!(config.get_as::<bool>("verbose").unwrap(), Some(true));
    assert_eq!(
        config.get_as::<std::time::Duration>("timeout").unwrap(),
        Some(std::time::Duration::from_millis(1500))
    );
}

proptest! {
    /// Merge results depend only on the source set, never on the order the
    /// sources were registered in.
    #[test]
    fn prop_registration_order_is_irrelevant(order in Just(vec![0usize, 1, 2, 3]).prop_shuffle()) {
        let sources = [
            StaticSource::new("s0", 100, &[("k", "v0"), ("only0", "a")]),
            StaticSource::new("s1", 250, &[("k", "v1")]),
            StaticSource::new("s2", 200, &[("k", "v2"), ("only2", "b")]),
            StaticSource::new("s3", 50, &[("k", "v3")]),
        ];

        let mut builder = Configuration::builder();
        for index in order {
            builder = builder.with_source(sources[index].clone());
        }
        let config = builder.build();

        // s1 has the highest ordinal, so it always wins the shared key.
        let k = config.get("k");
        prop_assert_eq!(k.as_deref(), Some("v1"));
        let all = config.properties();
        prop_assert_eq!(all.len(), 3);
        prop_assert_eq!(all["only0"].as_str(), "a");
        prop_assert_eq!(all["only2"].as_str(), "b");
    }
}
