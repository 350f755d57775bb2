//! # Pythia
//!
//! **Pluggable configuration abstraction for Rust services**
//!
//! Pythia aggregates key/value configuration from heterogeneous sources,
//! merges them under deterministic precedence rules, filters the merged
//! values, and converts them into typed objects on demand:
//!
//! - **Ordered sources** – every source carries an ordinal; higher ordinals
//!   win, ties break deterministically by name
//! - **Pluggable merging** – the per-key combination policy is a strategy
//!   object, overriding by default
//! - **Stabilizing filters** – the filter chain is re-applied until values
//!   stop changing, with a bounded pass cap
//! - **Typed access** – converters are tried per target type in priority
//!   order until one succeeds
//! - **Copy-on-write contexts** – mutations install fresh immutable
//!   snapshots; readers never hold a lock while resolving
//!
//! ## Quick Start
//!
//! ```
//! use pythia::prelude::*;
//!
//! let config = Configuration::builder()
//!     .with_default_converters()
//!     .with_source(MapSource::new("defaults").with("server.port", "8080"))
//!     .with_source(EnvironmentSource::from_entries([("APP_SERVER_PORT", "9090")])
//!         .with_prefix("APP_"))
//!     .build();
//!
//! // The environment layer (ordinal 300) outranks the defaults (ordinal 100);
//! // environment keys keep their upper-case spelling after prefix stripping.
//! assert_eq!(config.get_as::<u16>("SERVER_PORT").unwrap(), Some(9090));
//! assert_eq!(config.get_as::<u16>("server.port").unwrap(), Some(8080));
//! ```
//!
//! ## Architecture
//!
//! Resolution flows through a fixed pipeline:
//!
//! ```text
//! get(key) → ordered sources → combination policy → filter convergence → value
//!                                                         ↓
//! get_as::<T>(key) ──────────────────────────────→ converter dispatch → T
//! ```

#![doc(html_root_url = "https://docs.rs/pythia/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core contracts
pub use pythia_core as core;

// Re-export the conversion layer
pub use pythia_convert as convert;

// Re-export the resolution pipeline
pub use pythia_resolve as resolve;

// Re-export the built-in sources
pub use pythia_sources as sources;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use pythia::prelude::*;
///
/// let config = Configuration::builder()
///     .with_source(MapSource::new("defaults").with("a", "1"))
///     .build();
/// assert_eq!(config.get("a").as_deref(), Some("1"));
/// ```
pub mod prelude {
    pub use pythia_convert::{ConversionContext, ConverterRegistry, PropertyConverter};
    pub use pythia_core::{
        ConfigError, ConfigResult, FilterContext, FilterScope, PropertyFilter, PropertySource,
        PropertyValue, ServiceRegistry, SourceError, DEFAULT_PRIORITY,
    };
    pub use pythia_resolve::{
        AppendingPolicy, CombinationPolicy, Configuration, ContextBuilder, ContextSnapshot,
        MaskFilter, OverridingPolicy,
    };
    pub use pythia_sources::{EnvironmentSource, MapSource, RuntimeOverrideSource};
}
