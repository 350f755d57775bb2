//! # Pythia Resolve
//!
//! The resolution pipeline of the Pythia configuration layer.
//!
//! This crate orchestrates the core algorithm: property sources are merged in
//! ascending ordinal order through a pluggable [`CombinationPolicy`], the
//! merged values are driven to a fixed point by the bounded filter
//! [`converge`] loop, and typed access dispatches through the converter
//! registry.
//!
//! # Example
//!
//! ```
//! use pythia_core::fixtures::StaticSource;
//! use pythia_resolve::Configuration;
//!
//! let config = Configuration::builder()
//!     .with_default_converters()
//!     .with_source(StaticSource::new("base", 100, &[("a", "1"), ("b", "2")]))
//!     .with_source(StaticSource::new("override", 200, &[("b", "3")]))
//!     .build();
//!
//! assert_eq!(config.get("a").as_deref(), Some("1"));
//! assert_eq!(config.get("b").as_deref(), Some("3"));
//! assert_eq!(config.get_as::<i32>("b").unwrap(), Some(3));
//! ```

#![doc(html_root_url = "https://docs.rs/pythia-resolve/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod combine;
mod context;
mod converge;
mod filters;
mod resolver;

pub use combine::{lookup, AppendingPolicy, CombinationPolicy, OverridingPolicy};
pub use context::{ContextBuilder, ContextSnapshot};
pub use converge::{converge, Convergence, MAX_FILTER_PASSES};
pub use filters::MaskFilter;
pub use resolver::Configuration;
