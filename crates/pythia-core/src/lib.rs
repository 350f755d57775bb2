//! # Pythia Core
//!
//! Core types and traits for the Pythia configuration layer.
//!
//! This crate provides the foundational contracts used throughout Pythia:
//!
//! - [`PropertySource`] - A named, ordinal-ordered key/value provider
//! - [`PropertyValue`] - A single resolved configuration entry with metadata
//! - [`PropertyFilter`] - A transformation applied to resolved values
//! - [`ConfigError`] - Standard error type for fatal configuration failures
//! - [`ServiceRegistry`] - Explicit, priority-aware extension-point registry

#![doc(html_root_url = "https://docs.rs/pythia-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod filter;
pub mod fixtures;
mod priority;
mod registry;
mod source;

pub use error::{ConfigError, ConfigResult};
pub use filter::{FilterContext, FilterScope, PropertyFilter};
pub use priority::{select_highest, DEFAULT_PRIORITY};
pub use registry::ServiceRegistry;
pub use source::{PropertySource, PropertyValue, SourceError};
