//! # Pythia Sources
//!
//! Built-in property sources for the Pythia configuration layer.
//!
//! None of these sources parse file formats or speak network protocols; they
//! cover the in-process cases every deployment needs:
//!
//! - [`EnvironmentSource`] - a snapshot of the process environment, with
//!   optional prefix filtering
//! - [`MapSource`] - an immutable in-memory map, the workhorse for
//!   programmatic defaults and tests
//! - [`RuntimeOverrideSource`] - a mutable high-ordinal map for runtime
//!   overrides
//!
//! The default ordinals stack the sources the conventional way: programmatic
//! defaults (100) < environment (300) < runtime overrides (1000).

#![doc(html_root_url = "https://docs.rs/pythia-sources/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod environment;
mod map;
mod overrides;

pub use environment::{EnvironmentSource, ENVIRONMENT_ORDINAL};
pub use map::{MapSource, MAP_ORDINAL};
pub use overrides::{RuntimeOverrideSource, OVERRIDE_ORDINAL};
