//! # Pythia Convert
//!
//! Typed value conversion for the Pythia configuration layer.
//!
//! Configuration values are strings at rest; this crate turns them into typed
//! objects on demand:
//!
//! - [`PropertyConverter`] - The converter contract: parse a raw string into
//!   a target type, decline, or fail
//! - [`ConverterRegistry`] - Per-type ordered converter lists with stable
//!   priority ordering
//! - [`dispatch`] - The trial loop: first converter to produce a value wins
//! - [`builtin`] - Converters for the std scalar types, with radix and
//!   `min`/`max` alias support

#![doc(html_root_url = "https://docs.rs/pythia-convert/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod builtin;
mod convert;
mod dispatch;
mod registry;

pub use convert::{ConversionContext, PropertyConverter};
pub use dispatch::dispatch;
pub use registry::{ConverterRegistry, RankedConverter};
