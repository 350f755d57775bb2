//! Error types for the Pythia configuration layer.
//!
//! Only fatal failures surface as [`ConfigError`]: conversion exhaustion,
//! extension-point priority conflicts, and invariant violations. Recoverable
//! failures (a single source or converter misbehaving, a filter chain that
//! fails to converge) are logged and never interrupt resolution.

use thiserror::Error;

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Standard error type for fatal configuration failures.
///
/// Every variant carries the offending key or extension-point type so the
/// message pinpoints the failing lookup without requiring log correlation.
///
/// # Example
///
/// ```
/// use pythia_core::ConfigError;
///
/// let err = ConfigError::type_conversion("server.port", "i32");
/// assert!(err.to_string().contains("server.port"));
/// assert!(err.to_string().contains("i32"));
/// ```
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No converter produced a value for the requested target type.
    ///
    /// Raised both when every registered converter was exhausted and when no
    /// converter at all is registered for the type.
    #[error("no converter produced a value for key '{key}' with target type {target_type}")]
    TypeConversion {
        /// The key being converted.
        key: String,
        /// The requested target type.
        target_type: &'static str,
    },

    /// Two or more implementations of a single-valued extension point tie at
    /// the highest priority.
    ///
    /// Selection fails fast instead of silently picking one, since an
    /// arbitrary pick would make behavior differ across environments.
    #[error(
        "{count} implementations of {extension_point} share the highest priority {priority}: {candidates:?}"
    )]
    PriorityConflict {
        /// The extension-point type the candidates implement.
        extension_point: &'static str,
        /// The tied priority value.
        priority: i32,
        /// Number of tied candidates.
        count: usize,
        /// Names of the tied candidates.
        candidates: Vec<String>,
    },

    /// No implementation is registered for a required extension point.
    #[error("no implementation registered for {extension_point}")]
    NotRegistered {
        /// The extension-point type.
        extension_point: &'static str,
    },

    /// A value violated an invariant enforced at a mutation API.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// The key the value belongs to.
        key: String,
        /// Explanation of the violation.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a conversion error for the given key and target type.
    #[must_use]
    pub fn type_conversion(key: impl Into<String>, target_type: &'static str) -> Self {
        Self::TypeConversion {
            key: key.into(),
            target_type,
        }
    }

    /// Creates a priority-conflict error listing the tied candidates.
    #[must_use]
    pub fn priority_conflict(
        extension_point: &'static str,
        priority: i32,
        candidates: Vec<String>,
    ) -> Self {
        Self::PriorityConflict {
            extension_point,
            priority,
            count: candidates.len(),
            candidates,
        }
    }

    /// Creates a not-registered error for the given extension point.
    #[must_use]
    pub fn not_registered(extension_point: &'static str) -> Self {
        Self::NotRegistered { extension_point }
    }

    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
