//! Property converter contract.

/// Per-invocation context handed to a [`PropertyConverter`].
///
/// Carries the key being resolved and the requested target type name so
/// converters can produce precise diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ConversionContext<'a> {
    key: &'a str,
    target_type: &'static str,
}

impl<'a> ConversionContext<'a> {
    /// Creates a context for the given key and target type.
    #[must_use]
    pub fn new(key: &'a str, target_type: &'static str) -> Self {
        Self { key, target_type }
    }

    /// Returns the key whose value is being converted.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key
    }

    /// Returns the name of the requested target type.
    #[must_use]
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }
}

/// A parser from a raw string value to a specific target type.
///
/// A converter has three possible outcomes:
///
/// - `Ok(Some(value))` - the conversion succeeded; the dispatcher stops here.
/// - `Ok(None)` - the converter declines this input (it is not in a format
///   the converter understands); the dispatcher silently tries the next one.
/// - `Err(_)` - the converter recognized the format but failed to parse it;
///   the failure is logged and the next converter is tried.
///
/// Converters must be pure functions of their input: no side effects, no
/// dependence on call order.
///
/// # Example
///
/// ```
/// use pythia_convert::{ConversionContext, PropertyConverter};
///
/// struct Percent;
///
/// impl PropertyConverter<f64> for Percent {
///     fn convert(
///         &self,
///         raw: &str,
///         _ctx: &ConversionContext<'_>,
///     ) -> anyhow::Result<Option<f64>> {
///         let Some(body) = raw.trim().strip_suffix('%') else {
///             return Ok(None); // not a percentage, decline
///         };
///         Ok(Some(body.parse::<f64>()? / 100.0))
///     }
/// }
///
/// let ctx = ConversionContext::new("ratio", "f64");
/// assert_eq!(Percent.convert("50%", &ctx).unwrap(), Some(0.5));
/// assert_eq!(Percent.convert("0.5", &ctx).unwrap(), None);
/// ```
pub trait PropertyConverter<T>: Send + Sync {
    /// Attempts to convert `raw` into the target type.
    ///
    /// # Errors
    ///
    /// Returns an error if the input matches a format this converter owns but
    /// cannot be parsed; the dispatcher logs the failure and continues with
    /// the next converter.
    fn convert(&self, raw: &str, ctx: &ConversionContext<'_>) -> anyhow::Result<Option<T>>;

    /// Textual formats this converter accepts, for diagnostics.
    fn accepted_formats(&self) -> Vec<String> {
        Vec::new()
    }
}
