//! Conversion dispatch: the first-success-wins trial loop.

use pythia_core::ConfigError;

use crate::{ConversionContext, ConverterRegistry};

/// Converts `raw` into `T` using the converters registered for `T`.
///
/// Converters are tried in registry order (priority descending, insertion
/// order among equals). The first converter returning a value wins and no
/// further converters are consulted, even if they could also succeed. A
/// converter that declines (`Ok(None)`) is skipped silently; a converter that
/// fails (`Err`) is logged at debug level and skipped.
///
/// # Errors
///
/// Returns [`ConfigError::TypeConversion`] naming the key and target type if
/// no converter is registered for `T`, or if every registered converter was
/// exhausted without producing a value.
pub fn dispatch<T: 'static>(
    registry: &ConverterRegistry,
    key: &str,
    raw: &str,
) -> Result<T, ConfigError> {
    let target_type = std::any::type_name::<T>();
    let Some(entries) = registry.converters_for::<T>() else {
        return Err(ConfigError::type_conversion(key, target_type));
    };

    let ctx = ConversionContext::new(key, target_type);
    for entry in entries.iter() {
        match entry.converter().convert(raw, &ctx) {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(error) => {
                tracing::debug!(
                    key,
                    target_type,
                    %error,
                    "converter attempt failed, trying next converter"
                );
            }
        }
    }
    Err(ConfigError::type_conversion(key, target_type))
}
