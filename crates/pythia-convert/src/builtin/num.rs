//! Integer and floating-point converters.

use crate::{ConversionContext, PropertyConverter};

/// Splits an optional leading sign off a trimmed numeric literal.
fn split_sign(text: &str) -> (&str, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        ("-", rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        ("+", rest)
    } else {
        ("", text)
    }
}

/// Normalizes an integer literal into `(digits-with-sign, radix)`.
///
/// `0x`/`0X` prefixes select hexadecimal, a bare leading `0` selects octal,
/// anything else is decimal. The sign survives normalization so
/// `from_str_radix` sees it.
fn split_radix(text: &str) -> (String, u32) {
    let (sign, body) = split_sign(text);
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (format!("{sign}{hex}"), 16)
    } else if body.len() > 1 && body.starts_with('0') {
        (format!("{sign}{}", &body[1..]), 8)
    } else {
        (format!("{sign}{body}"), 10)
    }
}

/// Recognizes an explicit hex/octal integer literal inside a float value.
///
/// Returns `None` when the text is not in an explicit radix form, letting the
/// caller fall back to standard decimal float parsing (so `0.5` stays
/// decimal while `010` is octal).
fn radix_integer(text: &str) -> Option<Result<i128, std::num::ParseIntError>> {
    let (sign, body) = split_sign(text);
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        return Some(i128::from_str_radix(&format!("{sign}{hex}"), 16));
    }
    if body.len() > 1 && body.starts_with('0') && body[1..].bytes().all(|b| b.is_ascii_digit() && b < b'8')
    {
        return Some(i128::from_str_radix(&format!("{sign}{}", &body[1..]), 8));
    }
    None
}

macro_rules! integer_converter {
    ($(#[$meta:meta])* $name:ident, $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl PropertyConverter<$ty> for $name {
            fn convert(
                &self,
                raw: &str,
                ctx: &ConversionContext<'_>,
            ) -> anyhow::Result<Option<$ty>> {
                let text = raw.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                if text.eq_ignore_ascii_case("min") {
                    return Ok(Some(<$ty>::MIN));
                }
                if text.eq_ignore_ascii_case("max") {
                    return Ok(Some(<$ty>::MAX));
                }
                let (digits, radix) = split_radix(text);
                <$ty>::from_str_radix(&digits, radix).map(Some).map_err(|e| {
                    anyhow::anyhow!("'{}' is not a valid {}: {}", raw, ctx.target_type(), e)
                })
            }

            fn accepted_formats(&self) -> Vec<String> {
                vec![
                    "<decimal>".to_string(),
                    "0<octal>".to_string(),
                    "0x<hex>".to_string(),
                    "min|max".to_string(),
                ]
            }
        }
    };
}

integer_converter!(
    /// Converter for `i8` values.
    I8Converter,
    i8
);
integer_converter!(
    /// Converter for `i16` values.
    I16Converter,
    i16
);
integer_converter!(
    /// Converter for `i32` values.
    I32Converter,
    i32
);
integer_converter!(
    /// Converter for `i64` values.
    I64Converter,
    i64
);
integer_converter!(
    /// Converter for `i128` values.
    I128Converter,
    i128
);
integer_converter!(
    /// Converter for `u8` values.
    U8Converter,
    u8
);
integer_converter!(
    /// Converter for `u16` values.
    U16Converter,
    u16
);
integer_converter!(
    /// Converter for `u32` values.
    U32Converter,
    u32
);
integer_converter!(
    /// Converter for `u64` values.
    U64Converter,
    u64
);
integer_converter!(
    /// Converter for `usize` values.
    UsizeConverter,
    usize
);

macro_rules! float_converter {
    ($(#[$meta:meta])* $name:ident, $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl PropertyConverter<$ty> for $name {
            fn convert(
                &self,
                raw: &str,
                ctx: &ConversionContext<'_>,
            ) -> anyhow::Result<Option<$ty>> {
                let text = raw.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                if text.eq_ignore_ascii_case("nan") {
                    return Ok(Some(<$ty>::NAN));
                }
                if text.eq_ignore_ascii_case("positive_infinity") {
                    return Ok(Some(<$ty>::INFINITY));
                }
                if text.eq_ignore_ascii_case("negative_infinity") {
                    return Ok(Some(<$ty>::NEG_INFINITY));
                }
                if text.eq_ignore_ascii_case("min") {
                    return Ok(Some(<$ty>::MIN));
                }
                if text.eq_ignore_ascii_case("max") {
                    return Ok(Some(<$ty>::MAX));
                }
                if let Some(integer) = radix_integer(text) {
                    return integer
                        .map(|v| Some(v as $ty))
                        .map_err(|e| {
                            anyhow::anyhow!(
                                "'{}' is not a valid {}: {}",
                                raw,
                                ctx.target_type(),
                                e
                            )
                        });
                }
                text.parse::<$ty>().map(Some).map_err(|e| {
                    anyhow::anyhow!("'{}' is not a valid {}: {}", raw, ctx.target_type(), e)
                })
            }

            fn accepted_formats(&self) -> Vec<String> {
                vec![
                    "<decimal|scientific>".to_string(),
                    "0<octal>".to_string(),
                    "0x<hex>".to_string(),
                    "nan|positive_infinity|negative_infinity".to_string(),
                    "min|max".to_string(),
                ]
            }
        }
    };
}

float_converter!(
    /// Converter for `f32` values.
    F32Converter,
    f32
);
float_converter!(
    /// Converter for `f64` values.
    F64Converter,
    f64
);
