//! Converters for non-numeric std types.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::{ConversionContext, PropertyConverter};

/// Converter for `bool` values.
///
/// Accepts `true`/`yes`/`y`/`on`/`1` and `false`/`no`/`n`/`off`/`0`,
/// case-insensitive; anything else is declined so another registered boolean
/// converter can have a go.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolConverter;

impl PropertyConverter<bool> for BoolConverter {
    fn convert(&self, raw: &str, _ctx: &ConversionContext<'_>) -> anyhow::Result<Option<bool>> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "n" | "off" | "0" => Ok(Some(false)),
            _ => Ok(None),
        }
    }

    fn accepted_formats(&self) -> Vec<String> {
        vec![
            "true|yes|y|on|1".to_string(),
            "false|no|n|off|0".to_string(),
        ]
    }
}

/// Converter for `char` values: exactly one character after trimming.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharConverter;

impl PropertyConverter<char> for CharConverter {
    fn convert(&self, raw: &str, ctx: &ConversionContext<'_>) -> anyhow::Result<Option<char>> {
        let text = raw.trim();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Some(c)),
            _ => anyhow::bail!(
                "'{}' is not a valid {}: expected exactly one character",
                raw,
                ctx.target_type()
            ),
        }
    }
}

/// Identity converter for `String` values; the raw value is kept verbatim,
/// including surrounding whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl PropertyConverter<String> for StringConverter {
    fn convert(&self, raw: &str, _ctx: &ConversionContext<'_>) -> anyhow::Result<Option<String>> {
        Ok(Some(raw.to_string()))
    }
}

/// Converter for `PathBuf` values; the raw value is kept verbatim since
/// paths may legitimately contain leading or trailing whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathBufConverter;

impl PropertyConverter<PathBuf> for PathBufConverter {
    fn convert(&self, raw: &str, _ctx: &ConversionContext<'_>) -> anyhow::Result<Option<PathBuf>> {
        Ok(Some(PathBuf::from(raw)))
    }
}

/// Converter for `SocketAddr` values via the std parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SocketAddrConverter;

impl PropertyConverter<SocketAddr> for SocketAddrConverter {
    fn convert(
        &self,
        raw: &str,
        ctx: &ConversionContext<'_>,
    ) -> anyhow::Result<Option<SocketAddr>> {
        raw.trim().parse().map(Some).map_err(|e| {
            anyhow::anyhow!("'{}' is not a valid {}: {}", raw, ctx.target_type(), e)
        })
    }
}

/// Converter for `Duration` values.
///
/// A bare integer is seconds; the suffixes `ms`, `s`, `m` and `h` select
/// milliseconds, seconds, minutes and hours.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationConverter;

impl PropertyConverter<Duration> for DurationConverter {
    fn convert(
        &self,
        raw: &str,
        ctx: &ConversionContext<'_>,
    ) -> anyhow::Result<Option<Duration>> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let (amount, unit_ms) = if let Some(body) = text.strip_suffix("ms") {
            (body, 1u64)
        } else if let Some(body) = text.strip_suffix('s') {
            (body, 1_000)
        } else if let Some(body) = text.strip_suffix('m') {
            (body, 60_000)
        } else if let Some(body) = text.strip_suffix('h') {
            (body, 3_600_000)
        } else {
            (text, 1_000)
        };
        let amount: u64 = amount.trim().parse().map_err(|e| {
            anyhow::anyhow!("'{}' is not a valid {}: {}", raw, ctx.target_type(), e)
        })?;
        Ok(Some(Duration::from_millis(amount.saturating_mul(unit_ms))))
    }

    fn accepted_formats(&self) -> Vec<String> {
        vec!["<seconds>".to_string(), "<n>ms|<n>s|<n>m|<n>h".to_string()]
    }
}
