//! Timestamp formatting utilities
//!
//! Renders the emission instant of a record. ISO 8601 with milliseconds is
//! the default; RFC 3339 and custom strftime patterns are also supported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const ISO8601_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use client_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Custom strftime format
    ///
    /// A pattern chrono cannot render falls back to the default format
    /// instead of failing the log call.
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_MILLIS).to_string(),
            TimestampFormat::Iso8601Micros => datetime.format(ISO8601_MICROS).to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(ISO8601_MILLIS).to_string(),
                }
            }
        }
    }
}
