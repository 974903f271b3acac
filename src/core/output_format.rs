//! Output format configuration for log entries
//!
//! Provides different output formats for log entries:
//! - Text: Human-readable single line (default)
//! - Json: One JSON object per line

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;

/// Separator between the message and the serialized context in text lines
pub const CONTEXT_SEPARATOR: &str = " | ";

/// Output format for log entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] Request processed | {"userId":42}`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"INFO","message":"Request processed"}`
    Json,
}

impl OutputFormat {
    /// Format a log entry according to this output format
    ///
    /// The stack trace of an entry is never part of the line; appenders
    /// write it separately.
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format),
            OutputFormat::Json => self.format_json(entry, timestamp_format),
        }
    }

    /// Format as human-readable text
    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let base = format!(
            "[{}] [{:5}] {}",
            timestamp_format.format(&entry.timestamp),
            entry.level,
            entry.message
        );

        match entry.visible_context() {
            Some(context) => format!("{}{}{}", base, CONTEXT_SEPARATOR, context.to_json_string()),
            None => base,
        }
    }

    /// Format as JSON
    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(timestamp_format.format(&entry.timestamp)),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        if let Some(context) = entry.visible_context() {
            json_obj.insert("context".to_string(), context.to_json_value());
        }

        or_text_line(
            serde_json::to_string(&serde_json::Value::Object(json_obj)),
            || self.format_text(entry, timestamp_format),
        )
    }
}

/// A JSON line that failed to encode is replaced by the text line, so the
/// record still reaches the appender.
fn or_text_line(encoded: serde_json::Result<String>, text: impl FnOnce() -> String) -> String {
    encoded.unwrap_or_else(|_| text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogContext, LogLevel};
    use chrono::TimeZone;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        LogEntry::new(level, message).with_timestamp(timestamp)
    }

    #[test]
    fn test_text_format() {
        let result = OutputFormat::Text.format(&entry(LogLevel::Info, "Test message"), &TimestampFormat::Iso8601);
        assert_eq!(result, "[2025-01-08T10:30:45.000Z] [INFO ] Test message");
    }

    #[test]
    fn test_text_format_with_context() {
        let context = LogContext::new()
            .with_field("userId", 123)
            .with_field("action", "login");

        let entry = entry(LogLevel::Warn, "User logged in").with_context(Some(context));
        let result = OutputFormat::Text.format(&entry, &TimestampFormat::Iso8601);

        assert_eq!(
            result,
            r#"[2025-01-08T10:30:45.000Z] [WARN ] User logged in | {"userId":123,"action":"login"}"#
        );
    }

    #[test]
    fn test_text_format_empty_context_has_no_segment() {
        let entry = entry(LogLevel::Debug, "quiet").with_context(Some(LogContext::new()));
        let result = OutputFormat::Text.format(&entry, &TimestampFormat::Iso8601);
        assert!(!result.contains(CONTEXT_SEPARATOR));
    }

    #[test]
    fn test_text_format_excludes_stack_trace() {
        let entry = entry(LogLevel::Error, "failed").with_stack_trace(Some("at frame 1".into()));
        let result = OutputFormat::Text.format(&entry, &TimestampFormat::Iso8601);
        assert!(!result.contains("frame"));
    }

    #[test]
    fn test_json_format() {
        let context = LogContext::new().with_field("request_id", "abc-123");
        let entry = entry(LogLevel::Error, "Error occurred").with_context(Some(context));
        let result = OutputFormat::Json.format(&entry, &TimestampFormat::Iso8601);

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["timestamp"], "2025-01-08T10:30:45.000Z");
        assert_eq!(parsed["context"]["request_id"], "abc-123");
    }

    #[test]
    fn test_json_format_without_context() {
        let result = OutputFormat::Json.format(&entry(LogLevel::Info, "plain"), &TimestampFormat::Iso8601);
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed.get("context").is_none());
    }

    #[test]
    fn test_json_encoding_failure_falls_back_to_text() {
        let entry = entry(LogLevel::Warn, "slow")
            .with_context(Some(LogContext::new().with_field("ms", 900)));
        let failed = serde_json::from_str::<serde_json::Value>("{").map(|_| String::new());

        let line = or_text_line(failed, || {
            OutputFormat::Text.format(&entry, &TimestampFormat::Iso8601)
        });
        assert_eq!(line, r#"[2025-01-08T10:30:45.000Z] [WARN ] slow | {"ms":900}"#);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
