//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::backtrace::Backtrace;

/// One record produced by an emission call.
///
/// Entries are built only after the level filter passed and are not
/// modified once handed to appenders.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<LogContext>,
    /// Trace of the error passed to `error_with`, written next to the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a record always renders as a single line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
            context: None,
            stack_trace: None,
        }
    }

    pub fn with_context(mut self, context: Option<LogContext>) -> Self {
        self.context = context;
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: Option<String>) -> Self {
        self.stack_trace = stack_trace;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Context to render, `None` when absent or empty
    pub fn visible_context(&self) -> Option<&LogContext> {
        self.context.as_ref().filter(|context| !context.is_empty())
    }
}

/// Error details attached to an error-level record.
///
/// The message is merged into the record context under the reserved
/// `error` key; the stack stays on the record and is written separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture the error's display text and its chain of sources.
    ///
    /// ```
    /// use client_logger::ErrorInfo;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    /// let info = ErrorInfo::from_error(&io);
    /// assert_eq!(info.message, "boom");
    /// assert!(info.stack.is_none());
    /// ```
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(format!("Caused by: {}", cause));
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            stack: (!causes.is_empty()).then(|| causes.join("\n")),
        }
    }

    /// Append a backtrace of the current thread to the stack.
    ///
    /// Capturing is expensive; call it only on paths where the trace matters.
    #[must_use]
    pub fn with_backtrace(mut self) -> Self {
        let backtrace = Backtrace::force_capture().to_string();
        self.stack = Some(match self.stack.take() {
            Some(stack) => format!("{}\n{}", stack, backtrace),
            None => backtrace,
        });
        self
    }
}

impl<E: std::error::Error + ?Sized> From<&E> for ErrorInfo {
    fn from(error: &E) -> Self {
        ErrorInfo::from_error(error)
    }
}
