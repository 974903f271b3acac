//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};

/// Standard stream a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    /// `Error` and `Warn` go to stderr, everything else to stdout.
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Error | LogLevel::Warn => OutputStream::Stderr,
            _ => OutputStream::Stdout,
        }
    }
}

/// Destination for formatted records.
///
/// `line` is the already formatted record. When `entry.stack_trace` is set,
/// an appender writes it after the line, as its own output.
///
/// Appenders must not log through the logger that owns them.
///
/// Errors and panics from `append` are contained by the logger and counted
/// in `write_failures`. A panic still runs the process panic hook, which by
/// default prints to stderr even while console output is disabled; hosts
/// that need silence install their own hook with [`std::panic::set_hook`].
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Extension point for durable storage of records.
///
/// Invoked once per emitted record while persistence is enabled. An
/// implementation must return promptly. Panics are contained by the logger
/// and counted in `write_failures`, but the process panic hook still runs
/// and by default prints to stderr.
pub trait PersistenceHook: Send + Sync {
    fn persist(&self, entry: &LogEntry);
}

/// Default persistence hook. No storage backend exists yet, so enabling
/// persistence keeps call sites working without storing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

impl PersistenceHook for NoopPersistence {
    fn persist(&self, _entry: &LogEntry) {}
}
