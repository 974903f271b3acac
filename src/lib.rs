//! # Client Logger
//!
//! Leveled, structured, contextual logging for client applications.
//!
//! ## Features
//!
//! - **Environment-aware verbosity**: development builds start at `DEBUG`,
//!   everything else at `WARN`
//! - **Structured context**: insertion-ordered key/value fields rendered as JSON
//! - **Child loggers**: bind a context once, have it merged into every record
//! - **Process-wide instance**: one lazily created root shared by all callers
//! - **Never fails**: emission does not return errors or panic
//!
//! ## Example
//!
//! ```
//! use client_logger::prelude::*;
//!
//! let logger = Logger::instance();
//! let jobs = logger.child(LogContext::for_component("JobBoard"));
//!
//! jobs.warn_with_context("slow response", LogContext::new().with_field("ms", 1200));
//! jobs.performance("load_jobs", std::time::Duration::from_millis(85), None);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    pub use crate::core::{
        keys, Appender, ChildLogger, Environment, ErrorInfo, FieldValue, LogContext, LogEmitter,
        LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        OutputFormat, OutputStream, PersistenceHook, Result, SharedContext, TimestampFormat,
    };
}

pub use appenders::{CapturedLine, ConsoleAppender, MemoryAppender};
pub use crate::core::{
    keys, Appender, ChildLogger, Environment, ErrorInfo, FieldValue, LogContext, LogEmitter,
    LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    NoopPersistence, OutputFormat, OutputStream, PersistenceHook, Result, SharedContext,
    TimestampFormat,
};
