//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;

pub use appender::{Appender, NoopPersistence, OutputStream, PersistenceHook};
pub use config::{Environment, LoggerConfig};
pub use error::{LoggerError, Result};
pub use log_context::{keys, FieldValue, LogContext, SharedContext};
pub use log_entry::{ErrorInfo, LogEntry};
pub use log_level::LogLevel;
pub use logger::{ChildLogger, LogEmitter, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
