//! Root logger, the process-wide instance, and child loggers
//!
//! A [`Logger`] owns the configuration snapshot (threshold and output
//! toggles), the console appender and the persistence hook. Cloning a
//! `Logger` yields another handle to the same state. [`Logger::instance`]
//! exposes one such root as the process-wide singleton.
//!
//! [`ChildLogger`]s share the root's state and add a bound context to every
//! record. They never hold configuration of their own.

use super::{
    appender::{Appender, NoopPersistence, PersistenceHook},
    config::{Environment, LoggerConfig},
    error::{LoggerError, Result},
    log_context::{keys, FieldValue, LogContext},
    log_entry::{ErrorInfo, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use crate::appenders::ConsoleAppender;
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

static GLOBAL_LOGGER: OnceCell<Logger> = OnceCell::new();

struct LoggerInner {
    config: RwLock<LoggerConfig>,
    console: Mutex<Box<dyn Appender>>,
    persistence: Box<dyn PersistenceHook>,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
    metrics: LoggerMetrics,
}

impl LoggerInner {
    #[inline]
    fn config(&self) -> LoggerConfig {
        *self.config.read()
    }

    fn emit(
        &self,
        level: LogLevel,
        message: String,
        mut context: Option<LogContext>,
        error: Option<ErrorInfo>,
    ) {
        let config = self.config();
        if !config.allows(level) {
            return;
        }

        let mut stack_trace = None;
        if let Some(error) = error {
            context
                .get_or_insert_with(LogContext::new)
                .add_field(keys::ERROR, error.message);
            stack_trace = error.stack;
        }

        let entry = LogEntry::new(level, message)
            .with_context(context)
            .with_stack_trace(stack_trace);
        self.metrics.record_logged();

        if config.console_output {
            self.write_console(&entry);
        }
        if config.persistence_enabled {
            self.persist(&entry);
        }
    }

    /// Format and hand the entry to the console appender, containing any
    /// error or panic it raises.
    fn write_console(&self, entry: &LogEntry) {
        let mut console = self.console.lock();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let line = self.output_format.format(entry, &self.timestamp_format);
            console.append(entry, &line)
        }));

        if !matches!(result, Ok(Ok(()))) {
            self.metrics.record_write_failure();
        }
    }

    fn persist(&self, entry: &LogEntry) {
        let result = catch_unwind(AssertUnwindSafe(|| self.persistence.persist(entry)));
        if result.is_err() {
            self.metrics.record_write_failure();
        }
    }
}

/// Emission API shared by root and child loggers.
///
/// Implementors provide [`emit`](LogEmitter::emit); every other emission
/// method is sugar over it. No method here fails or panics.
pub trait LogEmitter {
    /// Run one record through the filter, format and output pipeline.
    fn emit(
        &self,
        level: LogLevel,
        message: String,
        context: Option<LogContext>,
        error: Option<ErrorInfo>,
    );

    /// Whether a record at `level` would currently be emitted.
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Derive a logger that merges `context` into every record it emits.
    fn child(&self, context: LogContext) -> ChildLogger;

    #[inline]
    fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(level, message.into(), None, None);
    }

    /// Log with structured context fields
    #[inline]
    fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        self.emit(level, message.into(), Some(context), None);
    }

    #[inline]
    fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    fn debug_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Debug, message, context);
    }

    #[inline]
    fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    #[inline]
    fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    fn warn_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Warn, message, context);
    }

    #[inline]
    fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }

    /// Error-level record with optional error details.
    ///
    /// The error's message lands in the context under the reserved
    /// [`keys::ERROR`] key, overriding a caller field of the same name.
    /// Its stack is written next to the line, not inside it.
    fn error_with(
        &self,
        message: impl Into<String>,
        error: Option<ErrorInfo>,
        context: Option<LogContext>,
    ) {
        self.emit(LogLevel::Error, message.into(), context, error);
    }

    /// Info record tagged `category: "auth"`
    fn auth(&self, message: impl Into<String>, context: Option<LogContext>) {
        self.info_with_context(message, tagged(context, keys::CATEGORY, "auth"));
    }

    /// Info record tagged `category: "api"`
    fn api(&self, message: impl Into<String>, context: Option<LogContext>) {
        self.info_with_context(message, tagged(context, keys::CATEGORY, "api"));
    }

    /// Info record describing how long `operation` took.
    ///
    /// `duration` is recorded in milliseconds, as an integer when whole.
    fn performance(
        &self,
        operation: impl Into<String>,
        duration: Duration,
        context: Option<LogContext>,
    ) {
        let operation = operation.into();
        let millis = duration_millis(duration);
        let message = format!("{} completed in {}ms", operation, millis);

        let mut context = context.unwrap_or_default();
        context.add_field(keys::CATEGORY, "performance");
        context.add_field(keys::OPERATION, operation);
        context.add_field(keys::DURATION, millis);
        self.info_with_context(message, context);
    }

    /// Debug record tagged with the emitting component
    fn component(
        &self,
        component_name: impl Into<String>,
        message: impl Into<String>,
        context: Option<LogContext>,
    ) {
        self.debug_with_context(
            message,
            tagged(context, keys::COMPONENT, component_name.into()),
        );
    }
}

fn tagged(context: Option<LogContext>, key: &str, value: impl Into<FieldValue>) -> LogContext {
    let mut context = context.unwrap_or_default();
    context.add_field(key, value);
    context
}

fn duration_millis(duration: Duration) -> FieldValue {
    let fractional = duration.as_nanos() as f64 / 1_000_000.0;
    if duration.subsec_nanos() % 1_000_000 == 0 {
        i64::try_from(duration.as_millis())
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Float(fractional))
    } else {
        FieldValue::Float(fractional)
    }
}

/// Root logger
///
/// # Example
///
/// ```
/// use client_logger::prelude::*;
///
/// let sink = MemoryAppender::new();
/// let logger = Logger::builder()
///     .environment(Environment::Production)
///     .console_appender(sink.clone())
///     .build();
///
/// logger.info("hidden");                 // below WARN
/// logger.warn("disk almost full");
/// assert_eq!(sink.len(), 1);
///
/// logger.set_log_level(LogLevel::Debug);
/// logger.debug("now visible");
/// assert_eq!(sink.len(), 2);
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Root logger with the defaults of `environment`, writing to the console
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self::builder().environment(environment).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The process-wide logger, created on first access.
    ///
    /// When nothing was installed with [`Logger::init`] beforehand, the
    /// instance is built for [`Environment::current`].
    pub fn instance() -> &'static Logger {
        GLOBAL_LOGGER.get_or_init(|| Logger::new(Environment::current()))
    }

    /// The process-wide logger if it already exists
    pub fn try_instance() -> Option<&'static Logger> {
        GLOBAL_LOGGER.get()
    }

    /// Install `logger` as the process-wide instance.
    ///
    /// Fails with [`LoggerError::AlreadyInitialized`] if an instance exists,
    /// whether it was installed or created implicitly by [`Logger::instance`].
    pub fn init(logger: Logger) -> Result<&'static Logger> {
        GLOBAL_LOGGER
            .set(logger)
            .map_err(|_| LoggerError::AlreadyInitialized)?;
        Ok(Self::instance())
    }

    /// Whether both handles refer to the same root state
    pub fn same_as(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Replace the threshold. Takes effect for the next emission, including
    /// emissions through existing child loggers.
    pub fn set_log_level(&self, level: LogLevel) {
        self.inner.config.write().min_level = level;
    }

    pub fn enable_console_output(&self, enabled: bool) {
        self.inner.config.write().console_output = enabled;
    }

    /// Toggle the persistence hook. With the default [`NoopPersistence`]
    /// this stores nothing.
    pub fn set_persistence_enabled(&self, enabled: bool) {
        self.inner.config.write().persistence_enabled = enabled;
    }

    pub fn log_level(&self) -> LogLevel {
        self.inner.config().min_level
    }

    pub fn is_console_output_enabled(&self) -> bool {
        self.inner.config().console_output
    }

    pub fn is_persistence_enabled(&self) -> bool {
        self.inner.config().persistence_enabled
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.inner.config()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.console.lock().flush()
    }
}

impl LogEmitter for Logger {
    fn emit(
        &self,
        level: LogLevel,
        message: String,
        context: Option<LogContext>,
        error: Option<ErrorInfo>,
    ) {
        self.inner.emit(level, message, context, error);
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        self.inner.config().allows(level)
    }

    fn child(&self, context: LogContext) -> ChildLogger {
        ChildLogger {
            root: Arc::clone(&self.inner),
            bound: Arc::new(context),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.inner.config())
            .field("output_format", &self.inner.output_format)
            .finish_non_exhaustive()
    }
}

/// Logger bound to a fixed context fragment.
///
/// Records emitted through a child carry `bound ⊕ call-site` context, with
/// call-site fields winning. Deriving from a child merges the fragments
/// root-to-leaf up front, so a grandchild behaves as if each ancestor's
/// fragment were applied in turn.
#[derive(Clone)]
pub struct ChildLogger {
    root: Arc<LoggerInner>,
    bound: Arc<LogContext>,
}

impl ChildLogger {
    /// Effective context this child adds to every record
    pub fn bound_context(&self) -> &LogContext {
        &self.bound
    }
}

impl LogEmitter for ChildLogger {
    fn emit(
        &self,
        level: LogLevel,
        message: String,
        context: Option<LogContext>,
        error: Option<ErrorInfo>,
    ) {
        // Skip the merge for calls the root would drop anyway
        if !self.is_enabled(level) {
            return;
        }

        let context = match context {
            Some(call_site) => self.bound.merged(&call_site),
            None => LogContext::clone(&self.bound),
        };
        self.root.emit(level, message, Some(context), error);
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        self.root.config().allows(level)
    }

    fn child(&self, context: LogContext) -> ChildLogger {
        ChildLogger {
            root: Arc::clone(&self.root),
            bound: Arc::new(self.bound.merged(&context)),
        }
    }
}

impl fmt::Debug for ChildLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildLogger")
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use client_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .environment(Environment::Development)
///     .timestamp_format(TimestampFormat::Iso8601Micros)
///     .output_format(OutputFormat::Json)
///     .build();
///
/// assert_eq!(logger.log_level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Box<dyn Appender>,
    persistence: Box<dyn PersistenceHook>,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
}

impl LoggerBuilder {
    /// Create a new builder with the defaults of [`Environment::current`]
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::for_environment(Environment::current()),
            console: Box::new(ConsoleAppender::new()),
            persistence: Box::new(NoopPersistence),
            output_format: OutputFormat::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Take the threshold from the environment's default
    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.min_level = environment.default_level();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_output(mut self, enabled: bool) -> Self {
        self.config.console_output = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn persistence_enabled(mut self, enabled: bool) -> Self {
        self.config.persistence_enabled = enabled;
        self
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the console appender, e.g. with a [`MemoryAppender`] in tests
    ///
    /// [`MemoryAppender`]: crate::appenders::MemoryAppender
    #[must_use = "builder methods return a new value"]
    pub fn console_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.console = Box::new(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn persistence_hook<H: PersistenceHook + 'static>(mut self, hook: H) -> Self {
        self.persistence = Box::new(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            inner: Arc::new(LoggerInner {
                config: RwLock::new(self.config),
                console: Mutex::new(self.console),
                persistence: self.persistence,
                output_format: self.output_format,
                timestamp_format: self.timestamp_format,
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    /// Build the Logger and install it as the process-wide instance
    pub fn install(self) -> Result<&'static Logger> {
        Logger::init(self.build())
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
