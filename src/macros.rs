//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They work with
//! any [`LogEmitter`](crate::LogEmitter), root or child.
//!
//! # Examples
//!
//! ```
//! use client_logger::prelude::*;
//! use client_logger::{context, info};
//!
//! let logger = Logger::new(Environment::Development);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let user_id = 42;
//! info!(logger, "User {} signed in", user_id);
//!
//! // Building a context
//! let ctx = context! { "userId" => user_id, "action" => "login" };
//! logger.auth("login succeeded", Some(ctx));
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use client_logger::prelude::*;
/// # let logger = Logger::new(Environment::Production);
/// use client_logger::log;
/// log!(logger, LogLevel::Warn, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::LogEmitter as _;
        $logger.log($level, format!($($arg)+))
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use client_logger::prelude::*;
/// # let logger = Logger::new(Environment::Production);
/// use client_logger::error;
/// error!(logger, "Failed to load jobs");
/// error!(logger, "Status {} from {}", 503, "/api/jobs");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Build a [`LogContext`](crate::LogContext) from `key => value` pairs.
///
/// ```
/// use client_logger::context;
///
/// let ctx = context! { "page" => "jobs", "count" => 3 };
/// assert_eq!(ctx.to_json_string(), r#"{"page":"jobs","count":3}"#);
/// assert!(context! {}.is_empty());
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::LogContext::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut context = $crate::LogContext::new();
        $( context.add_field($key, $value); )+
        context
    }};
}
