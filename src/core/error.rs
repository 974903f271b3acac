//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Errors raised by the fallible, non-emission parts of the crate.
///
/// Emission itself never returns an error; appender failures are contained
/// by the logger and only show up in its metrics.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown log level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Unknown environment name
    #[error("Invalid environment: '{0}'")]
    InvalidEnvironment(String),

    /// The process-wide logger was installed twice
    #[error("Global logger already initialized")]
    AlreadyInitialized,

    /// Appender error with the appender's name
    #[error("Appender '{appender}' failed: {message}")]
    AppenderError { appender: String, message: String },
}

impl LoggerError {
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(name.into())
    }

    pub fn invalid_environment(name: impl Into<String>) -> Self {
        LoggerError::InvalidEnvironment(name.into())
    }

    /// Create an appender error
    pub fn appender(appender: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderError {
            appender: appender.into(),
            message: message.into(),
        }
    }
}
