//! Logger configuration and execution environment

use super::error::LoggerError;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Execution mode the host application runs in.
///
/// Only used to pick the initial threshold when a root logger is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Test,
    #[default]
    Production,
}

impl Environment {
    /// Environment implied by the build profile: debug builds are
    /// `Development`, release builds `Production`.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    /// Threshold a fresh root logger starts with.
    pub fn default_level(self) -> LogLevel {
        match self {
            Environment::Development => LogLevel::Debug,
            Environment::Test | Environment::Production => LogLevel::Warn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(LoggerError::invalid_environment(s)),
        }
    }
}

/// Snapshot of a root logger's mutable settings.
///
/// The logger keeps one of these behind a single lock, so readers always
/// observe the three fields together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub console_output: bool,
    pub persistence_enabled: bool,
}

impl LoggerConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            min_level: environment.default_level(),
            console_output: true,
            persistence_enabled: false,
        }
    }

    /// Whether a record at `level` passes this configuration's threshold
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level.passes(self.min_level)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}
