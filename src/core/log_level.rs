//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from most to least verbose.
///
/// `Off` sorts above every severity, so using it as a threshold suppresses
/// all output. A record carrying `Off` as its own level is never emitted.
///
/// Serialized with the same upper-case names as the output lines; lower-case
/// names are accepted when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[serde(alias = "debug")]
    Debug = 0,
    #[default]
    #[serde(alias = "info")]
    Info = 1,
    #[serde(alias = "warn")]
    Warn = 2,
    #[serde(alias = "error")]
    Error = 3,
    #[serde(alias = "off")]
    Off = 4,
}

impl LogLevel {
    /// Every level in ascending order.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }

    /// Whether a record at this level passes the given threshold.
    #[inline]
    pub fn passes(self, threshold: LogLevel) -> bool {
        self != LogLevel::Off && self >= threshold
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Off => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "OFF" | "NONE" => Ok(LogLevel::Off),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
