//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry, ordered from least to most severe.
///
/// The numeric values match the `level` field of the wire entry
/// (0 = DEBUG .. 4 = FATAL). `Fatal` is advisory and has no control-flow effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

/// Label used for level values outside the defined range
pub const UNKNOWN_LEVEL: &str = "UNKNOWN";

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Numeric wire value of this level
    #[inline]
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(i32::from(value)).ok()
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Cyan,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => Magenta,
        }
    }

    /// Whether an entry at this level passes a filter set to `min_level`
    #[inline]
    pub fn passes(&self, min_level: LogLevel) -> bool {
        *self >= min_level
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, i32> {
        match value {
            0 => Ok(LogLevel::Debug),
            1 => Ok(LogLevel::Info),
            2 => Ok(LogLevel::Warn),
            3 => Ok(LogLevel::Error),
            4 => Ok(LogLevel::Fatal),
            other => Err(other),
        }
    }
}

/// Display label for a raw wire level, falling back to [`UNKNOWN_LEVEL`]
pub fn level_label(value: i32) -> &'static str {
    LogLevel::try_from(value)
        .map(|level| level.to_str())
        .unwrap_or(UNKNOWN_LEVEL)
}

/// Console color for a raw wire level, white when out of range
pub fn level_color(value: i32) -> colored::Color {
    LogLevel::try_from(value)
        .map(|level| level.color_code())
        .unwrap_or(colored::Color::White)
}
