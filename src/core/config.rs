//! Logger configuration
//!
//! [`LoggerConfig`] carries the settings a [`Logger`](super::Logger) starts
//! with. It can be built in code or loaded from JSON, where any missing field
//! takes its default.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Node name used when none is configured
pub const DEFAULT_NODE_NAME: &str = "default";

/// Startup configuration for a logger instance
///
/// # Example
///
/// ```
/// use node_logger::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{ "node_name": "fpga_driver", "min_level": "Warn" }"#)
///     .expect("valid config");
///
/// assert_eq!(config.min_level, LogLevel::Warn);
/// assert!(config.local_output);
/// assert!(!config.remote_output);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Identity stamped into every entry
    pub node_name: String,
    /// Entries below this level are rejected
    pub min_level: LogLevel,
    /// Render entries to the local sink
    pub local_output: bool,
    /// Initial remote output state when the logger is built without a publish
    /// callback; registering a callback later enables remote output regardless
    pub remote_output: bool,
    /// Prefix messages with `[file:line]` when the call site is known
    pub capture_location: bool,
    /// Color the level field of console lines
    pub use_colors: bool,
    /// Clock used for console line stamps
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            node_name: DEFAULT_NODE_NAME.to_string(),
            min_level: LogLevel::default(),
            local_output: true,
            remote_output: false,
            capture_location: false,
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_name.trim().is_empty() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "node_name must not be empty",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_capture_location(mut self, capture: bool) -> Self {
        self.capture_location = capture;
        self
    }
}
