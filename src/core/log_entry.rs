//! Log entry structure
//!
//! [`LogEntry`] is the record handed to both the local sink and the remote
//! publish callback. Its shape mirrors the `LogEntry` message exchanged between
//! nodes: a header (stamp, sequence, frame id) followed by level, node name and
//! message text.

use super::error::Result;
use super::log_level::{self, LogLevel};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Source location of a logging statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of the function this is called from
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }

    /// File name without its directory components
    pub fn file_name(&self) -> &str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

impl fmt::Display for Location {
    /// Renders the message prefix form: `[file.rs:42]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.file_name(), self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Wall-clock seconds since the Unix epoch
    pub seconds: u64,
    /// Sub-second part of the stamp, 0..1_000_000
    pub microseconds: u32,
    pub sequence: u64,
    pub node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub header: Header,
    /// Wire level, 0 = DEBUG .. 4 = FATAL
    pub level: i32,
    pub node_name: String,
    pub message: String,
}

impl LogEntry {
    /// Build an entry stamped with the current wall-clock time
    pub fn new(level: LogLevel, node_name: &str, sequence: u64, message: String) -> Self {
        let now = Utc::now();
        Self {
            header: Header {
                seconds: u64::try_from(now.timestamp()).unwrap_or_default(),
                microseconds: now.timestamp_subsec_micros().min(999_999),
                sequence,
                node_id: node_name.to_string(),
            },
            level: level.as_i32(),
            node_name: node_name.to_string(),
            message,
        }
    }

    /// Prefix `message` with the location, as done when location capture is on
    pub fn located_message(location: &Location, message: &str) -> String {
        format!("{} {}", location, message)
    }

    /// Typed level, `None` when the wire value is out of range
    pub fn severity(&self) -> Option<LogLevel> {
        LogLevel::try_from(self.level).ok()
    }

    pub fn level_label(&self) -> &'static str {
        log_level::level_label(self.level)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
