//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A local sink the logger renders entries into
///
/// The logger calls `append` while holding its lock, so implementations only
/// need interior synchronization if they share state with other owners.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
