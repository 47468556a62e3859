//! In-memory appender
//!
//! Keeps formatted console lines in a shared buffer instead of writing them
//! out. Used to observe local output in tests and by embedders that render
//! log panes themselves.

use super::console::format_line;
use crate::core::{Appender, LogEntry, Result, TimestampFormat};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle onto the lines captured by a [`MemoryAppender`]
pub type SharedLines = Arc<Mutex<Vec<String>>>;

/// Captures each entry as an uncolored console line
///
/// # Example
///
/// ```
/// use node_logger::appenders::MemoryAppender;
/// use node_logger::prelude::*;
///
/// let sink = MemoryAppender::new();
/// let lines = sink.lines();
///
/// let logger = Logger::builder().node_name("planner").local_sink(sink).build();
/// logger.warn("replanning");
///
/// assert_eq!(lines.lock().len(), 1);
/// assert!(lines.lock()[0].ends_with("[planner] replanning"));
/// ```
pub struct MemoryAppender {
    lines: SharedLines,
    timestamp_format: TimestampFormat,
    capacity: Option<usize>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            timestamp_format: TimestampFormat::Utc,
            capacity: None,
        }
    }

    /// Keep only the newest `capacity` lines
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Handle to the captured lines, valid after the appender moves into a logger
    pub fn lines(&self) -> SharedLines {
        Arc::clone(&self.lines)
    }
}

impl Default for MemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = format_line(entry, &self.timestamp_format, false);
        let mut lines = self.lines.lock();
        lines.push(line);
        if let Some(capacity) = self.capacity {
            if lines.len() > capacity {
                let excess = lines.len() - capacity;
                lines.drain(..excess);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
