//! Console appender implementation

use crate::core::log_level::level_color;
use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use colored::Colorize;
use std::io::{IsTerminal, Write};

/// Render `entry` as one console line without the trailing newline
///
/// Layout: `[HH:MM:SS.uuuuuu] [LEVEL] [node_name] message`. The level is
/// right-aligned to five columns and, when `use_colors` is set, wrapped in a
/// bold per-level color. Every text sink goes through this function.
pub fn format_line(entry: &LogEntry, timestamp_format: &TimestampFormat, use_colors: bool) -> String {
    let stamp = timestamp_format.format_clock(entry.header.seconds, entry.header.microseconds);

    let level = format!("[{:>5}]", entry.level_label());
    let level = if use_colors {
        level.color(level_color(entry.level)).bold().to_string()
    } else {
        level
    };

    format!("[{}] {} [{}] {}", stamp, level, entry.node_name, entry.message)
}

/// Writes formatted entries to standard error
pub struct ConsoleAppender {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    /// Colors are requested by `use_colors` and granted only when stderr is a
    /// terminal, so redirected output stays free of escape codes.
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors: use_colors && std::io::stderr().is_terminal(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Set the clock used for the line stamp
    ///
    /// # Examples
    ///
    /// ```
    /// use node_logger::appenders::ConsoleAppender;
    /// use node_logger::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Utc);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn format(&self, entry: &LogEntry) -> String {
        format_line(entry, &self.timestamp_format, self.use_colors)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format(entry);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line)
            .map_err(|e| LoggerError::io_operation("writing console line", "stderr write failed", e))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
