//! Call-site stream
//!
//! A [`LogStream`] accumulates the text of one logging statement and hands it
//! to its logger exactly once, when the stream is dropped. Whether the stream
//! is active is decided when it is created; appends to an inactive stream
//! cost nothing and a later change of the logger's minimum level does not
//! affect a stream that already exists.

use super::log_entry::Location;
use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt::{self, Write as _};

/// Something that can render itself into a log statement buffer
///
/// Every [`Display`](fmt::Display) type is appendable.
pub trait Appendable {
    fn append_to(&self, buffer: &mut String);
}

impl<T: fmt::Display + ?Sized> Appendable for T {
    fn append_to(&self, buffer: &mut String) {
        // Writing into a String cannot fail.
        let _ = write!(buffer, "{}", self);
    }
}

/// Scoped buffer bound to one logging statement
///
/// Not `Clone`: a stream can be moved but never duplicated, so it flushes
/// at most once.
///
/// # Example
///
/// ```
/// use node_logger::prelude::*;
///
/// let logger = Logger::new("motor_ctrl");
/// logger
///     .stream(LogLevel::Warn)
///     .append("temperature: ")
///     .append(71.5)
///     .append(" C");
/// assert_eq!(logger.sequence(), 1);
/// ```
pub struct LogStream<'a> {
    logger: &'a Logger,
    level: LogLevel,
    location: Option<Location>,
    buffer: String,
    active: bool,
}

impl<'a> LogStream<'a> {
    pub(crate) fn new(logger: &'a Logger, level: LogLevel, location: Option<Location>) -> Self {
        Self {
            logger,
            level,
            location,
            buffer: String::new(),
            active: logger.is_enabled(level),
        }
    }

    /// A stream that never emits
    pub(crate) fn suppressed(logger: &'a Logger, level: LogLevel, location: Option<Location>) -> Self {
        Self {
            logger,
            level,
            location,
            buffer: String::new(),
            active: false,
        }
    }

    /// Append a fragment, consuming and returning the stream for chaining
    pub fn append<T: Appendable>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Append a fragment through a mutable reference
    pub fn push<T: Appendable>(&mut self, value: T) -> &mut Self {
        if self.active {
            value.append_to(&mut self.buffer);
        }
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Drop the stream now instead of at the end of scope
    pub fn finish(self) {}
}

impl fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.active {
            self.buffer.push_str(s);
        }
        Ok(())
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if self.active && !self.buffer.is_empty() {
            self.active = false;
            let message = std::mem::take(&mut self.buffer);
            // Filtering already happened when the stream was created.
            self.logger.dispatch(self.level, message, self.location);
        }
    }
}

impl fmt::Debug for LogStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream")
            .field("level", &self.level)
            .field("location", &self.location)
            .field("active", &self.active)
            .field("buffer", &self.buffer)
            .finish()
    }
}
