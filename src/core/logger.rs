//! Main logger implementation

use super::{
    appender::Appender,
    config::{LoggerConfig, DEFAULT_NODE_NAME},
    error::Result,
    log_entry::{Location, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    publish::{PublishCallback, RemoteSink},
    stream::LogStream,
    timestamp::TimestampFormat,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};

/// Everything guarded by the logger's lock
struct LoggerState {
    node_name: String,
    local_output: bool,
    remote_output: bool,
    capture_location: bool,
    /// Sequence number the next emitted entry will carry
    sequence: u64,
    local_sink: Box<dyn Appender>,
    remote_sink: RemoteSink,
}

/// Leveled, thread-safe logger owned by one node
///
/// All emission is synchronous: an entry that passes the severity filter is
/// built, rendered to the local sink and handed to the publish callback on the
/// calling thread, under one lock per instance. Entries from one instance are
/// therefore totally ordered, and a slow publish callback stalls every thread
/// logging through that instance.
pub struct Logger {
    /// Written under `state`'s lock, read lock-free by the filter fast path
    min_level: AtomicU8,
    state: Mutex<LoggerState>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing colored lines to the console, remote output off
    #[must_use]
    pub fn new(node_name: impl Into<String>) -> Self {
        Self::builder().node_name(node_name).build()
    }

    /// Logger with a publish callback registered, which enables remote output
    #[must_use]
    pub fn with_publish_callback(node_name: impl Into<String>, callback: PublishCallback) -> Self {
        Self::builder()
            .node_name(node_name)
            .publish_callback(callback)
            .build()
    }

    /// Logger configured from a [`LoggerConfig`], writing to the console
    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    fn from_parts(
        config: LoggerConfig,
        local_sink: Box<dyn Appender>,
        remote_output: bool,
        callback: Option<PublishCallback>,
    ) -> Self {
        Self {
            min_level: AtomicU8::new(config.min_level as u8),
            state: Mutex::new(LoggerState {
                node_name: config.node_name,
                local_output: config.local_output,
                remote_output,
                capture_location: config.capture_location,
                sequence: 0,
                local_sink,
                remote_sink: RemoteSink::new(callback),
            }),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn set_min_level(&self, level: LogLevel) {
        let _state = self.state.lock();
        self.min_level.store(level as u8, Ordering::Release);
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Whether an entry at `level` would pass the severity filter right now
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.min_level())
    }

    pub fn set_local_output(&self, enabled: bool) {
        self.state.lock().local_output = enabled;
    }

    pub fn is_local_output_enabled(&self) -> bool {
        self.state.lock().local_output
    }

    pub fn set_remote_output(&self, enabled: bool) {
        self.state.lock().remote_output = enabled;
    }

    pub fn is_remote_output_enabled(&self) -> bool {
        self.state.lock().remote_output
    }

    /// Replace the publish callback
    ///
    /// Registering a callback enables remote output; passing `None` removes the
    /// current one and disables remote output.
    pub fn set_publish_callback(&self, callback: Option<PublishCallback>) {
        let mut state = self.state.lock();
        state.remote_output = callback.is_some();
        state.remote_sink.replace(callback);
    }

    pub fn has_publish_callback(&self) -> bool {
        self.state.lock().remote_sink.is_registered()
    }

    /// Replace the local sink, flushing the previous one
    pub fn set_local_sink(&self, sink: Box<dyn Appender>) {
        let mut state = self.state.lock();
        let mut previous = std::mem::replace(&mut state.local_sink, sink);
        if let Err(e) = previous.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush replaced sink '{}': {}",
                previous.name(),
                e
            );
        }
    }

    /// Prefix messages with `[file:line]` when the call site is known
    pub fn set_capture_location(&self, capture: bool) {
        self.state.lock().capture_location = capture;
    }

    pub fn node_name(&self) -> String {
        self.state.lock().node_name.clone()
    }

    pub(crate) fn set_node_name(&self, node_name: impl Into<String>) {
        self.state.lock().node_name = node_name.into();
    }

    /// Number of entries emitted so far, which is also the sequence number the
    /// next entry will carry
    pub fn sequence(&self) -> u64 {
        self.state.lock().sequence
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use node_logger::prelude::*;
    ///
    /// let logger = Logger::builder().local_output(false).build();
    /// logger.info("one");
    /// assert_eq!(logger.metrics().total_emitted(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_located(level, message, None);
    }

    /// Log with the call site attached; the `[file:line]` prefix is added only
    /// when location capture is enabled
    pub fn log_at(&self, level: LogLevel, message: impl Into<String>, location: Location) {
        self.log_located(level, message, Some(location));
    }

    fn log_located(&self, level: LogLevel, message: impl Into<String>, location: Option<Location>) {
        if !self.is_enabled(level) {
            return;
        }
        self.dispatch(level, message.into(), location);
    }

    /// Build and deliver one entry; the caller has already applied the filter
    pub(crate) fn dispatch(&self, level: LogLevel, message: String, location: Option<Location>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let message = match location {
            Some(ref location) if state.capture_location => {
                LogEntry::located_message(location, &message)
            }
            _ => message,
        };

        let entry = LogEntry::new(level, &state.node_name, state.sequence, message);
        state.sequence = state.sequence.wrapping_add(1);
        self.metrics.record_emitted();

        if state.local_output {
            if let Err(e) = state.local_sink.append(&entry) {
                self.metrics.record_sink_failure();
                eprintln!(
                    "[LOGGER ERROR] Local sink '{}' failed: {}",
                    state.local_sink.name(),
                    e
                );
            }
        }

        if state.remote_output && state.remote_sink.publish(&entry) {
            self.metrics.record_published();
        }
    }

    /// Open a call-site stream at `level`
    pub fn stream(&self, level: LogLevel) -> LogStream<'_> {
        LogStream::new(self, level, None)
    }

    /// Open a call-site stream that knows its source location
    pub fn stream_at(&self, level: LogLevel, location: Location) -> LogStream<'_> {
        LogStream::new(self, level, Some(location))
    }

    /// Open a stream that is inactive unless `condition` holds
    pub fn stream_if(&self, condition: bool, level: LogLevel) -> LogStream<'_> {
        if condition {
            LogStream::new(self, level, None)
        } else {
            LogStream::suppressed(self, level, None)
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.state.lock().local_sink.flush()
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Err(e) = state.local_sink.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("node_name", &state.node_name)
            .field("min_level", &self.min_level())
            .field("local_output", &state.local_output)
            .field("remote_output", &state.remote_output)
            .field("sequence", &state.sequence)
            .field("local_sink", &state.local_sink.name())
            .field("remote_sink", &state.remote_sink)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use node_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .node_name("fpga_driver")
///     .min_level(LogLevel::Info)
///     .appender(ConsoleAppender::with_colors(false))
///     .publish_callback(Arc::new(|entry: &LogEntry| {
///         // hand the entry to a publisher here
///         let _ = entry.header.sequence;
///     }))
///     .build();
///
/// assert!(logger.is_remote_output_enabled());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    local_sink: Option<Box<dyn Appender>>,
    publish_callback: Option<PublishCallback>,
    remote_output: Option<bool>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            local_sink: None,
            publish_callback: None,
            remote_output: None,
        }
    }

    /// Start from a complete configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn node_name(mut self, node_name: impl Into<String>) -> Self {
        self.config.node_name = node_name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn local_output(mut self, enabled: bool) -> Self {
        self.config.local_output = enabled;
        self
    }

    /// Force remote output on or off
    ///
    /// If not called, remote output is enabled exactly when a publish callback
    /// is registered.
    #[must_use = "builder methods return a new value"]
    pub fn remote_output(mut self, enabled: bool) -> Self {
        self.remote_output = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn capture_location(mut self, capture: bool) -> Self {
        self.config.capture_location = capture;
        self
    }

    /// Colors for the default console sink
    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    /// Timestamp clock for the default console sink
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Use `appender` as the local sink instead of the console
    #[must_use = "builder methods return a new value"]
    pub fn local_sink<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.local_sink = Some(Box::new(appender));
        self
    }

    /// Alias of [`local_sink`](Self::local_sink)
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(self, appender: A) -> Self {
        self.local_sink(appender)
    }

    #[must_use = "builder methods return a new value"]
    pub fn publish_callback(mut self, callback: PublishCallback) -> Self {
        self.publish_callback = Some(callback);
        self
    }

    /// Build the Logger
    ///
    /// An invalid configuration is reported on stderr; a blank node name is
    /// replaced by [`DEFAULT_NODE_NAME`].
    pub fn build(mut self) -> Logger {
        if let Err(e) = self.config.validate() {
            eprintln!("[LOGGER ERROR] {}; using node name '{}'", e, DEFAULT_NODE_NAME);
            self.config.node_name = DEFAULT_NODE_NAME.to_string();
        }

        let remote_output = self
            .remote_output
            .unwrap_or(self.publish_callback.is_some() || self.config.remote_output);

        let local_sink = self.local_sink.unwrap_or_else(|| {
            Box::new(
                ConsoleAppender::with_colors(self.config.use_colors)
                    .with_timestamp_format(self.config.timestamp_format),
            )
        });

        Logger::from_parts(self.config, local_sink, remote_output, self.publish_callback)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
