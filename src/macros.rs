//! Logging macros for ergonomic log message formatting.
//!
//! Three families:
//!
//! - `log!`, `debug!` .. `fatal!` log through a logger instance with
//!   `println!`-style formatting.
//! - `log_debug!` .. `log_fatal!` log through the process-wide logger and
//!   capture the call site's file and line.
//! - `log_once!`, `log_every_n!`, `log_changed!` and `log_throttle!` rate
//!   limit a statement by its call site.
//!
//! # Examples
//!
//! ```
//! use node_logger::prelude::*;
//! use node_logger::{info, log_every_n};
//!
//! let logger = Logger::new("conveyor");
//!
//! info!(logger, "Belt speed set to {} m/s", 1.5);
//!
//! for item in 0..100 {
//!     log_every_n!(logger, LogLevel::Debug, 25, "processed {} items", item + 1);
//! }
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use node_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use node_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. Does not abort the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Source location of the macro invocation.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(file!(), line!())
    };
}

/// Rate-limiting identity of the macro invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), line!(), column!())
    };
}

/// Open a call-site stream that knows its source location.
///
/// ```
/// # use node_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use node_logger::log_stream;
/// log_stream!(logger, LogLevel::Warn).append("temperature: ").append(71);
/// ```
#[macro_export]
macro_rules! log_stream {
    ($logger:expr, $level:expr) => {
        $logger.stream_at($level, $crate::location!())
    };
}

/// Log through `logger` only when `cond` holds.
#[macro_export]
macro_rules! log_if {
    ($logger:expr, $level:expr, $cond:expr, $($arg:tt)+) => {
        if $cond {
            $crate::log_stream!($logger, $level)
                .append(format_args!($($arg)+))
                .finish();
        }
    };
}

/// Log only the first time this statement is reached.
///
/// ```
/// # use node_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use node_logger::log_once;
/// for _ in 0..3 {
///     log_once!(logger, LogLevel::Warn, "calibration file missing, using defaults");
/// }
/// assert_eq!(logger.sequence(), 1);
/// ```
#[macro_export]
macro_rules! log_once {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        if $crate::rate_limiter().once($crate::call_site!()) {
            $crate::log_stream!($logger, $level)
                .append(format_args!($($arg)+))
                .finish();
        }
    };
}

/// Log on every `n`-th time this statement is reached.
#[macro_export]
macro_rules! log_every_n {
    ($logger:expr, $level:expr, $n:expr, $($arg:tt)+) => {
        if $crate::rate_limiter().every_n($crate::call_site!(), $n) {
            $crate::log_stream!($logger, $level)
                .append(format_args!($($arg)+))
                .finish();
        }
    };
}

/// Log when `cond` becomes true after having been false on the previous reach.
///
/// ```
/// # use node_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use node_logger::log_changed;
/// for voltage in [12.1, 9.7, 9.5, 11.8, 9.9] {
///     log_changed!(logger, LogLevel::Warn, voltage < 10.0, "low voltage: {}", voltage);
/// }
/// assert_eq!(logger.sequence(), 2);
/// ```
#[macro_export]
macro_rules! log_changed {
    ($logger:expr, $level:expr, $cond:expr, $($arg:tt)+) => {
        if $crate::rate_limiter().changed($crate::call_site!(), $cond) {
            $crate::log_stream!($logger, $level)
                .append(format_args!($($arg)+))
                .finish();
        }
    };
}

/// Log at most once per `interval` (a [`std::time::Duration`]).
///
/// The window is consumed as soon as the statement is allowed through, before
/// the message is formatted.
#[macro_export]
macro_rules! log_throttle {
    ($logger:expr, $level:expr, $interval:expr, $($arg:tt)+) => {
        if $crate::rate_limiter().throttle($crate::call_site!(), $interval) {
            $crate::log_stream!($logger, $level)
                .append(format_args!($($arg)+))
                .finish();
        }
    };
}

/// Name the process-wide logger.
#[macro_export]
macro_rules! log_init {
    ($name:expr) => {
        $crate::global::init($name)
    };
}

/// Debug message through the process-wide logger.
///
/// ```
/// use node_logger::log_debug;
/// log_debug!("tick {}", 42);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::log_stream!($crate::global(), $crate::LogLevel::Debug)
            .append(format_args!($($arg)+))
            .finish()
    };
}

/// Info message through the process-wide logger.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::log_stream!($crate::global(), $crate::LogLevel::Info)
            .append(format_args!($($arg)+))
            .finish()
    };
}

/// Warning through the process-wide logger.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::log_stream!($crate::global(), $crate::LogLevel::Warn)
            .append(format_args!($($arg)+))
            .finish()
    };
}

/// Error through the process-wide logger.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::log_stream!($crate::global(), $crate::LogLevel::Error)
            .append(format_args!($($arg)+))
            .finish()
    };
}

/// Fatal message through the process-wide logger. Does not abort the process.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::log_stream!($crate::global(), $crate::LogLevel::Fatal)
            .append(format_args!($($arg)+))
            .finish()
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::memory::SharedLines;
    use crate::appenders::MemoryAppender;
    use crate::core::{LogEntry, Logger, LogLevel};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    fn memory_logger() -> (Logger, SharedLines) {
        let sink = MemoryAppender::new();
        let lines = sink.lines();
        let logger = Logger::builder().node_name("macros").local_sink(sink).build();
        (logger, lines)
    }

    #[test]
    fn test_log_macro() {
        let (logger, lines) = memory_logger();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);

        let lines = lines.lock();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, lines) = memory_logger();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");

        let lines = lines.lock();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("[DEBUG]"));
        assert!(lines[2].contains("[ WARN]"));
        assert!(lines[4].contains("[FATAL]"));
    }

    #[test]
    fn test_stream_macro_location() {
        let logger = Logger::builder().local_output(false).capture_location(true).build();
        let entries = Arc::new(Mutex::new(Vec::new()));
        let entries_clone = Arc::clone(&entries);
        logger.set_publish_callback(Some(Arc::new(move |entry: &LogEntry| {
            entries_clone.lock().push(entry.message.clone());
        })));

        let line = line!() + 1;
        log_stream!(logger, LogLevel::Info).append("here");

        assert_eq!(entries.lock()[0], format!("[macros.rs:{}] here", line));
    }

    #[test]
    fn test_log_if() {
        let (logger, lines) = memory_logger();
        for i in 0..4 {
            log_if!(logger, LogLevel::Info, i % 2 == 0, "even {}", i);
        }
        assert_eq!(lines.lock().len(), 2);
    }

    #[test]
    fn test_log_once_per_call_site() {
        let (logger, lines) = memory_logger();
        for _ in 0..5 {
            log_once!(logger, LogLevel::Warn, "first only");
            log_once!(logger, LogLevel::Warn, "second site");
        }

        let lines = lines.lock();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first only"));
        assert!(lines[1].ends_with("second site"));
    }

    #[test]
    fn test_log_every_n() {
        let (logger, lines) = memory_logger();
        for reach in 1..=7 {
            log_every_n!(logger, LogLevel::Info, 3, "reach {}", reach);
        }

        let lines = lines.lock();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("reach 3"));
        assert!(lines[1].ends_with("reach 6"));
    }

    #[test]
    fn test_log_changed() {
        let (logger, lines) = memory_logger();
        for (reach, cond) in [false, true, true, false, true].into_iter().enumerate() {
            log_changed!(logger, LogLevel::Warn, cond, "reach {}", reach + 1);
        }

        let lines = lines.lock();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("reach 2"));
        assert!(lines[1].ends_with("reach 5"));
    }

    #[test]
    fn test_log_throttle() {
        let (logger, lines) = memory_logger();
        for _ in 0..10 {
            log_throttle!(logger, LogLevel::Info, Duration::from_secs(3600), "once an hour");
        }
        assert_eq!(lines.lock().len(), 1);
    }

    #[test]
    fn test_log_throttle_empty_message_consumes_window() {
        let (logger, lines) = memory_logger();
        for body in ["", "reach 1", "reach 2"] {
            log_throttle!(logger, LogLevel::Info, Duration::from_secs(3600), "{}", body);
        }

        assert!(lines.lock().is_empty());
        assert_eq!(logger.sequence(), 0);
    }

    #[test]
    fn test_rate_limit_state_shared_across_loggers() {
        let (first, first_lines) = memory_logger();
        let (second, second_lines) = memory_logger();

        for logger in [&first, &second, &first] {
            log_once!(logger, LogLevel::Info, "shared site");
        }

        assert_eq!(first_lines.lock().len(), 1);
        assert!(second_lines.lock().is_empty());
    }

    #[test]
    fn test_filtered_rate_limited_statement_still_consumes_state() {
        let (logger, lines) = memory_logger();
        logger.set_min_level(LogLevel::Error);
        for i in 0..2 {
            if i == 1 {
                logger.set_min_level(LogLevel::Debug);
            }
            log_once!(logger, LogLevel::Info, "filtered on first reach");
        }
        assert!(lines.lock().is_empty());
    }
}
