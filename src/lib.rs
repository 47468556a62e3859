//! # Node Logger
//!
//! Leveled, thread-safe logging for the nodes of a distributed control system.
//!
//! Every emitted message becomes a [`LogEntry`] stamped with wall-clock time,
//! a per-logger sequence number and the node's name. The entry is written to a
//! local sink (the colored console by default) and handed to a publish
//! callback that forwards it to the rest of the system.
//!
//! ## Features
//!
//! - **Severity filter**: a minimum level checked without taking a lock
//! - **Call-site streams**: build a message from fragments, emitted once on drop
//! - **Rate limiting**: once, every N, on change, and throttled statements
//! - **Process-wide logger**: `log_info!` and friends with `[file:line]` prefixes
//!
//! ## Example
//!
//! ```
//! use node_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .node_name("gripper")
//!     .min_level(LogLevel::Info)
//!     .publish_callback(Arc::new(|entry: &LogEntry| {
//!         let _json = entry.to_json();
//!     }))
//!     .build();
//!
//! logger.debug("filtered out");
//! logger.warn("grip force above limit");
//! assert_eq!(logger.sequence(), 1);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, JsonAppender, MemoryAppender};
    pub use crate::core::{
        Appendable, Appender, CallSite, Location, LogEntry, LogLevel, LogStream, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, PublishCallback, RateLimiter,
        Result, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, JsonAppender, MemoryAppender};
pub use core::{
    global, level_color, level_label, rate_limiter, Appendable, Appender, CallSite, Header,
    Location, LogEntry, LogLevel, LogStream, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, PublishCallback, RateLimitMetrics, RateLimiter, RemoteSink, Result,
    TimestampFormat, DEFAULT_NODE_NAME, UNKNOWN_LEVEL,
};
