//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod global;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod publish;
pub mod rate_limit;
pub mod stream;
pub mod timestamp;

pub use appender::Appender;
pub use config::{LoggerConfig, DEFAULT_NODE_NAME};
pub use error::{LoggerError, Result};
pub use global::global;
pub use log_entry::{Header, Location, LogEntry};
pub use log_level::{level_color, level_label, LogLevel, UNKNOWN_LEVEL};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use publish::{PublishCallback, RemoteSink};
pub use rate_limit::{rate_limiter, CallSite, RateLimitMetrics, RateLimiter};
pub use stream::{Appendable, LogStream};
pub use timestamp::TimestampFormat;
