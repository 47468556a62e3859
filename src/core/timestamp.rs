//! Timestamp formatting utilities
//!
//! Console lines carry a wall-clock stamp of the form `HH:MM:SS.uuuuuu`.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Time zone used when rendering the clock part of a console line
///
/// # Examples
///
/// ```
/// use node_logger::TimestampFormat;
///
/// // 1970-01-01T01:02:03.000042Z
/// let stamp = TimestampFormat::Utc.format_clock(3723, 42);
/// assert_eq!(stamp, "01:02:03.000042");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time of the host
    #[default]
    Local,

    /// Coordinated universal time
    Utc,
}

impl TimestampFormat {
    /// Render `seconds`/`microseconds` since the epoch as `HH:MM:SS.uuuuuu`
    #[must_use]
    pub fn format_clock(&self, seconds: u64, microseconds: u32) -> String {
        let datetime = i64::try_from(seconds)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_default();

        let clock = match self {
            TimestampFormat::Local => datetime.with_timezone(&Local).format("%H:%M:%S"),
            TimestampFormat::Utc => datetime.format("%H:%M:%S"),
        };

        format!("{}.{:06}", clock, microseconds)
    }
}
