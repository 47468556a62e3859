//! Call-site rate limiting
//!
//! Four policies decide whether a logging statement emits on a given reach:
//!
//! - **Once**: only the first reach of the call site ever emits
//! - **Every N**: the n-th, 2n-th, ... reach emits
//! - **Changed**: emits when a condition goes from false to true
//! - **Throttle**: emits when at least an interval has passed since the last emission
//!
//! State is kept per [`CallSite`] in a [`RateLimiter`] table, not per logger or
//! per thread: two loggers or two threads reaching the same statement share one
//! record. The table is behind a mutex so concurrent reaches cannot double-emit
//! or lose increments.
//!
//! # Example
//!
//! ```
//! use node_logger::{call_site, RateLimiter};
//!
//! let limiter = RateLimiter::new();
//! let mut emitted = 0;
//! for _ in 0..7 {
//!     if limiter.every_n(call_site!(), 3) {
//!         emitted += 1;
//!     }
//! }
//! assert_eq!(emitted, 2);
//! ```

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Stable identity of a logging statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    column: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// Call site of the caller of the function this is called from
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line(), location.column())
    }

    /// Explicit caller-supplied key, independent of source position
    pub const fn keyed(key: &'static str) -> Self {
        Self::new(key, 0, 0)
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Persistent per-call-site record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteState {
    Once { fired: bool },
    EveryN { count: u64 },
    Changed { previous: bool },
    Throttle { last_emission: Option<Instant> },
}

/// Counters for allowed and suppressed reaches
#[derive(Debug)]
pub struct RateLimitMetrics {
    allowed_count: AtomicU64,
    suppressed_count: AtomicU64,
}

impl RateLimitMetrics {
    pub const fn new() -> Self {
        Self {
            allowed_count: AtomicU64::new(0),
            suppressed_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn allowed_count(&self) -> u64 {
        self.allowed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_count(&self) -> u64 {
        self.allowed_count() + self.suppressed_count()
    }

    fn record(&self, allowed: bool) -> bool {
        if allowed {
            self.allowed_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.suppressed_count.fetch_add(1, Ordering::Relaxed);
        }
        allowed
    }

    pub fn reset(&self) {
        self.allowed_count.store(0, Ordering::Relaxed);
        self.suppressed_count.store(0, Ordering::Relaxed);
    }
}

impl Default for RateLimitMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Table of per-call-site rate limiting state
///
/// Each decision method records one reach of `site` and returns whether the
/// statement should emit. If a site is reached under a different policy than
/// the one its record was created with, the record starts over under the new
/// policy.
pub struct RateLimiter {
    sites: Mutex<HashMap<CallSite, SiteState>>,
    metrics: RateLimitMetrics,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            sites: Mutex::new(HashMap::new()),
            metrics: RateLimitMetrics::new(),
        }
    }

    /// True only on the first reach of `site`
    pub fn once(&self, site: CallSite) -> bool {
        let mut sites = self.sites.lock();
        let state = sites.entry(site).or_insert(SiteState::Once { fired: false });

        let allowed = match state {
            SiteState::Once { fired } => !std::mem::replace(fired, true),
            other => {
                *other = SiteState::Once { fired: true };
                true
            }
        };
        self.metrics.record(allowed)
    }

    /// True on every `n`-th reach of `site`; never when `n` is zero
    pub fn every_n(&self, site: CallSite, n: u64) -> bool {
        let mut sites = self.sites.lock();
        let state = sites.entry(site).or_insert(SiteState::EveryN { count: 0 });

        let count = match state {
            SiteState::EveryN { count } => {
                *count = count.wrapping_add(1);
                *count
            }
            other => {
                *other = SiteState::EveryN { count: 1 };
                1
            }
        };
        self.metrics.record(n != 0 && count % n == 0)
    }

    /// True when `condition` is true and was false on the previous reach
    ///
    /// The first reach compares against `false`.
    pub fn changed(&self, site: CallSite, condition: bool) -> bool {
        let mut sites = self.sites.lock();
        let state = sites
            .entry(site)
            .or_insert(SiteState::Changed { previous: false });

        let previous = match state {
            SiteState::Changed { previous } => std::mem::replace(previous, condition),
            other => {
                *other = SiteState::Changed {
                    previous: condition,
                };
                false
            }
        };
        self.metrics.record(condition && !previous)
    }

    /// True when `interval` has passed since `site` last emitted
    pub fn throttle(&self, site: CallSite, interval: Duration) -> bool {
        self.throttle_at(site, interval, Instant::now())
    }

    /// [`throttle`](Self::throttle) with an explicit clock reading
    ///
    /// The first reach always emits. The emission time is recorded before the
    /// statement body runs, so a window is consumed even if nothing is logged.
    pub fn throttle_at(&self, site: CallSite, interval: Duration, now: Instant) -> bool {
        let mut sites = self.sites.lock();
        let state = sites.entry(site).or_insert(SiteState::Throttle {
            last_emission: None,
        });

        let allowed = match state {
            SiteState::Throttle { last_emission } => {
                let due = last_emission
                    .map_or(true, |last| now.saturating_duration_since(last) >= interval);
                if due {
                    *last_emission = Some(now);
                }
                due
            }
            other => {
                *other = SiteState::Throttle {
                    last_emission: Some(now),
                };
                true
            }
        };
        self.metrics.record(allowed)
    }

    /// Drop the record of `site`, so its next reach behaves like the first
    pub fn forget(&self, site: &CallSite) -> bool {
        self.sites.lock().remove(site).is_some()
    }

    /// Number of call sites with a record
    pub fn len(&self) -> usize {
        self.sites.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.lock().is_empty()
    }

    pub fn metrics(&self) -> &RateLimitMetrics {
        &self.metrics
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("sites", &self.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

static RATE_LIMITER: OnceLock<RateLimiter> = OnceLock::new();

/// Process-wide table used by the rate-limited logging macros
pub fn rate_limiter() -> &'static RateLimiter {
    RATE_LIMITER.get_or_init(RateLimiter::new)
}
