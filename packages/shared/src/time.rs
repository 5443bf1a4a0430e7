//! Time-related utilities with clock abstraction for testability.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, FixedOffset, Local, TimeZone, Timelike, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests.
///
/// Shared between tasks by reference; `set` and `advance` are visible to every
/// holder immediately.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a new manual clock starting at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Render a timestamp as `H:M:S` in the given offset.
///
/// Fields are not zero-padded and no date is included, so the result does not
/// sort as a string across hours or days. Out-of-range timestamps render as
/// `0:0:0`.
pub fn format_clock_time(timestamp_millis: i64, offset: &FixedOffset) -> String {
    match offset.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => hms(&dt),
        None => "0:0:0".to_string(),
    }
}

/// Render a timestamp as `H:M:S` in the server's local time zone.
pub fn format_local_clock_time(timestamp_millis: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => hms(&dt),
        None => "0:0:0".to_string(),
    }
}

fn hms<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!("{}:{}:{}", dt.hour(), dt.minute(), dt.second())
}
