//! Monotonic Timestamps
//!
//! Wall-clock timestamps that never repeat or go backwards within a
//! process. Record ordering by `updated_at` depends on this.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Storage format for timestamps (fixed-width, sorts lexically)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Issues strictly increasing UTC timestamps
#[derive(Debug)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

static PROCESS_CLOCK: MonotonicClock = MonotonicClock::new();

/// The clock shared by every store in this process
pub fn process_clock() -> &'static MonotonicClock {
    &PROCESS_CLOCK
}

impl MonotonicClock {
    pub const fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Next timestamp, strictly greater than any previously issued one
    pub fn now(&self) -> DateTime<Utc> {
        self.next_after(None)
    }

    /// Next timestamp, also strictly greater than `floor`
    pub fn now_after(&self, floor: &DateTime<Utc>) -> DateTime<Utc> {
        self.next_after(Some(*floor))
    }

    fn next_after(&self, floor: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut candidate = truncate_micros(Utc::now());
        for bound in [*last, floor].into_iter().flatten() {
            if candidate <= bound {
                candidate = bound + Duration::microseconds(1);
            }
        }
        *last = Some(candidate);
        candidate
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a timestamp in storage format
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp; accepts any RFC 3339 string
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn truncate_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = ts.timestamp_subsec_nanos();
    ts - Duration::nanoseconds(i64::from(nanos % 1_000))
}
