//! Sources of "today".
//!
//! The streak compares local calendar dates, so the store asks a [`Clock`]
//! for the current date instead of reading the system time directly.

use std::sync::Mutex;

use time::{Date, Duration, OffsetDateTime, UtcOffset};
use tracing::debug;

/// Provides the current instant and local calendar date.
pub trait Clock: Send + Sync {
    /// The current instant, in the clock's local offset.
    fn now(&self) -> OffsetDateTime;

    /// The current local calendar date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Wall clock.
///
/// Uses the system's local UTC offset unless a fixed offset was given.
/// When the local offset cannot be determined (common on multi-threaded
/// Unix processes) the clock falls back to UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<UtcOffset>,
}

impl SystemClock {
    /// Clock following the system's local offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock pinned to a fixed UTC offset.
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// Clock pinned to a whole-hour UTC offset, if in range.
    pub fn with_offset_hours(hours: i8) -> Option<Self> {
        UtcOffset::from_hms(hours, 0, 0).ok().map(Self::with_offset)
    }

    fn offset(&self) -> UtcOffset {
        if let Some(offset) = self.offset {
            return offset;
        }
        UtcOffset::current_local_offset().unwrap_or_else(|e| {
            debug!("Local offset unavailable ({}), using UTC", e);
            UtcOffset::UTC
        })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset())
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use devotion_store::{Clock, FixedClock};
/// use time::macros::date;
///
/// let clock = FixedClock::new(date!(2024 - 02 - 28));
/// clock.advance_days(2);
/// assert_eq!(clock.today(), date!(2024 - 03 - 01));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<OffsetDateTime>,
}

impl FixedClock {
    /// Clock reading noon UTC on `date`.
    pub fn new(date: Date) -> Self {
        Self::at(date.midnight().assume_utc() + Duration::hours(12))
    }

    /// Clock reading exactly `now`.
    pub fn at(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to noon on `date`.
    pub fn set(&self, date: Date) {
        self.set_now(date.midnight().assume_utc() + Duration::hours(12));
    }

    /// Jump to exactly `now`.
    pub fn set_now(&self, now: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move forward (or, with a negative value, backward) by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
