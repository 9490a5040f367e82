//! Daily visit streak state machine.
//!
//! A streak counts consecutive local calendar days with at least one
//! recorded visit. Dates are compared as [`Date`]s, never as timestamps, so
//! time of day and daylight-saving shifts cannot cause a double increment
//! or a spurious reset.

use devotion_types::StreakRecord;
use serde::Serialize;
use time::Date;

/// How a visit changed the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Already visited today; nothing changed.
    Unchanged,
    /// First visit ever recorded.
    Started,
    /// Visited yesterday; the streak grew by one.
    Extended,
    /// The streak was broken (gap of two or more days, or a stored date
    /// ahead of today) and restarted at one.
    Reset,
}

impl StreakChange {
    /// Whether the record has to be written back.
    pub fn needs_write(self) -> bool {
        !matches!(self, StreakChange::Unchanged)
    }
}

/// Apply a visit on `today` to `stored`.
///
/// Returns the record to persist and what happened. A stored date in the
/// future counts as a broken streak.
pub fn advance(stored: StreakRecord, today: Date) -> (StreakRecord, StreakChange) {
    match stored.last_visit {
        Some(last) if last == today => (stored, StreakChange::Unchanged),
        None => (
            StreakRecord::new(stored.count.saturating_add(1), today),
            StreakChange::Started,
        ),
        Some(last) if Some(last) == today.previous_day() => (
            StreakRecord::new(stored.count.saturating_add(1), today),
            StreakChange::Extended,
        ),
        Some(_) => (StreakRecord::new(1, today), StreakChange::Reset),
    }
}
