//! Core records persisted by the Devotion store.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[cfg(feature = "serde")]
time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// A passage the user has bookmarked.
///
/// Identity is `id`: the store never holds two items with the same `id`,
/// and an item is never edited once saved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SavedItem {
    /// Stable content key (e.g. `"psalm-46-10"`).
    pub id: String,
    /// Human-readable scripture reference.
    pub reference: String,
    /// Passage text.
    pub text: String,
    /// Plain-language explanation shown with the passage.
    pub explanation: String,
    /// When the user saved the item.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub saved_at: OffsetDateTime,
}

impl SavedItem {
    /// Create a new saved item.
    pub fn new(
        id: impl Into<String>,
        reference: impl Into<String>,
        text: impl Into<String>,
        explanation: impl Into<String>,
        saved_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            reference: reference.into(),
            text: text.into(),
            explanation: explanation.into(),
            saved_at,
        }
    }
}

/// A free-text journal entry about a content item.
///
/// Reflections have no identity of their own; several may share a
/// `subject_id` and they are kept in the order they were written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reflection {
    /// Id of the content item the reflection is about.
    pub subject_id: String,
    /// Entry text.
    pub content: String,
    /// When the entry was written.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub created_at: OffsetDateTime,
}

impl Reflection {
    /// Create a new reflection.
    pub fn new(
        subject_id: impl Into<String>,
        content: impl Into<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            content: content.into(),
            created_at,
        }
    }

    /// Whether the content is empty or whitespace only.
    ///
    /// The store accepts blank entries; front ends use this to reject them
    /// before saving.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// The consecutive-day visit streak.
///
/// There is exactly one record per installation. `last_visit` is a local
/// calendar date with no time-of-day component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreakRecord {
    /// Number of consecutive days visited.
    pub count: u32,
    /// Calendar date of the most recent recorded visit.
    #[cfg_attr(feature = "serde", serde(with = "calendar_date::option"))]
    pub last_visit: Option<Date>,
}

impl StreakRecord {
    /// Create a record for a streak of `count` days ending on `last_visit`.
    pub fn new(count: u32, last_visit: Date) -> Self {
        Self {
            count,
            last_visit: Some(last_visit),
        }
    }
}

/// Local premium entitlement.
///
/// Payment is validated elsewhere; the store trusts whoever sets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PremiumFlag {
    pub is_premium: bool,
}

impl From<bool> for PremiumFlag {
    fn from(is_premium: bool) -> Self {
        Self { is_premium }
    }
}
