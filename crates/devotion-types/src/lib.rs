//! Platform-agnostic types for the Devotion daily reading app.
//!
//! This crate provides the records that the local store persists and that
//! front ends render: bookmarked passages, journal reflections, the daily
//! visit streak and the premium entitlement flag.
//!
//! # Example
//!
//! ```
//! use devotion_types::{SavedItem, StreakRecord};
//! use time::macros::datetime;
//!
//! let item = SavedItem::new(
//!     "psalm-46-10",
//!     "Psalm 46:10",
//!     "Be still, and know that I am God.",
//!     "An invitation to pause.",
//!     datetime!(2024-03-01 08:00 UTC),
//! );
//! assert_eq!(item.id, "psalm-46-10");
//! assert_eq!(StreakRecord::default().count, 0);
//! ```

pub mod types;

pub use types::{PremiumFlag, Reflection, SavedItem, StreakRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample_item() -> SavedItem {
        SavedItem::new(
            "psalm-46-10",
            "Psalm 46:10",
            "Be still, and know that I am God.",
            "God is in control.",
            datetime!(2024-03-01 08:30:00 UTC),
        )
    }

    // --- SavedItem ---

    #[test]
    fn test_saved_item_new() {
        let item = sample_item();
        assert_eq!(item.id, "psalm-46-10");
        assert_eq!(item.reference, "Psalm 46:10");
        assert_eq!(item.saved_at, datetime!(2024-03-01 08:30:00 UTC));
    }

    #[test]
    fn test_saved_item_serializes_rfc3339_timestamp() {
        let json = serde_json::to_string(&sample_item()).unwrap();
        assert!(json.contains("\"id\":\"psalm-46-10\""));
        assert!(json.contains("\"saved_at\":\"2024-03-01T08:30:00Z\""));
    }

    #[test]
    fn test_saved_item_deserialization() {
        let json = r#"{"id":"day-2","reference":"Jeremiah 29:11","text":"For I know the plans","explanation":"Hope","saved_at":"2024-03-02T07:00:00+02:00"}"#;
        let item: SavedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "day-2");
        assert_eq!(item.saved_at, datetime!(2024-03-02 05:00:00 UTC));
    }

    // --- Reflection ---

    #[test]
    fn test_reflection_allows_empty_content() {
        let reflection = Reflection::new("psalm-46-10", "", datetime!(2024-03-01 21:00 UTC));
        assert!(reflection.content.is_empty());
        assert!(reflection.is_blank());
    }

    #[test]
    fn test_reflection_is_blank_ignores_whitespace() {
        let blank = Reflection::new("x", "  \n\t", datetime!(2024-03-01 21:00 UTC));
        let filled = Reflection::new("x", " trust ", datetime!(2024-03-01 21:00 UTC));
        assert!(blank.is_blank());
        assert!(!filled.is_blank());
    }

    // --- StreakRecord ---

    #[test]
    fn test_streak_record_default_is_zero_and_absent() {
        let record = StreakRecord::default();
        assert_eq!(record.count, 0);
        assert!(record.last_visit.is_none());
    }

    #[test]
    fn test_streak_record_serialization_uses_calendar_date() {
        let record = StreakRecord::new(4, date!(2024 - 02 - 29));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"count":4,"last_visit":"2024-02-29"}"#);
    }

    #[test]
    fn test_streak_record_absent_date_serializes_null() {
        let json = serde_json::to_string(&StreakRecord::default()).unwrap();
        assert_eq!(json, r#"{"count":0,"last_visit":null}"#);

        let parsed: StreakRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StreakRecord::default());
    }

    #[test]
    fn test_streak_record_rejects_timestamp_for_date() {
        let json = r#"{"count":2,"last_visit":"2024-02-29T10:00:00Z"}"#;
        assert!(serde_json::from_str::<StreakRecord>(json).is_err());
    }

    // --- PremiumFlag ---

    #[test]
    fn test_premium_flag_defaults_to_false() {
        assert!(!PremiumFlag::default().is_premium);
        assert!(PremiumFlag::from(true).is_premium);
    }

    #[test]
    fn test_premium_flag_serialization() {
        let json = serde_json::to_string(&PremiumFlag::from(true)).unwrap();
        assert_eq!(json, r#"{"is_premium":true}"#);
    }
}
