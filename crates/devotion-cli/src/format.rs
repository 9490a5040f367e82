//! Output formatting for text and JSON modes.

use anyhow::Result;
use devotion_store::{StreakChange, Visit};
use devotion_types::{Reflection, SavedItem, StreakRecord};
use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Short human-readable timestamp, e.g. `2024-03-01 08:30`.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| ts.to_string())
}

fn days(count: u32) -> &'static str {
    if count == 1 { "day" } else { "days" }
}

pub fn format_visit_text(visit: &Visit) -> String {
    let note = match visit.change {
        StreakChange::Unchanged => "already counted today",
        StreakChange::Started => "streak started",
        StreakChange::Extended => "streak extended",
        StreakChange::Reset => "streak restarted",
    };
    let mut out = format!("Streak: {} {} ({})", visit.count, days(visit.count), note);
    if !visit.persisted {
        out.push_str("\nWarning: the visit could not be saved");
    }
    out
}

pub fn format_streak_text(record: &StreakRecord) -> String {
    match record.last_visit {
        Some(last) => format!(
            "Streak: {} {} (last visit {})",
            record.count,
            days(record.count),
            last
        ),
        None => format!(
            "Streak: {} {} (no visits yet)",
            record.count,
            days(record.count)
        ),
    }
}

pub fn format_saved_text(items: &[SavedItem]) -> String {
    if items.is_empty() {
        return "No saved passages.".to_string();
    }
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "{} - {} (saved {})\n  {}\n",
            item.id,
            item.reference,
            format_timestamp(item.saved_at),
            item.text
        ));
        if !item.explanation.is_empty() {
            out.push_str(&format!("  {}\n", item.explanation));
        }
    }
    out.trim_end().to_string()
}

pub fn format_reflections_text(reflections: &[Reflection]) -> String {
    if reflections.is_empty() {
        return "No reflections yet.".to_string();
    }
    reflections
        .iter()
        .map(|r| {
            format!(
                "[{}] {}\n  {}",
                format_timestamp(r.created_at),
                r.subject_id,
                r.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(datetime!(2024-03-01 08:30:45 UTC)),
            "2024-03-01 08:30"
        );
    }

    #[test]
    fn test_format_visit_text() {
        let visit = Visit {
            count: 1,
            change: StreakChange::Started,
            persisted: true,
        };
        assert_eq!(format_visit_text(&visit), "Streak: 1 day (streak started)");

        let visit = Visit {
            count: 4,
            change: StreakChange::Extended,
            persisted: false,
        };
        let text = format_visit_text(&visit);
        assert!(text.starts_with("Streak: 4 days (streak extended)"));
        assert!(text.contains("could not be saved"));
    }

    #[test]
    fn test_format_streak_text() {
        assert_eq!(
            format_streak_text(&StreakRecord::default()),
            "Streak: 0 days (no visits yet)"
        );
        assert_eq!(
            format_streak_text(&StreakRecord::new(3, date!(2024 - 03 - 01))),
            "Streak: 3 days (last visit 2024-03-01)"
        );
    }

    #[test]
    fn test_format_streak_text_count_without_date() {
        let record = StreakRecord {
            count: 3,
            last_visit: None,
        };
        assert_eq!(format_streak_text(&record), "Streak: 3 days (no visits yet)");
    }

    #[test]
    fn test_format_saved_text() {
        assert_eq!(format_saved_text(&[]), "No saved passages.");

        let item = SavedItem::new(
            "psalm-46-10",
            "Psalm 46:10",
            "Be still",
            "",
            datetime!(2024-03-01 08:30 UTC),
        );
        let text = format_saved_text(&[item]);
        assert_eq!(
            text,
            "psalm-46-10 - Psalm 46:10 (saved 2024-03-01 08:30)\n  Be still"
        );
    }

    #[test]
    fn test_format_reflections_text() {
        let r = Reflection::new("day-1", "Trusting today", datetime!(2024-03-01 21:05 UTC));
        assert_eq!(
            format_reflections_text(&[r]),
            "[2024-03-01 21:05] day-1\n  Trusting today"
        );
    }
}
