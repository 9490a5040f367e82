//! Visit and streak commands.

use anyhow::Result;
use devotion_store::Store;

use crate::cli::OutputFormat;
use crate::format::{format_streak_text, format_visit_text, print_json};

/// Record today's visit.
pub async fn cmd_visit(store: &Store, format: OutputFormat) -> Result<()> {
    let visit = store.record_visit().await;
    if !visit.persisted {
        tracing::warn!("Streak of {} was not saved", visit.count);
    }

    match format {
        OutputFormat::Json => print_json(&visit),
        OutputFormat::Text => {
            println!("{}", format_visit_text(&visit));
            Ok(())
        }
    }
}

/// Show the streak without recording a visit.
pub async fn cmd_streak(store: &Store, format: OutputFormat) -> Result<()> {
    let record = store.streak_record().await;

    match format {
        OutputFormat::Json => print_json(&record),
        OutputFormat::Text => {
            println!("{}", format_streak_text(&record));
            Ok(())
        }
    }
}
