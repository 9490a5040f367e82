//! Saved passages command.

use anyhow::{Context, Result};
use devotion_store::{Clock, Store};
use devotion_types::SavedItem;
use serde_json::json;

use crate::cli::{ItemArgs, OutputFormat, SavedAction};
use crate::format::{format_saved_text, print_json};

/// Execute the saved command.
pub async fn cmd_saved(
    action: SavedAction,
    store: &Store,
    clock: &dyn Clock,
    format: OutputFormat,
) -> Result<()> {
    match action {
        SavedAction::List => {
            let items = store.list_saved().await;
            match format {
                OutputFormat::Json => print_json(&items)?,
                OutputFormat::Text => println!("{}", format_saved_text(&items)),
            }
        }
        SavedAction::Add(args) => {
            let id = args.id.clone();
            let existed = store.is_saved(&id).await;
            store
                .save_item(to_item(args, clock))
                .await
                .with_context(|| format!("Failed to save {}", id))?;
            report(&id, true, existed, format)?;
        }
        SavedAction::Remove { id } => {
            let existed = store.is_saved(&id).await;
            store
                .remove_item(&id)
                .await
                .with_context(|| format!("Failed to remove {}", id))?;
            report(&id, false, !existed, format)?;
        }
        SavedAction::Toggle(args) => {
            let id = args.id.clone();
            let saved = store
                .toggle_saved(to_item(args, clock))
                .await
                .with_context(|| format!("Failed to toggle {}", id))?;
            report(&id, saved, false, format)?;
        }
        SavedAction::Check { id } => {
            let saved = store.is_saved(&id).await;
            match format {
                OutputFormat::Json => print_json(&json!({ "id": id, "saved": saved }))?,
                OutputFormat::Text => {
                    if saved {
                        println!("{} is saved", id);
                    } else {
                        println!("{} is not saved", id);
                    }
                }
            }
        }
    }
    Ok(())
}

fn to_item(args: ItemArgs, clock: &dyn Clock) -> SavedItem {
    SavedItem::new(args.id, args.reference, args.text, args.explanation, clock.now())
}

/// Print the resulting state of one item. `unchanged` marks calls that
/// found the item already in the requested state.
fn report(id: &str, saved: bool, unchanged: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ "id": id, "saved": saved, "changed": !unchanged })),
        OutputFormat::Text => {
            match (saved, unchanged) {
                (true, true) => println!("{} was already saved", id),
                (false, true) => println!("{} was not saved", id),
                (true, false) => println!("Saved {}", id),
                (false, false) => println!("Removed {}", id),
            }
            Ok(())
        }
    }
}
