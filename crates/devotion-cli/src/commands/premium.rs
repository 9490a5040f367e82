//! Premium entitlement command.

use anyhow::{Context, Result};
use devotion_store::Store;
use serde_json::json;

use crate::cli::{OutputFormat, PremiumAction};
use crate::format::print_json;

/// Execute the premium command.
pub async fn cmd_premium(action: PremiumAction, store: &Store, format: OutputFormat) -> Result<()> {
    match action {
        PremiumAction::Status => {}
        PremiumAction::Upgrade => store
            .set_premium(true)
            .await
            .context("Failed to unlock premium")?,
        PremiumAction::Downgrade => store
            .set_premium(false)
            .await
            .context("Failed to lock premium")?,
    }

    let is_premium = store.is_premium().await;
    match format {
        OutputFormat::Json => print_json(&json!({ "is_premium": is_premium })),
        OutputFormat::Text => {
            if is_premium {
                println!("Premium: unlocked");
            } else {
                println!("Premium: locked");
            }
            Ok(())
        }
    }
}
