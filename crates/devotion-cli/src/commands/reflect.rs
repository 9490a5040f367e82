//! Reflections command.

use anyhow::{Context, Result, bail};
use devotion_store::{Clock, Store};
use devotion_types::Reflection;

use crate::cli::{OutputFormat, ReflectAction};
use crate::format::{format_reflections_text, print_json};

/// Execute the reflect command.
pub async fn cmd_reflect(
    action: ReflectAction,
    store: &Store,
    clock: &dyn Clock,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ReflectAction::Add { subject, content } => {
            let reflection = Reflection::new(subject, content, clock.now());
            if reflection.is_blank() {
                bail!("Reflection is empty");
            }

            store
                .add_reflection(reflection.clone())
                .await
                .context("Failed to save reflection")?;

            match format {
                OutputFormat::Json => print_json(&reflection)?,
                OutputFormat::Text => println!("Reflection saved for {}", reflection.subject_id),
            }
        }
        ReflectAction::List { subject } => {
            let reflections = match subject {
                Some(subject) => store.reflections_for(&subject).await,
                None => store.list_reflections().await,
            };
            match format {
                OutputFormat::Json => print_json(&reflections)?,
                OutputFormat::Text => println!("{}", format_reflections_text(&reflections)),
            }
        }
    }
    Ok(())
}
