//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "devotion")]
#[command(author, version, about = "Daily reading streaks, bookmarks and reflections", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Data directory (overrides config)
    #[arg(long, global = true, env = "DEVOTION_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "DEVOTION_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record today's visit and show the streak
    Visit,

    /// Show the current streak without recording a visit
    Streak,

    /// Manage saved passages
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Write or read reflections
    Reflect {
        #[command(subcommand)]
        action: ReflectAction,
    },

    /// Show or change the premium entitlement
    Premium {
        #[command(subcommand)]
        action: PremiumAction,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// A passage to save
#[derive(Debug, Clone, Args)]
pub struct ItemArgs {
    /// Stable content id (e.g. psalm-46-10)
    pub id: String,

    /// Scripture reference
    #[arg(short, long)]
    pub reference: String,

    /// Passage text
    #[arg(short, long)]
    pub text: String,

    /// Plain-language explanation
    #[arg(short, long, default_value = "")]
    pub explanation: String,
}

#[derive(Debug, Subcommand)]
pub enum SavedAction {
    /// List saved passages
    List,
    /// Save a passage (no-op if the id is already saved)
    Add(ItemArgs),
    /// Remove a saved passage
    Remove {
        /// Content id
        id: String,
    },
    /// Save the passage if not saved, otherwise remove it
    Toggle(ItemArgs),
    /// Check whether a passage is saved
    Check {
        /// Content id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReflectAction {
    /// Write a reflection about a passage
    Add {
        /// Content id the reflection is about
        subject: String,
        /// Reflection text
        content: String,
    },
    /// List reflections
    List {
        /// Only show reflections about this content id
        #[arg(short, long)]
        subject: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PremiumAction {
    /// Show whether premium is unlocked
    Status,
    /// Unlock premium content
    Upgrade,
    /// Lock premium content again
    Downgrade,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a config value (data_dir, format, utc_offset_hours)
    Set { key: String, value: String },
    /// Clear a config value
    Unset { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_saved_add() {
        let cli = Cli::try_parse_from([
            "devotion",
            "saved",
            "add",
            "psalm-46-10",
            "--reference",
            "Psalm 46:10",
            "--text",
            "Be still",
        ])
        .unwrap();

        match cli.command {
            Commands::Saved {
                action: SavedAction::Add(item),
            } => {
                assert_eq!(item.id, "psalm-46-10");
                assert_eq!(item.reference, "Psalm 46:10");
                assert_eq!(item.explanation, "");
            }
            _ => panic!("expected saved add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["devotion", "visit", "--format", "json", "-q"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.quiet);
    }

    #[test]
    fn test_reflect_list_subject_filter() {
        let cli = Cli::try_parse_from(["devotion", "reflect", "list", "-s", "day-1"]).unwrap();
        match cli.command {
            Commands::Reflect {
                action: ReflectAction::List { subject },
            } => assert_eq!(subject.as_deref(), Some("day-1")),
            _ => panic!("expected reflect list"),
        }
    }

    #[test]
    fn test_output_format_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&OutputFormat::Json).unwrap(),
            "\"json\""
        );
    }
}
