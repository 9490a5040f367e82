//! Command-line front end for the Devotion daily reading app.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `visit` | Record today's visit and show the streak |
//! | `streak` | Show the streak without recording a visit |
//! | `saved` | List, add, remove, toggle or check saved passages |
//! | `reflect` | Write or list reflections |
//! | `premium` | Show or change the premium entitlement |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings live in `~/.config/devotion/config.toml` (or platform
//! equivalent): `data_dir`, `format` and `utc_offset_hours`.
//!
//! # Environment Variables
//!
//! - `DEVOTION_DATA_DIR`: store directory (overridden by `--data-dir`)
//! - `DEVOTION_CONFIG`: config file path (overridden by `--config`)
//! - `RUST_LOG`: log filter when neither `--verbose` nor `--quiet` is given

mod cli;
mod commands;
mod config;
mod format;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use devotion_store::{Clock, Store};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "devotion", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so JSON output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::path);
    let config = Config::load_from(&config_path);
    let format = config.resolve_format(cli.format);

    let data_dir = cli.data_dir;
    let open = || open_store(&config, data_dir.clone());

    match cli.command {
        Commands::Visit => commands::cmd_visit(&open()?.0, format).await,
        Commands::Streak => commands::cmd_streak(&open()?.0, format).await,
        Commands::Saved { action } => {
            let (store, clock) = open()?;
            commands::cmd_saved(action, &store, clock.as_ref(), format).await
        }
        Commands::Reflect { action } => {
            let (store, clock) = open()?;
            commands::cmd_reflect(action, &store, clock.as_ref(), format).await
        }
        Commands::Premium { action } => commands::cmd_premium(action, &open()?.0, format).await,
        Commands::Config { action } => commands::cmd_config(action, &config_path, config.clone()),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Open the store in the configured data directory with the configured clock.
fn open_store(config: &Config, data_dir: Option<PathBuf>) -> Result<(Store, Arc<dyn Clock>)> {
    let data_dir = config.resolve_data_dir(data_dir);
    let clock: Arc<dyn Clock> = Arc::new(config.clock()?);
    let store = Store::open_with_clock(&data_dir, clock.clone())
        .with_context(|| format!("Failed to open store at {}", data_dir.display()))?;
    tracing::debug!("Store at {}, today is {}", data_dir.display(), clock.today());
    Ok((store, clock))
}
