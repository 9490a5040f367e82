//! Config command.

use std::path::Path;

use anyhow::{Result, bail};

use crate::cli::ConfigAction;
use crate::config::Config;

/// Execute the config command.
pub fn cmd_config(action: ConfigAction, path: &Path, mut config: Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&config)?;
            if content.trim().is_empty() {
                println!("# defaults (no settings in {})", path.display());
            } else {
                print!("{}", content);
            }
            println!(
                "# data directory: {}",
                config.resolve_data_dir(None).display()
            );
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(path)?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save_to(path)?;
            println!("{} = {}", key, value);
        }
        ConfigAction::Unset { key } => {
            config.unset(&key)?;
            config.save_to(path)?;
            println!("Cleared {}", key);
        }
    }
    Ok(())
}
