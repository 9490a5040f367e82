//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use devotion_store::SystemClock;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the store (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Fixed UTC offset, in hours, used to decide what "today" is.
    /// When unset the system's local offset is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_hours: Option<i8>,
}

impl Config {
    /// Keys accepted by `config set` / `config unset`.
    pub const KEYS: [&'static str; 3] = ["data_dir", "format", "utc_offset_hours"];

    /// Get the default config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("devotion")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse config {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Set a value from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "format" => {
                self.format = Some(match value {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => bail!("Unknown format '{}' (expected text or json)", other),
                })
            }
            "utc_offset_hours" => {
                let hours: i8 = value
                    .parse()
                    .with_context(|| format!("Invalid UTC offset '{}'", value))?;
                if SystemClock::with_offset_hours(hours).is_none() {
                    bail!("UTC offset {} is out of range", hours);
                }
                self.utc_offset_hours = Some(hours);
            }
            other => bail!(
                "Unknown config key '{}' (expected one of: {})",
                other,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Clear a value
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = None,
            "format" => self.format = None,
            "utc_offset_hours" => self.utc_offset_hours = None,
            other => bail!(
                "Unknown config key '{}' (expected one of: {})",
                other,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Resolve output format: explicit flag overrides config
    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }

    /// Resolve data directory: explicit flag/env overrides config
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.data_dir.clone())
            .unwrap_or_else(devotion_store::default_data_dir)
    }

    /// Build the clock that decides what "today" is
    pub fn clock(&self) -> Result<SystemClock> {
        match self.utc_offset_hours {
            Some(hours) => SystemClock::with_offset_hours(hours)
                .with_context(|| format!("UTC offset {} is out of range", hours)),
            None => Ok(SystemClock::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.data_dir.is_none());
        assert!(config.format.is_none());
        assert!(config.utc_offset_hours.is_none());
        assert_eq!(toml::to_string(&config).unwrap(), "");
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("nope.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "format = [1, 2").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/devotion")),
            format: Some(OutputFormat::Json),
            utc_offset_hours: Some(-5),
        };

        config.save_to(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("format = \"json\""));
        assert!(content.contains("utc_offset_hours = -5"));

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_set_and_unset() {
        let mut config = Config::default();

        config.set("format", "json").unwrap();
        config.set("utc_offset_hours", "9").unwrap();
        config.set("data_dir", "/data").unwrap();
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.utc_offset_hours, Some(9));
        assert_eq!(config.data_dir, Some(PathBuf::from("/data")));

        config.unset("format").unwrap();
        assert!(config.format.is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("format", "csv").is_err());
        assert!(config.set("utc_offset_hours", "abc").is_err());
        assert!(config.set("utc_offset_hours", "40").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.unset("colour").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_format_flag_wins() {
        let config = Config {
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert_eq!(config.resolve_format(Some(OutputFormat::Text)), OutputFormat::Text);
        assert_eq!(config.resolve_format(None), OutputFormat::Json);
        assert_eq!(Config::default().resolve_format(None), OutputFormat::Text);
    }

    #[test]
    fn test_resolve_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_data_dir(Some(PathBuf::from("/from/flag"))),
            PathBuf::from("/from/flag")
        );
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("/from/config"));
        assert_eq!(
            Config::default().resolve_data_dir(None),
            devotion_store::default_data_dir()
        );
    }

    #[test]
    fn test_clock_uses_configured_offset() {
        use devotion_store::Clock;

        let config = Config {
            utc_offset_hours: Some(3),
            ..Default::default()
        };
        let clock = config.clock().unwrap();
        assert_eq!(clock.now().offset().whole_hours(), 3);
    }
}
