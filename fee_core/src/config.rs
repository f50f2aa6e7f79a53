//! Configuration file support for feecast.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/feecast/config.toml`.
//! Only presentation and storage settings live here; the rate tables are
//! fixed by the regulator and cannot be configured.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_roster_path")]
    pub roster_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            roster_path: default_roster_path(),
        }
    }
}

/// Monthly grid layout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GridView {
    /// One cell per month with its total
    #[default]
    Compact,
    /// Table with visit, medication and total columns
    Itemized,
}

/// Result rendering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub view: GridView,

    /// Start the monthly grid at the current calendar month
    #[serde(default = "default_rotate")]
    pub rotate_to_current_month: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            view: GridView::default(),
            rotate_to_current_month: default_rotate(),
        }
    }
}

// Default value functions
fn home_dir_or_cwd() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_roster_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_dir_or_cwd().join(".local/share"));
    base.join("feecast").join("specialties.json")
}

fn default_rotate() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir_or_cwd().join(".config"));
        base.join("feecast").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.view, GridView::Compact);
        assert!(config.display.rotate_to_current_month);
        assert!(config.data.roster_path.ends_with("feecast/specialties.json"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[display]
view = "itemized"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.view, GridView::Itemized);
        assert!(config.display.rotate_to_current_month); // default
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        let toml_str = r#"
[display]
view = "poster"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.rotate_to_current_month = false;
        config.data.roster_path = dir.path().join("roster.json");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.display.rotate_to_current_month);
        assert_eq!(loaded.data.roster_path, dir.path().join("roster.json"));
    }
}
