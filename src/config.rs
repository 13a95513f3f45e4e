use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "findex";
const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "index.sqlite";

/// User configuration stored in the config directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Root directories to index, in walk order
    #[serde(default)]
    pub included_folders: Vec<String>,

    /// Glob patterns matched against full directory paths; a match skips
    /// the directory and its whole subtree
    #[serde(default)]
    pub excluded_folders: Vec<String>,

    /// Exact file base names that are never indexed
    #[serde(default)]
    pub excluded_files: Vec<String>,
}

impl Config {
    /// Load config from the config directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the config directory
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// Get the path to the index database
pub fn get_database_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(DATABASE_FILE))
}

/// Get the per-user config directory, creating it if needed
fn get_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
