use crate::services::dog_api;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Palette active at startup ("light" or "dark")
    #[serde(default = "default_theme_name")]
    pub theme: String,

    #[serde(default)]
    pub dog: DogConfig,
}

fn default_theme_name() -> String {
    "light".to_string()
}

/// Image fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogConfig {
    /// Endpoint queried once at startup for a random image URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_true")]
    pub fetch_on_start: bool,
}

fn default_api_url() -> String {
    dog_api::DOG_API_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DogConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            fetch_on_start: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            dog: DogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Default config file location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dogview").join("config.json"))
    }

    /// Load from the default location, falling back to defaults if absent or invalid
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config: {:#}", e);
                Self::default()
            }
        }
    }
}
