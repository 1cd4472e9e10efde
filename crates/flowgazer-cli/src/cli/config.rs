use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flowgazer_core::constants::RELAY_URL;
use flowgazer_core::FeedConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration that can be loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// Relay the captured stream came from, for log context
    pub relay_url: String,

    /// Hex pubkey of the local identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub me: Option<String>,

    /// Check event signatures while replaying
    pub verify_signatures: bool,

    pub feed: FeedConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            relay_url: RELAY_URL.to_string(),
            me: None,
            verify_signatures: true,
            feed: FeedConfig::default(),
        }
    }
}

impl CliConfig {
    /// `<config dir>/flowgazer/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flowgazer").join("config.json"))
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
