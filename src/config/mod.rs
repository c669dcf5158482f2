//! Configuration management for pngr

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const DEFAULT_API_URL: &str = "https://api.pingera.ru";
pub const DEFAULT_APP_URL: &str = crate::formatters::base::DEFAULT_APP_URL;

/// Environment variable consulted when the config file has no API key.
pub const API_KEY_ENV: &str = "PINGERA_API_KEY";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pingera API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of the web dashboard, used in "view full results" links
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Show full check details by default
    #[serde(default)]
    pub verbose: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            app_url: default_app_url(),
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".pngr").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::load_from(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// API key from the config file, else from `PINGERA_API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate that an API key is available
    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or_else(|| ConfigError::MissingApiKey.into())
    }
}
