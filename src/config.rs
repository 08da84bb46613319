// Configuration module for shoplist
// This module handles loading and parsing configuration from ~/.config/shoplist/config.toml

mod types;

pub use types::{BackendConfig, Config, SuggestionConfig, UiConfig};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShoplistError;

const ENV_SERVER_URL: &str = "SHOPLIST_SERVER_URL";
const ENV_APP_ID: &str = "SHOPLIST_APP_ID";
const ENV_JAVASCRIPT_KEY: &str = "SHOPLIST_JAVASCRIPT_KEY";

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration and applies environment overrides.
///
/// Without `explicit`, reads ~/.config/shoplist/config.toml and falls back to
/// defaults when it is missing or broken. An explicit path that does not
/// exist is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigResult, ShoplistError> {
    let mut result = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ShoplistError::ConfigNotFound(path.to_path_buf()));
            }
            load_config_from_path(path)
        }
        None => load_config_from_path(&get_config_path()),
    };

    result
        .config
        .apply_env_overrides(|key| std::env::var(key).ok());

    Ok(result)
}

/// Reads and parses a config file, returning defaults plus a warning on failure.
pub fn load_config_from_path(config_path: &Path) -> ConfigResult {
    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        #[cfg(debug_assertions)]
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            #[cfg(debug_assertions)]
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            #[cfg(debug_assertions)]
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e.message())),
            }
        }
    }
}

impl Config {
    /// Environment variables win over the file for the backend connection.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_SERVER_URL) {
            self.backend.server_url = Some(url);
        }
        if let Some(app_id) = non_empty(ENV_APP_ID) {
            self.backend.app_id = Some(app_id);
        }
        if let Some(key) = non_empty(ENV_JAVASCRIPT_KEY) {
            self.backend.javascript_key = Some(key);
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/shoplist/config.toml on all platforms for consistency.
pub fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("shoplist")
        .join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
