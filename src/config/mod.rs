//! Configuration management for the storefront

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::products::ProductClient;
use crate::theme::store::DEFAULT_SETTLE_INTERVAL;

/// Name of the log file inside the data directory
pub const LOG_FILE_NAME: &str = "storefront.log";

/// Environment variable overriding the product endpoint
pub const PRODUCT_API_URL_ENV: &str = "STOREFRONT_PRODUCT_API_URL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint returning the product list
    pub product_api_url: String,

    /// Delay between selecting a theme and committing it, in milliseconds
    #[serde(default = "default_settle_interval_ms")]
    pub settle_interval_ms: u64,

    /// Size limit for the key-value storage file (unlimited if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_quota_bytes: Option<usize>,

    /// JSON file with a custom theme catalog (built-in themes if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes_file: Option<PathBuf>,
}

fn default_settle_interval_ms() -> u64 {
    DEFAULT_SETTLE_INTERVAL.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product_api_url: ProductClient::DEFAULT_ENDPOINT.to_string(),
            settle_interval_ms: default_settle_interval_ms(),
            storage_quota_bytes: None,
            themes_file: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    ///
    /// Never fails: an unreadable or unwritable configuration falls back to
    /// the defaults. The product endpoint can be overridden with
    /// `STOREFRONT_PRODUCT_API_URL`.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Ok(config_path) => Self::load_from(&config_path),
            Err(e) => {
                tracing::warn!("{:#}; using default configuration", e);
                Self::default()
            }
        };
        config.apply_api_url_override(std::env::var(PRODUCT_API_URL_ENV).ok());
        config
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(config_path: &Path) -> Self {
        match Self::read_or_create(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}; using default configuration", e);
                Self::default()
            }
        }
    }

    fn read_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            Self::from_json(&contents)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Parse configuration from JSON
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).with_context(|| "Failed to parse config.json")
    }

    /// Save configuration to disk
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Replace the product endpoint when an override is given
    pub fn apply_api_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            self.product_api_url = url;
        }
    }

    /// Settle interval as a duration, never zero
    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms.max(1))
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Get the key-value storage file path
    pub fn storage_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }


    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "storefront").context("Failed to determine data directory")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_config_uses_demo_endpoint() {
        let config = Config::default();
        assert_eq!(config.product_api_url, "https://fakestoreapi.com/products");
        assert_eq!(config.settle_interval(), Duration::from_millis(150));
    }

    #[test]
    fn config_serializes_without_unset_options() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("fakestoreapi"));
        assert!(!json.contains("themes_file"));
        assert!(!json.contains("storage_quota_bytes"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config = Config::from_json(r#"{"product_api_url":"http://localhost:3000/items"}"#)
            .unwrap();
        assert_eq!(config.product_api_url, "http://localhost:3000/items");
        assert_eq!(config.settle_interval_ms, 150);
        assert_eq!(config.themes_file, None);
    }

    #[test]
    fn zero_settle_interval_is_raised() {
        let config = Config { settle_interval_ms: 0, ..Config::default() };
        assert_eq!(config.settle_interval(), Duration::from_millis(1));
    }

    #[test]
    fn blank_override_is_ignored() {
        let mut config = Config::default();
        config.apply_api_url_override(Some("  ".into()));
        assert_eq!(config.product_api_url, ProductClient::DEFAULT_ENDPOINT);

        config.apply_api_url_override(Some("http://shop.test/products".into()));
        assert_eq!(config.product_api_url, "http://shop.test/products");
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(Config::from_json("{").is_err());
    }

    #[test]
    fn first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storefront").join("config.json");

        assert_eq!(Config::load_from(&path), Config::default());
        assert!(path.exists());

        std::fs::write(&path, r#"{"product_api_url":"http://shop.test/products"}"#).unwrap();
        assert_eq!(Config::load_from(&path).product_api_url, "http://shop.test/products");
    }

    #[test]
    fn unwritable_config_dir_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let path = blocker.join("storefront").join("config.json");

        assert!(Config::read_or_create(&path).is_err());
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
        // the broken file is left for the user to fix
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
