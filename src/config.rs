//! Catalog configuration.
//!
//! Values come from [`CatalogConfig::default`], then an optional RON file,
//! then `POKEDEX_*` environment variables. Front ends apply their own flags last.

use crate::errors::{ConfigError, ConfigResult};
use crate::units::HeightStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SEARCH_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PUBLISH_DELAY_MS: u64 = 1000;
pub const DEFAULT_CATALOG_SIZE: u32 = 1025;

pub const ENV_API_URL: &str = "POKEDEX_API_URL";
pub const ENV_SEARCH_URL: &str = "POKEDEX_SEARCH_URL";
pub const ENV_PUBLISH_DELAY_MS: &str = "POKEDEX_PUBLISH_DELAY_MS";
/// Path of a RON config file, read by the MCP server.
pub const ENV_CONFIG_PATH: &str = "POKEDEX_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api_base_url: String,
    pub search_base_url: String,
    pub page_size: u32,
    /// Cosmetic pause before a loaded page is published.
    pub publish_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Highest id that gets a "next" link.
    pub catalog_size: u32,
    pub height_style: HeightStyle,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            publish_delay_ms: DEFAULT_PUBLISH_DELAY_MS,
            request_timeout_secs: 30,
            catalog_size: DEFAULT_CATALOG_SIZE,
            height_style: HeightStyle::Imperial,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from an optional RON file and the environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => Self::from_ron_file(path)?,
            None => Self::default(),
        };
        config
            .with_env_overrides(|key| std::env::var(key).ok())?
            .validate()
    }

    /// Parse a RON file. Missing fields keep their defaults.
    pub fn from_ron_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()
    }

    /// Reject values the listing cannot work with.
    pub fn validate(self) -> ConfigResult<Self> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                value: self.page_size.to_string(),
            });
        }
        Ok(self)
    }

    /// Apply `POKEDEX_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_SEARCH_URL) {
            self.search_base_url = url;
        }
        if let Some(raw) = lookup(ENV_PUBLISH_DELAY_MS) {
            self.publish_delay_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PUBLISH_DELAY_MS,
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    pub fn publish_delay(&self) -> Duration {
        Duration::from_millis(self.publish_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
