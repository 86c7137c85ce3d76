//
//  wpcom-kit
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings are stored as TOML in the platform config directory:
//!
//! - **Linux**: `~/.config/wpk/config.toml`
//! - **macOS**: `~/Library/Application Support/wpk/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\wpk\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://public-api.wordpress.com/"
//! timeout_secs = 30
//!
//! [defaults]
//! site_id = 12345
//! language_id = "en"
//!
//! [oauth]
//! client_id = "11"
//! client_secret = "app-secret"
//! ```
//!
//! A missing file, section, or key falls back to its default.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wpcom_kit::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("defaults.site_id", "12345")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "defaults.site_id",
    "defaults.language_id",
    "oauth.client_id",
    "oauth.client_secret",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub oauth: OAuthClientConfig,
}

/// Where and how to reach the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Values used when a command does not name them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
}

/// OAuth application credentials, sent with site creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OAuthClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a value by dotted key, e.g. `api.base_url`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "defaults.site_id" => self.defaults.site_id.map(|id| id.to_string()),
            "defaults.language_id" => self.defaults.language_id.clone(),
            "oauth.client_id" => self.oauth.client_id.clone(),
            "oauth.client_secret" => self.oauth.client_secret.clone(),
            _ => None,
        }
    }

    /// Writes a value by dotted key. Unknown keys and unparseable numbers fail.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value).with_context(|| format!("Invalid URL: {}", value))?;
                self.api.base_url = value.to_string();
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {}", value))?;
            }
            "defaults.site_id" => {
                self.defaults.site_id = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid site id: {}", value))?,
                );
            }
            "defaults.language_id" => self.defaults.language_id = Some(value.to_string()),
            "oauth.client_id" => self.oauth.client_id = Some(value.to_string()),
            "oauth.client_secret" => self.oauth.client_secret = Some(value.to_string()),
            _ => bail!(
                "Unknown configuration key: {}. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}
