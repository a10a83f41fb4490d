//
//  kibana-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Connection settings for [`ApiClient`](crate::api::ApiClient), loaded from a
//! TOML file and overridden by environment variables.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/kibana-api/config.toml`
//! - **macOS**: `~/Library/Application Support/kibana-api/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\kibana-api\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! default_profile = "local"
//!
//! [profiles.local]
//! url = "http://localhost:5601"
//! username = "elastic"
//! password = "changeme"
//!
//! [profiles.prod]
//! url = "https://kibana.example.com"
//! api_key = "VnVhQ2ZHY0JDZGJrUW0tZTVhT3g6dWkybHAyYXhUTm1zeWFrdzl0dk5udw=="
//! space = "security"
//! timeout_secs = 30
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `KIBANA_URL` | `url` |
//! | `KIBANA_API_KEY` | `api_key` |
//! | `KIBANA_USERNAME` | `username` |
//! | `KIBANA_PASSWORD` | `password` |
//! | `KIBANA_BEARER_TOKEN` | `bearer_token` |
//! | `KIBANA_SPACE` | `space` |
//! | `KIBANA_INSECURE` | `accept_invalid_certs` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kibana_api::api::ApiClient;
//! use kibana_api::config::Config;
//!
//! let config = Config::load()?.client_config(None)?;
//! let client = ApiClient::from_config(&config)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::Credentials;

/// Name of the directory holding the configuration file.
pub const CONFIG_DIR_NAME: &str = "kibana-api";

/// Saved connection profiles.
///
/// # Examples
///
/// ```rust
/// use kibana_api::config::{ClientConfig, Config};
///
/// let mut config = Config::default();
/// config.profiles.insert("local".into(), ClientConfig::default());
/// config.default_profile = Some("local".into());
///
/// let resolved = config.profile(None).unwrap();
/// assert_eq!(resolved.url, "http://localhost:5601");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Profile used when none is requested.
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Named connection profiles.
    #[serde(default)]
    pub profiles: HashMap<String, ClientConfig>,
}

impl Config {
    /// Loads the configuration file, or an empty configuration if none exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", CONFIG_DIR_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the named profile, or the default profile when `name` is `None`.
    ///
    /// With no profiles configured at all, the built-in defaults are returned.
    pub fn profile(&self, name: Option<&str>) -> Result<ClientConfig> {
        let name = name.or(self.default_profile.as_deref());
        match name {
            Some(name) => self
                .profiles
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Unknown profile '{}'", name)),
            None if self.profiles.len() == 1 => {
                Ok(self.profiles.values().next().cloned().unwrap_or_default())
            }
            None => Ok(ClientConfig::default()),
        }
    }

    /// Resolves a profile and applies environment overrides.
    pub fn client_config(&self, name: Option<&str>) -> Result<ClientConfig> {
        Ok(self.profile(name)?.with_env())
    }
}

/// Connection settings for one Kibana instance.
///
/// # Notes
///
/// - Credentials are picked in the order API key, bearer token, basic
/// - `url` may include a base path for Kibana served behind a proxy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Kibana base URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Encoded API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Basic auth username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic auth password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Space every request is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,

    /// Whole-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Custom `User-Agent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            username: None,
            password: None,
            bearer_token: None,
            space: None,
            timeout_secs: None,
            accept_invalid_certs: false,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Built-in defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("KIBANA_URL") {
            self.url = url;
        }
        if let Some(api_key) = non_empty("KIBANA_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(username) = non_empty("KIBANA_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = non_empty("KIBANA_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(token) = non_empty("KIBANA_BEARER_TOKEN") {
            self.bearer_token = Some(token);
        }
        if let Some(space) = non_empty("KIBANA_SPACE") {
            self.space = Some(space);
        }
        if let Some(insecure) = non_empty("KIBANA_INSECURE") {
            self.accept_invalid_certs = matches!(insecure.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// The credentials these settings describe, if any.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(key) = &self.api_key {
            return Some(Credentials::api_key(key.clone()));
        }
        if let Some(token) = &self.bearer_token {
            return Some(Credentials::bearer(token.clone()));
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials::basic(username.clone(), password.clone())),
            _ => None,
        }
    }

    /// The base URL after normalization.
    pub fn normalized_url(&self) -> String {
        normalize_url(&self.url)
    }
}
