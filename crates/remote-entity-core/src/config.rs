//! Application configuration management.
//!
//! Configuration names the two remote endpoints, picks where the bearer token
//! is persisted, and remembers the last username that logged in.
//!
//! Configuration is stored at `~/.config/remote-entity/config.json`.
//! Environment variables override the file (see [`Config::apply_env`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "remote-entity";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default REST auth backend
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:8080";

/// Default SOAP todo endpoint
pub const DEFAULT_SOAP_URL: &str = "http://localhost:8080/ws/todo";

const ENV_AUTH_URL: &str = "REMOTE_ENTITY_AUTH_URL";
const ENV_SOAP_URL: &str = "REMOTE_ENTITY_SOAP_URL";
const ENV_TOKEN_STORAGE: &str = "REMOTE_ENTITY_TOKEN_STORAGE";

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    /// Plain-text file in the data directory
    #[default]
    File,
    /// OS keychain
    Keyring,
}

impl std::str::FromStr for TokenStorage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(TokenStorage::File),
            "keyring" => Ok(TokenStorage::Keyring),
            other => Err(anyhow::anyhow!("Unknown token storage: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth_base_url: String,
    pub soap_url: String,
    pub token_storage: TokenStorage,
    pub request_timeout_secs: Option<u64>,
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            soap_url: DEFAULT_SOAP_URL.to_string(),
            token_storage: TokenStorage::default(),
            request_timeout_secs: None,
            last_username: None,
        }
    }
}

impl Config {
    /// Load the config file (or defaults) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::read_file(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Remember the last username that logged in.
    ///
    /// Only `last_username` is written back; the rest of the file is kept as
    /// it was on disk so environment overrides never become persistent.
    pub fn remember_username(&mut self, username: &str) -> Result<()> {
        self.last_username = Some(username.to_string());
        Self::record_username_at(&Self::config_path()?, username)
    }

    fn record_username_at(path: &Path, username: &str) -> Result<()> {
        let mut stored = Self::read_file(path)?;
        stored.last_username = Some(username.to_string());
        stored.write_file(path)
    }

    fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Override fields from the environment. `lookup` is injected so tests
    /// don't have to mutate the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_AUTH_URL).filter(|v| !v.trim().is_empty()) {
            self.auth_base_url = url;
        }
        if let Some(url) = lookup(ENV_SOAP_URL).filter(|v| !v.trim().is_empty()) {
            self.soap_url = url;
        }
        if let Some(storage) = lookup(ENV_TOKEN_STORAGE).filter(|v| !v.trim().is_empty()) {
            self.token_storage = storage.parse()?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the token file
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
