use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::provider::{ProviderId, local::DEFAULT_SEED};

/// Where the remote provider fetches from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,

    /// Whole-request timeout; reqwest's defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Listen address of `forecast-server`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// source = "remote"
/// seed = 101
///
/// [remote]
/// base_url = "http://127.0.0.1:3000/"
///
/// [server]
/// port = 3000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Forecast source id, "local" or "remote". Local when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Seed of the local generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { source: None, seed: DEFAULT_SEED, remote: None, server: ServerConfig::default() }
    }
}

impl Config {
    /// Return the configured source as a strongly-typed ProviderId.
    pub fn source_id(&self) -> Result<ProviderId> {
        match self.source.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::Local),
        }
    }

    pub fn set_source(&mut self, id: ProviderId) {
        self.source = Some(id.as_str().to_string());
    }

    /// Set the remote base URL, keeping any configured timeout.
    pub fn set_remote_base_url(&mut self, base_url: impl Into<String>) {
        let base_url = base_url.into();
        match self.remote.as_mut() {
            Some(remote) => remote.base_url = base_url,
            None => self.remote = Some(RemoteConfig { base_url, timeout_secs: None }),
        }
    }

    pub fn remote_base_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.base_url.as_str())
    }

    /// Load config from the platform location, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
