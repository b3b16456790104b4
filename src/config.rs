// SPDX-License-Identifier: MPL-2.0
//! Application configuration, persisted as `settings.toml` under the
//! platform config directory.
//!
//! The backend base URL is resolved in priority order: CLI flag, the
//! `AIRLENS_BASE_URL` environment variable, the config file, and finally the
//! compiled default.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "AirLens";

/// Environment variable overriding the backend base URL.
pub const ENV_BASE_URL: &str = "AIRLENS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, e.g. `http://127.0.0.1:5000`.
    pub base_url: Option<String>,
    /// Seconds between automatic reloads of the current query.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

impl Config {
    /// The effective poll interval in seconds.
    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Resolves the backend base URL from, in order: the CLI flag, the
/// `AIRLENS_BASE_URL` environment variable, the config file, the default.
pub fn resolve_base_url(flag: Option<String>, config: &Config) -> String {
    if let Some(url) = flag {
        return url;
    }
    if let Ok(url) = std::env::var(ENV_BASE_URL) {
        if !url.is_empty() {
            return url;
        }
    }
    config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
