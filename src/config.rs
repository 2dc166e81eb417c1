// Configuration: where the census API lives and which key to send.
//
// Values come from an optional JSON file, then the environment, with the
// binary's flags applied on top. Nothing is required; without a key the
// request simply omits the `key` parameter.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "CENSUS_API_KEY";
pub const BASE_URL_VAR: &str = "CENSUS_API_URL";

/// Shape of `config.json`. Every field is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Parse a config file at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Parsing config file {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Config {
    /// Load configuration from `explicit` (which must exist) or the default
    /// config path (skipped when absent), then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => FileConfig::read(path)?,
            None => match default_path() {
                Some(path) if path.exists() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };
        Ok(Self::resolve(file, |name| std::env::var(name).ok()))
    }

    /// Merge file values with variables returned by `env`; non-empty
    /// variables win.
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        Config {
            api_key: env(API_KEY_VAR).or(file.api_key),
            base_url: env(BASE_URL_VAR)
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        }
    }
}

/// `<config dir>/population-generator/config.json`, if the platform has a
/// config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("population-generator").join("config.json"))
}
