use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::casing::CasingStyle;
use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "llama3.2-vision";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// General naming configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub case: CasingStyle,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

/// Connection settings for the local Ollama server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Top-level application config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            case: CasingStyle::default(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load the app configuration, creating a default file if needed.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&config_path())
    }

    /// Load config from the provided path, creating a default file on first run.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.is_file() {
            let contents = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
                path: path.to_path_buf(),
                source,
            })?;
            return toml::from_str(&contents).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            });
        }

        let default_config = Self::default();
        default_config.save_to_path(path)?;
        Ok(default_config)
    }

    /// Save config to the provided path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::ConfigIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = toml::to_string_pretty(self).map_err(Error::ConfigSerialize)?;
        fs::write(path, serialized).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the config file path, respecting XDG and env overrides.
pub fn config_path() -> PathBuf {
    resolve_config_path_from_values(
        std::env::var_os("SMARTNAME_CONFIG").map(PathBuf::from),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_text_chars() -> usize {
    2_000
}

fn default_timeout_secs() -> u64 {
    15
}

fn resolve_config_path_from_values(
    smartname_config: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = smartname_config {
        return path;
    }

    if let Some(path) = xdg_config_home {
        return path.join("smartname").join("config.toml");
    }

    if let Some(path) = home {
        return path.join(".config").join("smartname").join("config.toml");
    }

    PathBuf::from(".config").join("smartname").join("config.toml")
}
