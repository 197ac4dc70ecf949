//! Configuration — an explicit struct handed to each component, loaded
//! from an optional `tfpilot.toml`. A missing file means defaults; the
//! API key may also come from the environment.

use crate::core::error::Error;
use crate::core::types::{DEFINITION_FILE, STATE_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when `api.key` is unset.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Working directory holding the definition file and state artifact
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Terraform binary to invoke (name or path)
    #[serde(default = "default_terraform_bin")]
    pub terraform_bin: String,

    /// Completion API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Remote completion API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Chat-completions endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to the OPENAI_API_KEY env var when unset
    #[serde(default)]
    pub key: Option<String>,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from("workspace")
}

fn default_terraform_bin() -> String {
    "terraform".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: default_working_dir(),
            terraform_bin: default_terraform_bin(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            key: None,
        }
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Path of the definition file inside the working directory.
    pub fn definition_path(&self) -> PathBuf {
        self.working_dir.join(DEFINITION_FILE)
    }

    /// Path of the state artifact inside the working directory.
    pub fn state_path(&self) -> PathBuf {
        self.working_dir.join(STATE_FILE)
    }
}

impl ApiConfig {
    /// Resolve the API key: explicit config value first, then environment.
    pub fn resolve_key(&self) -> Option<String> {
        self.key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }
}
