//! Configuration management for Rewrite Studio.
//!
//! Loads settings from a TOML file (STUDIO_CONFIG, or /etc/rewrite-studio/config.toml
//! when present), then applies environment overrides. The API key normally comes
//! from OPENAI_API_KEY.

use crate::error::ConfigError;
use crate::redact::mask_secret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file path
pub const CONFIG_PATH: &str = "/etc/rewrite-studio/config.toml";

/// Environment variable naming an alternate config file
pub const CONFIG_PATH_ENV: &str = "STUDIO_CONFIG";

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const ENDPOINT_ENV: &str = "OPENAI_BASE_URL";
pub const BIND_ADDR_ENV: &str = "STUDIO_BIND_ADDR";

/// Provider credential. Never printed in full and never serialized.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the web UI
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Request body cap for form and JSON submissions
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_body_bytes() -> usize {
    256 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing)]
    pub api_key: Option<ApiKey>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl LlmConfig {
    /// The configured credential, or the fatal startup error
    pub fn require_api_key(&self) -> Result<&ApiKey, ConfigError> {
        self.api_key.as_ref().ok_or(ConfigError::MissingApiKey)
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Load from the config file (if any) and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|name| std::env::var(name).ok(), Path::new(CONFIG_PATH))
    }

    /// Load using an explicit environment lookup and fallback file path
    pub fn load_with<F>(lookup: F, default_path: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path(&lookup, default_path) {
            Some(path) => Self::load_from_path(&path)?,
            None => {
                info!("No config file found, using defaults");
                Config::default()
            }
        };
        config.apply_env(&lookup);
        Ok(config)
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path_str.clone(),
            source,
        })?;
        info!("Loaded config from {}", path_str);
        Ok(config)
    }

    /// Apply environment overrides. Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.llm.api_key = Some(ApiKey::new(key.trim()));
        }
        if let Some(model) = get(MODEL_ENV) {
            self.llm.model = model;
        }
        if let Some(endpoint) = get(ENDPOINT_ENV) {
            self.llm.endpoint = endpoint;
        }
        if let Some(addr) = get(BIND_ADDR_ENV) {
            self.server.bind_addr = addr;
        }
    }
}

/// Config file to read: STUDIO_CONFIG when set, else `default_path` if it exists
pub fn config_path<F>(lookup: F, default_path: &Path) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    default_path.exists().then(|| default_path.to_path_buf())
}
