//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::llm::{RetryPolicy, TimeoutPolicy};
use crate::APP_NAME;

/// Environment variable overriding `llm.endpoint`
pub const LLM_API_URL_ENV: &str = "LLM_API_URL";

/// Environment variable overriding `llm.api_key`
pub const LLM_API_KEY_ENV: &str = "LLM_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM endpoint settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Retry policy for LLM calls
    #[serde(default)]
    pub retry: RetrySettings,

    /// Request timeout policy for LLM calls
    #[serde(default)]
    pub timeout: TimeoutSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the transcript database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Chat completion endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// Bearer credential for the endpoint
    #[serde(default)]
    pub api_key: String,

    /// Model name sent with every request
    #[serde(default = "default_llm_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in seconds
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: f64,

    /// Upper bound for any single backoff delay, in seconds
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutSettings {
    /// Lower bound for the request timeout, in seconds
    #[serde(default = "default_min_timeout_secs")]
    pub min_secs: u64,

    /// Estimated tokens per whitespace-separated word
    #[serde(default = "default_tokens_per_word")]
    pub tokens_per_word: f64,

    /// Processing time budget per token, in seconds
    #[serde(default = "default_secs_per_token")]
    pub secs_per_token: f64,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/recap"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_model() -> String {
    "mixtral".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_secs() -> f64 {
    5.0
}

fn default_max_delay_secs() -> f64 {
    60.0
}

fn default_min_timeout_secs() -> u64 {
    60
}

fn default_tokens_per_word() -> f64 {
    1.3
}

fn default_secs_per_token() -> f64 {
    0.04
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            model: default_llm_model(),
        }
    }
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            min_secs: default_min_timeout_secs(),
            tokens_per_word: default_tokens_per_word(),
            secs_per_token: default_secs_per_token(),
        }
    }
}

impl RetrySettings {
    /// Build the retry policy used by the LLM client.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            secs_to_duration(self.base_delay_secs),
            secs_to_duration(self.max_delay_secs),
        )
    }
}

impl TimeoutSettings {
    /// Build the timeout policy used by the LLM client.
    pub fn policy(&self) -> TimeoutPolicy {
        TimeoutPolicy {
            min_secs: self.min_secs,
            tokens_per_word: self.tokens_per_word,
            secs_per_token: self.secs_per_token,
        }
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or_default()
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load settings from a specific file, falling back to defaults when it is absent
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(LLM_API_URL_ENV) {
            self.llm.endpoint = url;
        }
        if let Some(key) = non_empty_env(LLM_API_KEY_ENV) {
            self.llm.api_key = key;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render settings as TOML with the credential masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.llm.api_key = redact(&self.llm.api_key).to_string();
        Ok(toml::to_string_pretty(&shown)?)
    }

    /// Get the database path
    pub fn database_path(&self) -> PathBuf {
        self.general.data_dir.join("recap.db")
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
