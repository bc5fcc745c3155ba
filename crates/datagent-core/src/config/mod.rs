//! Configuration module for datagent.
//!
//! Configuration is read from a TOML file; every field has a default so an
//! empty file (or no file) is valid.

use std::path::Path;

use datagent_abstraction::GenerationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::hook::DEFAULT_HOOK_NAME;

/// Environment variable that overrides the model ID.
pub const MODEL_ENV_VAR: &str = "ROOT_AGENT_MODEL";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Response cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Whether the SQL cache hook is installed.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Registration name of the cache hook.
    #[serde(default = "default_hook_name")]
    pub hook_name: String,
    /// Hook priority (higher runs first).
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_true() -> bool {
    true
}

fn default_hook_name() -> String {
    DEFAULT_HOOK_NAME.to_string()
}

fn default_priority() -> u32 {
    100
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            hook_name: default_hook_name(),
            priority: default_priority(),
        }
    }
}

/// Model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// The model ID (e.g., "gemini-2.5-flash").
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Sampling temperature. SQL generation wants near-deterministic output.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_model_id() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.01
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            temperature: default_temperature(),
        }
    }
}

impl ModelSettings {
    /// Generation parameters to attach to requests.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: Some(self.temperature),
            ..GenerationConfig::default()
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Root configuration for datagent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Response cache configuration.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Model configuration.
    #[serde(default)]
    pub model: ModelSettings,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let location = path.display();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{location}: {e}")))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(format!("{location}: {e}")))
    }

    /// Load configuration from an optional file, then apply environment
    /// overrides and validate.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(model_id) = lookup(MODEL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.model.model_id = model_id;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cache.hook_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "cache.hook_name cannot be empty".to_string(),
            ));
        }

        if self.model.model_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "model.model_id cannot be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::InvalidValue(format!(
                "model.temperature must be between 0 and 2, got {}",
                self.model.temperature
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "logging.level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
