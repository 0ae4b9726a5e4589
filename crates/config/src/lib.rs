//! Configuration loading and validation for deckproof.
//!
//! The review loop takes an explicit [`ReviewConfig`] value — there is no
//! process-wide mutable configuration. Settings come from an optional TOML
//! file with environment-variable overrides; the API credential is only
//! ever read from the process environment.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the required API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing credential: set the {API_KEY_VAR} environment variable")]
    MissingApiKey,
}

/// Settings for one review run.
#[derive(Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Model driving the review loop and the text analysis
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for the review loop
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per model response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Hard budget on loop iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout for model calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Bounded retry attempts for transient model-call failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// API credential; only ever populated from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "gpt-4o".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_iterations() -> u32 {
    20
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_max_retries() -> u32 {
    3
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            max_iterations: default_max_iterations(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ReviewConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_iterations", &self.max_iterations)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field(
                "api_key",
                &match self.api_key {
                    Some(_) => "[REDACTED]",
                    None => "None",
                },
            )
            .finish()
    }
}

impl ReviewConfig {
    /// Load configuration: defaults, then the optional TOML file, then
    /// environment overrides, then validation.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        debug!(?config, "Loaded review configuration");
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply environment overrides through a lookup function.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(model) = get("DECKPROOF_MODEL") {
            self.model = model;
        }
        if let Some(url) = get("DECKPROOF_BASE_URL") {
            self.base_url = url;
        }
        if let Some(max) = get("DECKPROOF_MAX_ITERATIONS")
            && let Ok(max) = max.trim().parse()
        {
            self.max_iterations = max;
        }
        if let Some(temp) = get("DECKPROOF_TEMPERATURE")
            && let Ok(temp) = temp.trim().parse()
        {
            self.temperature = temp;
        }
        if let Some(key) = get(API_KEY_VAR) {
            self.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The API credential, or the error the run aborts with before the loop
    /// starts.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
