//! Process configuration, read once at startup and passed down explicitly.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;

pub const MAPS_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const LLM_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const LLM_MODEL_VAR: &str = "FLEET_LLM_MODEL";
pub const LLM_MAX_TOKENS_VAR: &str = "FLEET_LLM_MAX_TOKENS";
pub const LLM_TIMEOUT_VAR: &str = "FLEET_LLM_TIMEOUT_SECS";
pub const MAPS_TIMEOUT_VAR: &str = "FLEET_MAPS_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct MapsConfig {
    pub base_url: String,
    /// Absent key selects the straight-line fallback; it is not an error.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Whole-request timeout, streamed body included. Defaults to 120 s
    /// rather than the 10 s used for maps calls, since a full completion
    /// routinely streams for longer than that.
    pub timeout_secs: u64,
    /// Request a server-sent event stream and forward text as it arrives.
    pub stream: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            api_key: None,
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 2048,
            timeout_secs: 120,
            stream: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub maps: MapsConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Reads the process environment, then `.env` in the working directory
    /// for anything the environment leaves unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_and_file(Path::new(".env"))
    }

    pub fn from_env_and_file(path: &Path) -> Result<Self, ConfigError> {
        let file = read_env_file(path);
        Self::from_lookup(|name| {
            env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .or_else(|| file.get(name).cloned())
        })
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        config.maps.api_key = non_empty(MAPS_API_KEY_VAR);
        if let Some(value) = non_empty(MAPS_TIMEOUT_VAR) {
            config.maps.timeout_secs = parse_positive(MAPS_TIMEOUT_VAR, &value)?;
        }

        config.llm.api_key = non_empty(LLM_API_KEY_VAR);
        if let Some(model) = non_empty(LLM_MODEL_VAR) {
            config.llm.model = model;
        }
        if let Some(value) = non_empty(LLM_MAX_TOKENS_VAR) {
            config.llm.max_tokens = parse_positive(LLM_MAX_TOKENS_VAR, &value)? as u32;
        }
        if let Some(value) = non_empty(LLM_TIMEOUT_VAR) {
            config.llm.timeout_secs = parse_positive(LLM_TIMEOUT_VAR, &value)?;
        }

        Ok(config)
    }
}

/// Variables from a dotenv file; a missing file is empty.
fn read_env_file(path: &Path) -> HashMap<String, String> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) => {
            if !err.not_found() {
                warn!(path = %path.display(), error = %err, "ignoring unreadable env file");
            }
            return HashMap::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping malformed env file line");
                None
            }
        })
        .collect()
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 && parsed <= u64::from(u32::MAX) => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}
