use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::llm::OpenAICompatibleProvider;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

// ============================================================================
// Config
// ============================================================================

/// Credential and endpoint for the completion provider.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Resolve the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(default_base_url);

        Ok(Self { api_key, base_url })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn default_base_url() -> String {
    OpenAICompatibleProvider::DEFAULT_BASE_URL.to_string()
}

// ============================================================================
// .env loading
// ============================================================================

/// Load variables from a `.env` file into the process environment.
///
/// Without a path, `.env` is looked up from the working directory upwards and
/// a missing file is not an error. An explicit path must exist.
/// Variables already set in the environment are left untouched.
pub fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => {
            dotenv::from_path(path)?;
            debug!(path = %path.display(), "Loaded env file");
        }
        None => match dotenv::dotenv() {
            Ok(found) => debug!(path = %found.display(), "Loaded env file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(ConfigError::EnvFile(e)),
        },
    }
    Ok(())
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenv::Error),
}

// ============================================================================
// Tests
// ============================================================================
