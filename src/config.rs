use std::env;
use thiserror::Error;

use crate::processing::chunking::DEFAULT_CHUNK_SIZE;

/// Default base URL for the OpenAI-compatible chat-completion API.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Model used for annotations when `GRAMMAR_NOTES_MODEL` is unset.
pub const DEFAULT_ANNOTATION_MODEL: &str = "gpt-4o-mini";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for a grammar-notes run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token sent to the chat-completion API.
    pub openai_api_key: String,
    /// Base URL of the chat-completion API, without the `/chat/completions` suffix.
    pub openai_base_url: String,
    /// Model identifier passed with every annotation request.
    pub annotation_model: String,
    /// Number of sentences sent per annotation request.
    pub chunk_size: usize,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let chunk_size = optional("GRAMMAR_NOTES_CHUNK_SIZE")
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| ConfigError::InvalidValue("GRAMMAR_NOTES_CHUNK_SIZE".into()))
            })
            .transpose()?
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        Ok(Self {
            openai_api_key: optional("OPENAI_API_KEY")
                .ok_or_else(|| ConfigError::MissingVariable("OPENAI_API_KEY".into()))?,
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            annotation_model: optional("GRAMMAR_NOTES_MODEL")
                .unwrap_or_else(|| DEFAULT_ANNOTATION_MODEL.to_string()),
            chunk_size,
        })
    }
}

/// Load `.env` (when present) and then read configuration from the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        base_url = %config.openai_base_url,
        model = %config.annotation_model,
        chunk_size = config.chunk_size,
        "Loaded configuration"
    );
    Ok(config)
}
