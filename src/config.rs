// src/config.rs
use crate::errors::{AnalysisError, Result};

/// Configuration for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing `OPENAI_API_KEY` is a configuration error surfaced here,
    /// at startup, never as a network failure mid-request.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AnalysisError::Config(
                "No completion provider configured. Please set OPENAI_API_KEY.".to_string(),
            )
        })?;
        if api_key.trim().is_empty() {
            return Err(AnalysisError::Config(
                "OPENAI_API_KEY is set but empty.".to_string(),
            ));
        }

        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(AppConfig {
            openai: OpenAiConfig {
                api_base,
                api_key,
                model,
            },
        })
    }
}
