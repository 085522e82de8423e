// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("Received empty text response from model")]
    EmptyResponse,

    #[error("Malformed analysis reply: {reason}")]
    MalformedReply { reason: String },
}

impl AnalysisError {
    /// Stable kind label used in API error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Config(_) => "configuration",
            AnalysisError::Request(_)
            | AnalysisError::ApiError { .. }
            | AnalysisError::UnexpectedResponse(_)
            | AnalysisError::EmptyResponse => "transport",
            AnalysisError::MalformedReply { .. } => "malformed_reply",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
