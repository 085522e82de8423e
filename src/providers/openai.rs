// src/providers/openai.rs

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::OpenAiConfig;
use crate::errors::{AnalysisError, Result};
use crate::providers::CompletionProvider;

/// A provider for OpenAI-compatible chat-completion endpoints.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(client: Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }
}

impl CompletionProvider for OpenAiProvider {
    /// Calls the chat-completion API and returns the reply text and latency.
    async fn complete(&self, system: &str, user: &str) -> Result<(String, u64)> {
        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));

        println!("📡 Calling completion endpoint: {} with model: {}", url, self.config.model);

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        let start = Instant::now();

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        println!("📥 Completion response status: {} ({}ms)", status, latency_ms);

        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(AnalysisError::ApiError {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let chat_resp: ChatResponse = resp.json().await?;

        let output = chat_resp
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| AnalysisError::UnexpectedResponse("No choices in response".to_string()))?;

        if output.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        Ok((output, latency_ms))
    }
}
