// src/providers/mod.rs

use crate::errors::Result;

pub mod openai;

/// A chat-completion backend.
///
/// Note: We're not using async_trait here, so implementers must handle async directly.
pub trait CompletionProvider: Send + Sync {
    /// Sends one system + user message pair and returns the first choice's
    /// message content together with the call latency in milliseconds.
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl std::future::Future<Output = Result<(String, u64)>> + Send;
}
