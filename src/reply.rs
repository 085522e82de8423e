// src/reply.rs
use regex::Regex;

use crate::errors::{AnalysisError, Result};
use crate::schema::{self, AnalysisResult};

/// Strip one surrounding triple-backtick fence (with optional language tag)
/// and any leading/trailing whitespace. Text without a fence is only trimmed.
pub fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let fence = Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)\r?\n?```$").unwrap();
    match fence.captures(trimmed) {
        Some(caps) => caps[1].trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Decode a raw model reply into a validated [`AnalysisResult`].
///
/// Decoding is strict: after fence stripping the remainder must be a single
/// well-formed JSON object. No partial recovery is attempted on failure;
/// scraping fields out of arbitrary text risks fabricating a result.
pub fn parse_reply(raw: &str) -> Result<AnalysisResult> {
    let cleaned = strip_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(|e| AnalysisError::MalformedReply {
            reason: format!("reply is not valid JSON: {}", e),
        })?;
    schema::validate(&value)
}
