// src/prompt.rs
use serde::Deserialize;

/// One analysis submission, passed through to the model verbatim.
///
/// No normalization or emptiness checks happen here; interpreting odd or
/// empty fields is the model's job.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub time_limit: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Fixed instruction sent as the system message on every call.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert algorithm analyst. \
Reply with ONLY a JSON object and no other text, markdown, or code fences. \
The object must use exactly these fields: \
{\"timeComplexity\": string, \"spaceComplexity\": string, \"explanation\": string, \
\"tlePrediction\": {\"willTLE\": \"Yes\" or \"No\", \"reason\": string}}. \
Base willTLE strictly on the supplied constraints and time limit.";

impl AnalysisRequest {
    /// Render the user message: the submitted inputs under labeled headings.
    pub fn user_prompt(&self) -> String {
        let mut prompt = String::new();
        if let Some(language) = &self.language {
            prompt.push_str(&format!("Language:\n{}\n\n", language));
        }
        prompt.push_str(&format!(
            "Code:\n{}\n\nConstraints:\n{}\n\nTime limit:\n{}",
            self.code, self.constraints, self.time_limit
        ));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            code: "for i in range(n): pass".to_string(),
            constraints: "1 <= n <= 10^5".to_string(),
            time_limit: "2".to_string(),
            language: language.map(|l| l.to_string()),
        }
    }

    #[test]
    fn test_user_prompt_headings() {
        let prompt = request(None).user_prompt();
        assert_eq!(
            prompt,
            "Code:\nfor i in range(n): pass\n\nConstraints:\n1 <= n <= 10^5\n\nTime limit:\n2"
        );
    }

    #[test]
    fn test_user_prompt_with_language() {
        let prompt = request(Some("python")).user_prompt();
        assert!(prompt.starts_with("Language:\npython\n\nCode:\n"));
        assert!(prompt.ends_with("Time limit:\n2"));
    }

    #[test]
    fn test_empty_fields_pass_through() {
        let req = AnalysisRequest {
            code: "x = 1".to_string(),
            constraints: String::new(),
            time_limit: String::new(),
            language: None,
        };
        assert_eq!(req.user_prompt(), "Code:\nx = 1\n\nConstraints:\n\n\nTime limit:\n");
    }

    #[test]
    fn test_system_instruction_names_every_field() {
        for field in [
            "timeComplexity",
            "spaceComplexity",
            "explanation",
            "tlePrediction",
            "willTLE",
            "reason",
        ] {
            assert!(SYSTEM_INSTRUCTION.contains(field), "missing {}", field);
        }
    }
}
