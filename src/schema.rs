// src/schema.rs
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::{AnalysisError, Result};

/// A fully validated analysis outcome. Only ever constructed from a reply
/// that passed [`validate`]; no field is defaulted or back-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "timeComplexity")]
    pub time_complexity: String,
    #[serde(rename = "spaceComplexity")]
    pub space_complexity: String,
    pub explanation: String,
    #[serde(rename = "tlePrediction")]
    pub tle_prediction: TlePrediction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TlePrediction {
    #[serde(rename = "willTLE")]
    pub will_tle: TleVerdict,
    pub reason: String,
}

/// The model's verdict on whether the code would exceed the time limit.
///
/// The wire value is a string, not a boolean, and the model's casing is not
/// guaranteed, so decoding is case-insensitive. Serializes back as exactly
/// "Yes" / "No".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TleVerdict {
    Yes,
    No,
}

impl TleVerdict {
    fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Some(TleVerdict::Yes),
            "no" => Some(TleVerdict::No),
            _ => None,
        }
    }
}

impl std::fmt::Display for TleVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TleVerdict::Yes => write!(f, "Yes"),
            TleVerdict::No => write!(f, "No"),
        }
    }
}

impl Serialize for TleVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

fn string_field<'a>(obj: &'a Value, field: &str, problems: &mut Vec<String>) -> Option<&'a str> {
    match obj.get(field) {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            problems.push(format!("field `{}` is not a string", field));
            None
        }
        None => {
            problems.push(format!("missing field `{}`", field));
            None
        }
    }
}

/// Check a decoded reply against the expected shape and build the typed
/// result. All-or-nothing: every problem found is reported and no partial
/// result is ever returned.
pub fn validate(value: &Value) -> Result<AnalysisResult> {
    let mut problems = Vec::new();

    if !value.is_object() {
        return Err(AnalysisError::MalformedReply {
            reason: "reply is not a JSON object".to_string(),
        });
    }

    let time_complexity = string_field(value, "timeComplexity", &mut problems);
    let space_complexity = string_field(value, "spaceComplexity", &mut problems);
    let explanation = string_field(value, "explanation", &mut problems);

    for (field, text) in [
        ("timeComplexity", time_complexity),
        ("spaceComplexity", space_complexity),
        ("explanation", explanation),
    ] {
        if let Some(text) = text {
            if text.trim().is_empty() {
                problems.push(format!("field `{}` is empty", field));
            }
        }
    }

    let mut will_tle = None;
    let mut reason = None;
    match value.get("tlePrediction") {
        Some(prediction) if prediction.is_object() => {
            if let Some(raw) = string_field(prediction, "willTLE", &mut problems) {
                match TleVerdict::from_str(raw) {
                    Some(verdict) => will_tle = Some(verdict),
                    None => problems.push(format!(
                        "field `tlePrediction.willTLE` must be Yes or No, got {:?}",
                        raw
                    )),
                }
            }
            reason = string_field(prediction, "reason", &mut problems).map(|s| s.to_string());
        }
        Some(_) => problems.push("field `tlePrediction` is not an object".to_string()),
        None => problems.push("missing field `tlePrediction`".to_string()),
    }

    match (time_complexity, space_complexity, explanation, will_tle, reason) {
        (Some(time), Some(space), Some(explanation), Some(will_tle), Some(reason))
            if problems.is_empty() =>
        {
            Ok(AnalysisResult {
                time_complexity: time.to_string(),
                space_complexity: space.to_string(),
                explanation: explanation.to_string(),
                tle_prediction: TlePrediction { will_tle, reason },
            })
        }
        _ => Err(AnalysisError::MalformedReply {
            reason: problems.join("; "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn well_formed() -> Value {
        json!({
            "timeComplexity": "O(n^2)",
            "spaceComplexity": "O(1)",
            "explanation": "Nested loops over the input.",
            "tlePrediction": {"willTLE": "Yes", "reason": "10^10 operations"}
        })
    }

    #[test]
    fn test_validate_well_formed() {
        let result = validate(&well_formed()).unwrap();
        assert_eq!(result.time_complexity, "O(n^2)");
        assert_eq!(result.space_complexity, "O(1)");
        assert_eq!(result.tle_prediction.will_tle, TleVerdict::Yes);
        assert_eq!(result.tle_prediction.reason, "10^10 operations");
    }

    #[test]
    fn test_validate_tolerates_verdict_casing() {
        for raw in ["yes", "YES", "Yes", " yes "] {
            let mut value = well_formed();
            value["tlePrediction"]["willTLE"] = json!(raw);
            let result = validate(&value).unwrap();
            assert_eq!(result.tle_prediction.will_tle, TleVerdict::Yes);
        }
        let mut value = well_formed();
        value["tlePrediction"]["willTLE"] = json!("no");
        assert_eq!(validate(&value).unwrap().tle_prediction.will_tle, TleVerdict::No);
    }

    #[test]
    fn test_validate_rejects_unknown_verdict() {
        let mut value = well_formed();
        value["tlePrediction"]["willTLE"] = json!("maybe");
        let err = validate(&value).unwrap_err();
        assert!(err.to_string().contains("tlePrediction.willTLE"));
    }

    #[test]
    fn test_validate_names_every_missing_field() {
        let err = validate(&json!({"explanation": "just this"})).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing field `timeComplexity`"));
        assert!(message.contains("missing field `spaceComplexity`"));
        assert!(message.contains("missing field `tlePrediction`"));
    }

    #[test]
    fn test_validate_rejects_missing_nested_reason() {
        let mut value = well_formed();
        value["tlePrediction"].as_object_mut().unwrap().remove("reason");
        let err = validate(&value).unwrap_err();
        assert!(err.to_string().contains("missing field `reason`"));
    }

    #[test]
    fn test_validate_rejects_missing_nested_verdict() {
        let mut value = well_formed();
        value["tlePrediction"].as_object_mut().unwrap().remove("willTLE");
        let err = validate(&value).unwrap_err();
        assert!(err.to_string().contains("missing field `willTLE`"));
    }

    #[test]
    fn test_validate_rejects_wrong_types() {
        let mut value = well_formed();
        value["explanation"] = json!(42);
        let err = validate(&value).unwrap_err();
        assert!(err.to_string().contains("field `explanation` is not a string"));
    }

    #[test]
    fn test_validate_rejects_empty_complexity() {
        let mut value = well_formed();
        value["timeComplexity"] = json!("   ");
        let err = validate(&value).unwrap_err();
        assert!(err.to_string().contains("field `timeComplexity` is empty"));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        assert!(validate(&json!("I cannot analyze this.")).is_err());
        assert!(validate(&json!(["timeComplexity"])).is_err());
    }

    #[test]
    fn test_verdict_serializes_canonically() {
        assert_eq!(serde_json::to_string(&TleVerdict::Yes).unwrap(), "\"Yes\"");
        assert_eq!(serde_json::to_string(&TleVerdict::No).unwrap(), "\"No\"");
    }
}
