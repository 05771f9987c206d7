//! Troubleshooting input and the typed diagnosis parsed from a completion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

/// A customer's description of a device problem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
}

impl IssueReport {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the device type and model.
    pub fn device(mut self, device_type: impl Into<String>, device_model: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self.device_model = Some(device_model.into());
        self
    }

    /// "Laptop (ThinkPad X1)", "Laptop", or "device" when nothing is known.
    pub fn device_label(&self) -> String {
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        match (non_blank(&self.device_type), non_blank(&self.device_model)) {
            (Some(kind), Some(model)) => format!("{} ({})", kind, model),
            (Some(kind), None) => kind,
            (None, Some(model)) => model,
            (None, None) => "device".to_string(),
        }
    }
}

/// How hard the repair is for a customer to attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse loosely; anything unrecognised is `Medium`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "easy" | "beginner" | "simple" => Difficulty::Easy,
            "hard" | "difficult" | "advanced" | "expert" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// A troubleshooting answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub diagnosis: String,
    /// Confidence from 0 to 100.
    pub confidence: u8,
    pub steps: Vec<String>,
    /// Whether the customer should bring the device in.
    pub escalate: bool,
    pub estimated_time: String,
    pub difficulty: Difficulty,
}

/// Lenient shape of the model's JSON. Only `diagnosis` and `steps` are
/// required after parsing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiagnosis {
    diagnosis: Option<String>,
    confidence: Option<f64>,
    steps: Option<Vec<String>>,
    escalate: Option<bool>,
    estimated_time: Option<String>,
    difficulty: Option<String>,
}

/// Remove a surrounding markdown code fence (```` ```json ... ``` ````).
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse a model completion into a [`Diagnosis`].
///
/// Fails with [`AssistantError::MalformedResponse`] when the text is not a
/// JSON object, `diagnosis` is missing or blank, or `steps` is not an array
/// of strings.
pub fn parse_diagnosis(text: &str) -> Result<Diagnosis, AssistantError> {
    let body = strip_code_fences(text);
    let raw: RawDiagnosis = serde_json::from_str(body)
        .map_err(|e| AssistantError::MalformedResponse(format!("invalid diagnosis JSON: {}", e)))?;

    let diagnosis = raw
        .diagnosis
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AssistantError::MalformedResponse("missing diagnosis".to_string()))?;

    let steps = raw
        .steps
        .ok_or_else(|| AssistantError::MalformedResponse("missing steps array".to_string()))?;

    let confidence = raw
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(50);

    Ok(Diagnosis {
        diagnosis,
        confidence,
        steps,
        escalate: raw.escalate.unwrap_or(false),
        estimated_time: raw
            .estimated_time
            .unwrap_or_else(|| "unknown".to_string()),
        difficulty: raw
            .difficulty
            .as_deref()
            .map(Difficulty::parse_lenient)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "diagnosis": "Failing battery",
        "confidence": 82.4,
        "steps": ["Check the charger", "Run a battery report"],
        "escalate": true,
        "estimatedTime": "30 minutes",
        "difficulty": "Easy"
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let d = parse_diagnosis(WELL_FORMED).unwrap();
        assert_eq!(d.diagnosis, "Failing battery");
        assert_eq!(d.confidence, 82);
        assert_eq!(d.steps.len(), 2);
        assert!(d.escalate);
        assert_eq!(d.estimated_time, "30 minutes");
        assert_eq!(d.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", WELL_FORMED);
        assert_eq!(
            parse_diagnosis(&fenced).unwrap(),
            parse_diagnosis(WELL_FORMED).unwrap()
        );

        let bare_fence = format!("```\n{}\n```", WELL_FORMED);
        assert!(parse_diagnosis(&bare_fence).is_ok());
    }

    #[test]
    fn test_optional_fields_default() {
        let d = parse_diagnosis(r#"{"diagnosis": "Loose cable", "steps": []}"#).unwrap();
        assert_eq!(d.confidence, 50);
        assert!(!d.escalate);
        assert_eq!(d.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let d = parse_diagnosis(r#"{"diagnosis": "x", "steps": [], "confidence": 250}"#).unwrap();
        assert_eq!(d.confidence, 100);
    }

    #[test]
    fn test_malformed_responses() {
        for text in [
            "I think it's the battery.",
            r#"{"steps": ["a"]}"#,
            r#"{"diagnosis": "   ", "steps": ["a"]}"#,
            r#"{"diagnosis": "x"}"#,
            r#"{"diagnosis": "x", "steps": "reboot"}"#,
            "",
        ] {
            assert!(
                matches!(parse_diagnosis(text), Err(AssistantError::MalformedResponse(_))),
                "expected malformed: {:?}",
                text
            );
        }
    }

    #[test]
    fn test_device_label() {
        assert_eq!(IssueReport::new("x").device_label(), "device");
        assert_eq!(
            IssueReport::new("x").device("Laptop", "X1").device_label(),
            "Laptop (X1)"
        );
    }
}
