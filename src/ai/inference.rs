use anyhow::{ensure, Context, Result};
use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::domain::{Classification, ClassificationResult};

const SYSTEM_INSTRUCTION: &str = r#"You are an expert SMS spam classifier. Your task is to analyze an SMS message and determine if it is spam or not. Respond ONLY with a JSON object that conforms to the provided schema. The classification must be exactly "Spam" or "Not Spam". The confidence is a number from 0.0 to 1.0."#;

pub fn generate_content_url(api_base: &Url, model: &str) -> Result<Url> {
    api_base
        .join(&format!("models/{model}:generateContent"))
        .with_context(|| format!("cannot build generateContent url for model {model}"))
}

pub fn build_request(content: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION.into(),
            }],
        },
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part {
                text: format!("Classify the following SMS message: \"{content}\""),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".into(),
            response_schema: classification_schema(),
        },
    }
}

fn classification_schema() -> Value {
    let labels: Vec<&str> = Classification::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "classification": {
                "type": "STRING",
                "description": "The classification of the message. Must be either \"Spam\" or \"Not Spam\".",
                "enum": labels,
            },
            "confidence": {
                "type": "NUMBER",
                "description": "A confidence score from 0.0 to 1.0 on the classification.",
            },
        },
        "required": ["classification", "confidence"],
    })
}

pub async fn parse_response(response: Response) -> Result<ClassificationResult> {
    let body = response.text().await?;
    parse_completion_body(&body)
}

/// Extracts the verdict from a raw `generateContent` body. Anything other than
/// an object with exactly a known label and a confidence in [0, 1] is an error.
pub fn parse_completion_body(body: &str) -> Result<ClassificationResult> {
    let completion: GenerateContentResponse =
        serde_json::from_str(body).context("classifier body is not a generateContent response")?;

    let text = completion
        .candidates
        .into_iter()
        .next()
        .context("classifier response did not contain any candidates")?
        .content
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .context("classifier response missing text part")?;

    let verdict: Verdict = serde_json::from_str(text.trim())
        .with_context(|| format!("classifier returned an unexpected shape: {text}"))?;

    ensure!(
        verdict.confidence.is_finite() && (0.0..=1.0).contains(&verdict.confidence),
        "classifier confidence {} is outside [0, 1]",
        verdict.confidence
    );

    Ok(ClassificationResult::new(
        verdict.classification,
        verdict.confidence,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Verdict {
    classification: Classification,
    confidence: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[cfg(test)]
pub(crate) fn completion_body(verdict_json: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": verdict_json }] },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_declares_strict_schema() {
        let request = serde_json::to_value(build_request("hello")).unwrap();
        let schema = &request["generationConfig"]["responseSchema"];
        assert_eq!(request["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            schema["properties"]["classification"]["enum"],
            json!(["Spam", "Not Spam"])
        );
        assert_eq!(schema["required"], json!(["classification", "confidence"]));
        assert_eq!(
            request["contents"][0]["parts"][0]["text"],
            "Classify the following SMS message: \"hello\""
        );
        assert!(request["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn endpoint_keeps_version_segment() {
        let base = Url::parse("https://generativelanguage.googleapis.com/v1beta/").unwrap();
        let url = generate_content_url(&base, "gemini-2.5-flash").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn parses_well_formed_verdict() {
        let body = completion_body(r#"  {"classification": "Spam", "confidence": 0.97}  "#);
        let result = parse_completion_body(&body).unwrap();
        assert_eq!(result, ClassificationResult::new(Classification::Spam, 0.97));
    }

    #[test]
    fn integer_confidence_is_numeric() {
        let body = completion_body(r#"{"classification": "Not Spam", "confidence": 1}"#);
        let result = parse_completion_body(&body).unwrap();
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn rejects_malformed_verdicts() {
        let cases = [
            r#"{"classification": "Spam"}"#,
            r#"{"confidence": 0.9}"#,
            r#"{"classification": "Maybe", "confidence": 0.9}"#,
            r#"{"classification": "Spam", "confidence": "0.9"}"#,
            r#"{"classification": "Spam", "confidence": 1.7}"#,
            r#"{"classification": "Spam", "confidence": 0.9, "reason": "link"}"#,
            "not json at all",
        ];
        for verdict in cases {
            let body = completion_body(verdict);
            assert!(parse_completion_body(&body).is_err(), "accepted {verdict}");
        }
    }

    #[test]
    fn rejects_empty_candidates() {
        assert!(parse_completion_body(r#"{"candidates": []}"#).is_err());
        assert!(parse_completion_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).is_err());
        assert!(parse_completion_body(r#"{"candidates": [{"content": {"parts": []}}]}"#).is_err());
    }
}
