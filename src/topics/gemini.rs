// Google Gemini structured-output implementation.
//
// Uses the generateContent endpoint with `responseMimeType` set to JSON and
// a `responseSchema`, so the reply text is a JSON document in the declared
// shape. Temperature is pinned to 0 so repeated runs over the same comments
// land on the same topics.
//
// API docs: https://ai.google.dev/api/generate-content

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::traits::StructuredGenerator;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Gemini API structured generator.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client for `model`.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("commentlens/0.1 (comment-analysis)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: "application/json".to_string(),
                response_schema: to_gemini_schema(schema),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = result.text()?;

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            response_chars = text.len(),
            "Gemini structured generation"
        );

        serde_json::from_str(&text).context("Gemini returned text that is not valid JSON")
    }
}

/// Convert a JSON Schema object into Gemini's schema dialect.
///
/// Gemini expects upper-case type names ("OBJECT", "ARRAY", ...) and only
/// understands a subset of keywords; `type`, `properties`, `items`,
/// `required`, `description` and `enum` are carried over.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                match key.as_str() {
                    "type" => {
                        let upper = value
                            .as_str()
                            .map(|t| Value::String(t.to_uppercase()))
                            .unwrap_or_else(|| value.clone());
                        out.insert(key.clone(), upper);
                    }
                    "properties" => {
                        let props = value
                            .as_object()
                            .map(|p| {
                                p.iter()
                                    .map(|(name, s)| (name.clone(), to_gemini_schema(s)))
                                    .collect()
                            })
                            .unwrap_or_default();
                        out.insert(key.clone(), Value::Object(props));
                    }
                    "items" => {
                        out.insert(key.clone(), to_gemini_schema(value));
                    }
                    "required" | "description" | "enum" => {
                        out.insert(key.clone(), value.clone());
                    }
                    _ => {}
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

// --- Gemini API request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
}

/// Response from generateContent (only the fields we read).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Result<String> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| anyhow::anyhow!("Gemini returned no candidates"))?;

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            anyhow::bail!(
                "Gemini returned an empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_types_uppercased_recursively() {
        let schema = json!({
            "type": "object",
            "properties": {
                "topics": {"type": "array", "items": {"type": "string"}, "description": "names"}
            },
            "required": ["topics"],
            "additionalProperties": false
        });
        let converted = to_gemini_schema(&schema);
        assert_eq!(
            converted,
            json!({
                "type": "OBJECT",
                "properties": {
                    "topics": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "names"}
                },
                "required": ["topics"]
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"topics\": "}, {"text": "[\"Pricing\"]}"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text().unwrap(), r#"{"topics": ["Pricing"]}"#);
    }

    #[test]
    fn test_response_without_candidates_is_error() {
        let resp: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_blocked_candidate_is_error() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        let err = resp.text().unwrap_err().to_string();
        assert!(err.contains("SAFETY"));
    }
}
