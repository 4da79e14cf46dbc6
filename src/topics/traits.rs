// Structured generator trait: swap-ready abstraction over the LLM provider.
//
// The workflow only needs "answer this prompt as JSON matching this schema".
// GeminiClient implements it over HTTP; tests plug in a deterministic stub.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A provider that produces JSON conforming to a declared schema.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Generate a JSON value for `prompt` constrained by `schema`
    /// (a JSON Schema object).
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value>;
}

/// Generate and deserialize in one step.
pub async fn generate<T: DeserializeOwned>(
    generator: &dyn StructuredGenerator,
    prompt: &str,
    schema: &Value,
) -> Result<T> {
    let value = generator.generate_structured(prompt, schema).await?;
    serde_json::from_value(value).context("Structured output did not match the declared schema")
}
