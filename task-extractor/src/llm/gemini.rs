//! Gemini `generateContent` client

use serde_json::{json, Value};
use task_extractor_sdk::async_trait;

use crate::config::GeminiConfig;
use crate::error::ExternalCallError;
use crate::llm::TextGenerator;

pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
        }
    }
}

/// Concatenated text parts of the first candidate
fn first_candidate_text(body: &Value) -> Option<String> {
    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalCallError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_url, self.config.model
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExternalCallError::from_response(response).await);
        }

        let body: Value = response.json().await?;
        first_candidate_text(&body)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ExternalCallError::UnexpectedResponse("Gemini returned no candidates".into()))
    }
}
