//! Groq chat completions client (OpenAI-compatible)

use serde::{Deserialize, Serialize};
use task_extractor_sdk::async_trait;

use crate::config::GroqConfig;
use crate::error::ExternalCallError;
use crate::llm::TextGenerator;

const DEFAULT_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqClient {
    config: GroqConfig,
    system_prompt: Option<String>,
    temperature: f32,
    http: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: &GroqConfig) -> Self {
        Self {
            config: config.clone(),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalCallError> {
        let mut messages = Vec::new();
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExternalCallError::from_response(response).await);
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ExternalCallError::UnexpectedResponse("chat completion has no content".into()))
    }
}
