//! Text generation collaborators.
//!
//! The core only needs "prompt in, raw text out". Three backends exist:
//!
//! - `ollama` - local model through the `ollama run` CLI
//! - `gemini` - Google Generative Language REST API
//! - `groq` - OpenAI-compatible chat completions
//!
//! `prompts` holds the prompt templates.

pub mod gemini;
pub mod groq;
pub mod ollama;
pub mod prompts;

use clap::ValueEnum;
use task_extractor_sdk::{async_trait, log_warning};

use crate::error::ExternalCallError;
use crate::hierarchy::{extract_json_span, extract_or_raw};

pub use gemini::GeminiClient;
pub use groq::GroqClient;
pub use ollama::OllamaRunner;

/// Opaque text generator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalCallError>;
}

/// Which generator extracts the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LlmBackend {
    Ollama,
    Gemini,
    Groq,
}

/// Model answer reduced to its JSON candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// JSON span, or the whole trimmed answer when none was found
    pub text: String,
    pub json_found: bool,
}

/// Ask `generator` for the task hierarchy of `document`
pub async fn extract_tasks<G>(generator: &G, document: &str) -> Result<Extraction, ExternalCallError>
where
    G: TextGenerator + ?Sized,
{
    let response = generator.generate(&prompts::extraction_prompt(document)).await?;
    let json_found = extract_json_span(&response).is_some();
    if !json_found {
        log_warning!("No JSON block found in model response.");
    }

    Ok(Extraction {
        text: extract_or_raw(&response).to_string(),
        json_found,
    })
}
