//! Local model through the `ollama` CLI

use std::process::Stdio;
use task_extractor_sdk::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ExternalCallError;
use crate::llm::TextGenerator;

/// Runs `ollama run <model>` with the prompt on stdin
pub struct OllamaRunner {
    program: String,
    model: String,
}

impl OllamaRunner {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            program: "ollama".to_string(),
            model: model.into(),
        }
    }

    /// Use a different executable (tests, non-standard installs)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl TextGenerator for OllamaRunner {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalCallError> {
        let mut child = Command::new(&self.program)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExternalCallError::Process(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
            // dropping stdin closes the pipe so the model starts answering
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ExternalCallError::Process(format!(
                "Error from Ollama: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
