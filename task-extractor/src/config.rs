//! Collaborator configuration.
//!
//! [`AppConfig`] is read once at startup (after `.env` is loaded) and passed by
//! reference to whatever builds a client. Each collaborator has a validated
//! view that fails with [`ConfigurationError`] before any call is made.

use crate::error::ConfigurationError;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BASE_BRANCH: &str = "main";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_TEST_CASE_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";

/// Raw settings for every collaborator
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_api_token: Option<String>,
    pub jira_project_key: Option<String>,

    pub github_token: Option<String>,
    pub github_repo: Option<String>,
    pub github_api_url: String,
    pub github_base_branch: String,

    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_api_url: String,
    pub groq_test_case_model: String,

    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,

    pub ollama_model: String,
}

/// Validated Jira settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub project_key: String,
}

/// Validated GitHub settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub token: String,
    /// `owner/name`
    pub repo: String,
    pub api_url: String,
}

/// Validated Groq settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

/// Validated Gemini settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl AppConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        AppConfig {
            jira_base_url: get("JIRA_BASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            jira_email: get("JIRA_EMAIL"),
            jira_api_token: get("JIRA_API_TOKEN"),
            jira_project_key: get("JIRA_PROJECT_KEY"),

            github_token: get("GITHUB_TOKEN"),
            github_repo: get("GITHUB_REPO"),
            github_api_url: get_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL)
                .trim_end_matches('/')
                .to_string(),
            github_base_branch: get_or("GITHUB_BASE_BRANCH", DEFAULT_BASE_BRANCH),

            groq_api_key: get("GROQ_API_KEY"),
            groq_model: get_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            groq_api_url: get_or("GROQ_API_URL", DEFAULT_GROQ_API_URL),
            groq_test_case_model: get_or("GROQ_TEST_CASE_MODEL", DEFAULT_GROQ_TEST_CASE_MODEL),

            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_url: get_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL)
                .trim_end_matches('/')
                .to_string(),

            ollama_model: get_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
        }
    }

    pub fn jira(&self) -> Result<JiraConfig, ConfigurationError> {
        let mut missing = Vec::new();
        let base_url = require(&self.jira_base_url, "JIRA_BASE_URL", &mut missing);
        let email = require(&self.jira_email, "JIRA_EMAIL", &mut missing);
        let api_token = require(&self.jira_api_token, "JIRA_API_TOKEN", &mut missing);
        let project_key = require(&self.jira_project_key, "JIRA_PROJECT_KEY", &mut missing);
        check("Jira", missing)?;

        Ok(JiraConfig {
            base_url,
            email,
            api_token,
            project_key,
        })
    }

    pub fn github(&self) -> Result<GithubConfig, ConfigurationError> {
        let mut missing = Vec::new();
        let token = require(&self.github_token, "GITHUB_TOKEN", &mut missing);
        let repo = require(&self.github_repo, "GITHUB_REPO", &mut missing);
        check("GitHub", missing)?;

        Ok(GithubConfig {
            token,
            repo,
            api_url: self.github_api_url.clone(),
        })
    }

    /// Groq settings for task extraction
    pub fn groq(&self) -> Result<GroqConfig, ConfigurationError> {
        self.groq_with_model(&self.groq_model)
    }

    /// Groq settings for test case generation (separate model)
    pub fn groq_test_cases(&self) -> Result<GroqConfig, ConfigurationError> {
        self.groq_with_model(&self.groq_test_case_model)
    }

    fn groq_with_model(&self, model: &str) -> Result<GroqConfig, ConfigurationError> {
        let mut missing = Vec::new();
        let api_key = require(&self.groq_api_key, "GROQ_API_KEY", &mut missing);
        check("Groq", missing)?;

        Ok(GroqConfig {
            api_key,
            model: model.to_string(),
            api_url: self.groq_api_url.clone(),
        })
    }

    pub fn gemini(&self) -> Result<GeminiConfig, ConfigurationError> {
        let mut missing = Vec::new();
        let api_key = require(&self.gemini_api_key, "GEMINI_API_KEY", &mut missing);
        check("Gemini", missing)?;

        Ok(GeminiConfig {
            api_key,
            model: self.gemini_model.clone(),
            api_url: self.gemini_api_url.clone(),
        })
    }
}

fn require(value: &Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) => v.clone(),
        None => {
            missing.push(name);
            String::new()
        }
    }
}

fn check(collaborator: &'static str, missing: Vec<&'static str>) -> Result<(), ConfigurationError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::Missing {
            collaborator,
            variables: missing,
        })
    }
}
