//! GitHub REST client for branch creation

use serde_json::{json, Value};
use task_extractor_sdk::async_trait;

use crate::config::GithubConfig;
use crate::error::ExternalCallError;
use crate::repository::RepositoryHost;

const USER_AGENT: &str = concat!("task-extractor/", env!("CARGO_PKG_VERSION"));

/// Creates branches in one repository
pub struct GithubClient {
    config: GithubConfig,
    http: reqwest::Client,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/repos/{}/{}", self.config.api_url, self.config.repo, path);
        self.http
            .request(method, url)
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    /// Commit SHA at the head of `branch`
    pub async fn branch_head(&self, branch: &str) -> Result<String, ExternalCallError> {
        let response = self
            .request(reqwest::Method::GET, &format!("branches/{}", branch))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExternalCallError::from_response(response).await);
        }

        let body: Value = response.json().await?;
        body.pointer("/commit/sha")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ExternalCallError::UnexpectedResponse(format!(
                    "base branch '{}' has no commit sha",
                    branch
                ))
            })
    }
}

#[async_trait]
impl RepositoryHost for GithubClient {
    async fn create_branch(&self, name: &str, base: &str) -> Result<(), ExternalCallError> {
        let sha = self.branch_head(base).await?;

        let response = self
            .request(reqwest::Method::POST, "git/refs")
            .json(&json!({
                "ref": format!("refs/heads/{}", name),
                "sha": sha,
            }))
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::CREATED {
            return Err(ExternalCallError::from_response(response).await);
        }
        Ok(())
    }
}
