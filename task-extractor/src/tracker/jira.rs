//! Jira Cloud REST client (API v3)

use serde_json::{json, Value};
use task_extractor_sdk::{async_trait, log_info, log_warning};
use tokio::sync::OnceCell;

use crate::config::JiraConfig;
use crate::error::ExternalCallError;
use crate::tracker::{CreatedIssue, IssueTracker, IssueType, ParentIssue};

/// Creates issues in one Jira project
pub struct JiraClient {
    config: JiraConfig,
    http: reqwest::Client,
    issue_types: OnceCell<Vec<String>>,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
            issue_types: OnceCell::new(),
        }
    }

    /// Issue type names offered by the instance, fetched once
    pub async fn issue_types(&self) -> Result<&[String], ExternalCallError> {
        let types = self
            .issue_types
            .get_or_try_init(|| self.fetch_issue_types())
            .await?;
        Ok(types.as_slice())
    }

    async fn fetch_issue_types(&self) -> Result<Vec<String>, ExternalCallError> {
        let url = format!("{}/rest/api/3/issuetype", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExternalCallError::from_response(response).await);
        }

        let body: Value = response.json().await?;
        let names = body
            .as_array()
            .ok_or_else(|| ExternalCallError::UnexpectedResponse("issue types is not a list".into()))?
            .iter()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    /// Inferred type, or Task when the instance does not offer it
    async fn resolve_type(&self, parent: Option<&ParentIssue>) -> IssueType {
        let inferred = IssueType::infer(parent.map(|p| p.issue_type));

        let offered = match self.issue_types().await {
            Ok(types) => types.iter().any(|name| name == inferred.name()),
            Err(e) => {
                log_warning!("Could not load Jira issue types: {}", e);
                false
            }
        };

        if offered {
            inferred
        } else {
            log_warning!(
                "Issue type '{}' is invalid. Falling back to 'Task'.",
                inferred
            );
            IssueType::Task
        }
    }

    fn payload(
        &self,
        summary: &str,
        description: &str,
        issue_type: IssueType,
        parent: Option<&ParentIssue>,
    ) -> Value {
        // ADF rejects empty text nodes
        let runs = if description.is_empty() {
            json!([])
        } else {
            json!([{ "type": "text", "text": description }])
        };

        let mut payload = json!({
            "fields": {
                "project": { "key": self.config.project_key },
                "summary": summary,
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [{ "type": "paragraph", "content": runs }]
                },
                "issuetype": { "name": issue_type.name() }
            }
        });

        if let Some(parent) = parent {
            if matches!(issue_type, IssueType::Task | IssueType::Subtask) {
                payload["fields"]["parent"] = json!({ "key": parent.key });
            }
        }

        payload
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn create_issue(
        &self,
        summary: &str,
        description: &str,
        parent: Option<&ParentIssue>,
    ) -> Result<CreatedIssue, ExternalCallError> {
        log_info!("Creating Jira issue: {}", summary);

        let issue_type = self.resolve_type(parent).await;
        let url = format!("{}/rest/api/3/issue", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .header("Accept", "application/json")
            .json(&self.payload(summary, description, issue_type, parent))
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::CREATED {
            return Err(ExternalCallError::from_response(response).await);
        }

        let body: Value = response.json().await?;
        let key = body
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| ExternalCallError::UnexpectedResponse("created issue has no key".into()))?;

        Ok(CreatedIssue {
            key: key.to_string(),
            issue_type,
        })
    }
}
