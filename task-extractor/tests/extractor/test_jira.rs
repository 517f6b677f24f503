//! Tests for the Jira client against a mock server

use serde_json::{json, Value};
use wiremock::matchers::{basic_auth, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::*;
use task_extractor::config::JiraConfig;
use task_extractor::error::ExternalCallError;
use task_extractor::hierarchy::Hierarchy;
use task_extractor::tracker::{sync_to_tracker, IssueTracker, IssueType, JiraClient};

fn jira_config(server: &MockServer) -> JiraConfig {
    JiraConfig {
        base_url: server.uri(),
        email: "dev@example.com".to_string(),
        api_token: "secret".to_string(),
        project_key: "PROJ".to_string(),
    }
}

async fn mount_issue_types(server: &MockServer, names: &[&str]) {
    let body: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issuetype"))
        .and(basic_auth("dev@example.com", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_created(server: &MockServer, summary: &str, key: &str) {
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue"))
        .and(body_partial_json(json!({ "fields": { "summary": summary } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "10001", "key": key })))
        .mount(server)
        .await;
}

async fn issue_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path() == "/rest/api/3/issue")
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn test_sync_links_child_to_epic() {
    let server = MockServer::start().await;
    mount_issue_types(&server, &["Epic", "Task", "Subtask"]).await;
    mount_created(&server, "Setup", "PROJ-1").await;
    mount_created(&server, "Configure env", "PROJ-2").await;

    let hierarchy = Hierarchy::new(vec![leaf("Setup").with_children(vec![leaf("Configure env")])]);
    let client = JiraClient::new(&jira_config(&server));
    let report = sync_to_tracker(&hierarchy, &client).await;

    assert!(report.is_complete());
    assert_eq!(report.created[0].key, "PROJ-1");
    assert_eq!(report.created[1].key, "PROJ-2");

    let bodies = issue_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["fields"]["issuetype"]["name"], "Epic");
    assert!(bodies[0]["fields"].get("parent").is_none());
    assert_eq!(
        bodies[0]["fields"]["description"]["content"][0]["content"],
        json!([])
    );
    assert_eq!(bodies[1]["fields"]["issuetype"]["name"], "Task");
    assert_eq!(bodies[1]["fields"]["parent"]["key"], "PROJ-1");
    assert_eq!(bodies[1]["fields"]["project"]["key"], "PROJ");
}

#[tokio::test]
async fn test_unknown_issue_type_falls_back_to_task() {
    let server = MockServer::start().await;
    mount_issue_types(&server, &["Task", "Story"]).await;
    mount_created(&server, "Setup", "PROJ-7").await;

    let client = JiraClient::new(&jira_config(&server));
    let created = client.create_issue("Setup", "Prepare", None).await.unwrap();

    assert_eq!(created.key, "PROJ-7");
    assert_eq!(created.issue_type, IssueType::Task);
    let bodies = issue_bodies(&server).await;
    assert_eq!(bodies[0]["fields"]["issuetype"]["name"], "Task");
    assert_eq!(
        bodies[0]["fields"]["description"]["content"][0]["content"][0]["text"],
        "Prepare"
    );
}

#[tokio::test]
async fn test_rejected_issue_is_reported() {
    let server = MockServer::start().await;
    mount_issue_types(&server, &["Epic", "Task", "Subtask"]).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue"))
        .respond_with(ResponseTemplate::new(400).set_body_string("summary too long"))
        .mount(&server)
        .await;

    let client = JiraClient::new(&jira_config(&server));
    let err = client.create_issue("Setup", "", None).await.unwrap_err();

    match err {
        ExternalCallError::Status { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "summary too long");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_epic_stops_its_subtree() {
    let server = MockServer::start().await;
    mount_issue_types(&server, &["Epic", "Task", "Subtask"]).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let hierarchy = Hierarchy::new(vec![leaf("Setup").with_children(vec![leaf("Configure env")])]);
    let client = JiraClient::new(&jira_config(&server));
    let report = sync_to_tracker(&hierarchy, &client).await;

    assert_eq!(issue_bodies(&server).await.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.skipped, 1);
}
