//! Tests for the LLM clients and the extraction call

use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::*;
use task_extractor::config::{GeminiConfig, GroqConfig};
use task_extractor::error::ExternalCallError;
use task_extractor::hierarchy::parse_hierarchy;
use task_extractor::llm::prompts::TEST_CASE_SYSTEM_PROMPT;
use task_extractor::llm::{extract_tasks, GeminiClient, GroqClient, TextGenerator};

fn groq_config(server: &MockServer) -> GroqConfig {
    GroqConfig {
        api_key: "gsk_test".to_string(),
        model: "llama3-70b-8192".to_string(),
        api_url: format!("{}/openai/v1/chat/completions", server.uri()),
    }
}

#[tokio::test]
async fn test_groq_sends_system_prompt_and_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(bearer_token("gsk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "**Test Case 1**" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GroqClient::new(&groq_config(&server)).with_system_prompt(TEST_CASE_SYSTEM_PROMPT);
    let answer = client.generate("Write tests").await.unwrap();
    assert_eq!(answer, "**Test Case 1**");

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["model"], "llama3-70b-8192");
    assert_eq!(body["temperature"], 0.5);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], TEST_CASE_SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["content"], "Write tests");
}

#[tokio::test]
async fn test_groq_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = GroqClient::new(&groq_config(&server))
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, ExternalCallError::Status { status: 429, .. }));
}

#[tokio::test]
async fn test_groq_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = GroqClient::new(&groq_config(&server))
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, ExternalCallError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_gemini_extraction_end_to_end() {
    let server = MockServer::start().await;
    let answer = format!("Sure! Here is the plan:\n```json\n{}\n```", sample_hierarchy_json());
    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(query_param("key", "AIza-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": answer }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&GeminiConfig {
        api_key: "AIza-test".to_string(),
        model: "gemini-test".to_string(),
        api_url: server.uri(),
    });
    let extraction = extract_tasks(&client, "Build a web shop").await.unwrap();

    assert!(extraction.json_found);
    assert_eq!(parse_hierarchy(&extraction.text).unwrap(), sample_hierarchy());

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Build a web shop"));
}

#[tokio::test]
async fn test_extraction_without_json_keeps_answer() {
    let generator = CannedGenerator("I need more details first.".to_string());
    let extraction = extract_tasks(&generator, "tiny doc").await.unwrap();
    assert!(!extraction.json_found);
    assert_eq!(extraction.text, "I need more details first.");
}

