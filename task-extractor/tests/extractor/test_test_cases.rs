//! Tests for test case generation

use super::common::*;
use task_extractor::test_cases::{generate_test_cases, test_case_file, TestCaseMode};

#[tokio::test]
async fn test_ai_mode_writes_every_node() {
    let dir = tempfile::tempdir().unwrap();
    let generator = CannedGenerator("**Test Case 1**\n- Priority: High".to_string());

    let report = generate_test_cases(&sample_hierarchy(), TestCaseMode::Ai(&generator), dir.path())
        .await
        .unwrap();

    assert_eq!(report.written.len(), 7);
    assert!(report.failed.is_empty());

    let content = std::fs::read_to_string(test_case_file(dir.path(), "T1.1.1")).unwrap();
    assert!(content.starts_with("# Test Cases for T1.1.1 - Write .env"));
    assert!(content.contains("Priority: High"));
}

#[tokio::test]
async fn test_generation_failure_is_written_and_walk_continues() {
    let dir = tempfile::tempdir().unwrap();
    let generator = FlakyGenerator {
        fail_on: vec!["Install deps".to_string()],
    };

    let report = generate_test_cases(&sample_hierarchy(), TestCaseMode::Ai(&generator), dir.path())
        .await
        .unwrap();

    assert_eq!(report.written.len(), 6);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].key, "T1.2");

    let failure = std::fs::read_to_string(test_case_file(dir.path(), "T1.2")).unwrap();
    assert!(failure.starts_with("# Failed to generate test cases for T1.2"));
    assert!(failure.contains("503"));
    assert!(dir.path().join("T2_test_cases.md").exists());
}

#[tokio::test]
async fn test_simulated_mode_needs_no_generator() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested").join("cases");

    let report = generate_test_cases(&sample_hierarchy(), TestCaseMode::Simulated, &output)
        .await
        .unwrap();

    assert_eq!(report.written.len(), 7);
    let content = std::fs::read_to_string(test_case_file(&output, "T2")).unwrap();
    assert!(content.contains("Basic validation of \"Ship it\""));
    assert!(content.contains("**Test Case 2**"));
}

#[tokio::test]
async fn test_unwritable_file_leaves_error_log() {
    let dir = tempfile::tempdir().unwrap();
    // a directory in place of the target file makes the write fail
    std::fs::create_dir_all(test_case_file(dir.path(), "T2")).unwrap();

    let report = generate_test_cases(&sample_hierarchy(), TestCaseMode::Simulated, dir.path())
        .await
        .unwrap();

    assert_eq!(report.written.len(), 6);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].key, "T2");

    let log = std::fs::read_to_string(dir.path().join("T2_error.log")).unwrap();
    assert!(log.starts_with("# Critical error while processing T2"));
}
