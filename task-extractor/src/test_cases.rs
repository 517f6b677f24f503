//! Test case generation for every node of a hierarchy.
//!
//! Each node becomes a [`Ticket`] keyed by its positional ID (`T1`, `T1.2`,
//! `T1.2.1`, ...) and gets a `{key}_test_cases.md` file. Unlike the tracker
//! sync, this walk covers every depth. A failure for one ticket is written to
//! disk and the walk moves on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs;
use task_extractor_sdk::{log_file_saved, log_found, log_state_file, log_warning};

use crate::hierarchy::Hierarchy;
use crate::llm::prompts::test_case_prompt;
use crate::llm::TextGenerator;

/// Default directory for generated files
pub const DEFAULT_OUTPUT_DIR: &str = "test_cases";

/// One work item as seen by the test case writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub key: String,
    pub summary: String,
    pub description: String,
}

/// Where the test case text comes from
#[derive(Clone, Copy)]
pub enum TestCaseMode<'a> {
    /// Fixed two-case template, no external call
    Simulated,
    /// Ask a text generator
    Ai(&'a dyn TextGenerator),
}

/// A ticket whose test cases could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedTicket {
    pub key: String,
    pub error: String,
}

/// Outcome of one generation walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestCaseReport {
    /// Files holding test cases
    pub written: Vec<PathBuf>,
    /// Tickets that ended with a failure note or error log instead
    pub failed: Vec<FailedTicket>,
}

/// All tickets in depth-first order
pub fn tickets(hierarchy: &Hierarchy) -> Vec<Ticket> {
    hierarchy
        .walk()
        .map(|(path, node)| Ticket {
            key: path.to_string(),
            summary: node.title.clone(),
            description: node.description.clone(),
        })
        .collect()
}

/// File name for a ticket's test cases
pub fn test_case_file(output_dir: &Path, key: &str) -> PathBuf {
    output_dir.join(format!("{}_test_cases.md", key))
}

/// Fixed template used in simulated mode
pub fn simulated_test_cases(ticket: &Ticket) -> String {
    format!(
        r#"# Test Cases for {key} - {summary}

**Test Case 1**
- Description: Basic validation of "{description}"
- Steps:
  1. Step one...
  2. Step two...
- Expected Result: Should function correctly
- Priority: High

**Test Case 2**
- Description: Edge case test
- Steps:
  1. Invalid input...
  2. Unexpected scenario...
- Expected Result: Should handle gracefully
- Priority: Medium
"#,
        key = ticket.key,
        summary = ticket.summary,
        description = ticket.description
    )
}

/// Write test cases for every node of `hierarchy` into `output_dir`
pub async fn generate_test_cases(
    hierarchy: &Hierarchy,
    mode: TestCaseMode<'_>,
    output_dir: &Path,
) -> Result<TestCaseReport> {
    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let tickets = tickets(hierarchy);
    log_found!(tickets.len(), "tickets to generate test cases for");

    let mut report = TestCaseReport::default();
    for ticket in &tickets {
        let path = test_case_file(output_dir, &ticket.key);

        let (content, generation_error) = match mode {
            TestCaseMode::Simulated => (simulated_test_cases(ticket), None),
            TestCaseMode::Ai(generator) => match generator.generate(&test_case_prompt(ticket)).await {
                Ok(output) => (
                    format!("# Test Cases for {} - {}\n\n{}", ticket.key, ticket.summary, output),
                    None,
                ),
                Err(e) => {
                    log_warning!("Test case generation failed for {}: {}", ticket.key, e);
                    (
                        format!("# Failed to generate test cases for {}\n{}", ticket.key, e),
                        Some(e.to_string()),
                    )
                }
            },
        };

        if let Err(e) = fs::write(&path, content).await {
            log_warning!("Error writing test cases for {}: {}", ticket.key, e);
            write_error_log(output_dir, &ticket.key, &e.to_string()).await;
            report.failed.push(FailedTicket {
                key: ticket.key.clone(),
                error: e.to_string(),
            });
            continue;
        }

        match generation_error {
            Some(error) => report.failed.push(FailedTicket {
                key: ticket.key.clone(),
                error,
            }),
            None => {
                log_file_saved!(path.display());
                log_state_file!(path.display(), format!("Test cases for {}", ticket.key));
                report.written.push(path);
            }
        }
    }

    Ok(report)
}

async fn write_error_log(output_dir: &Path, key: &str, error: &str) {
    let log_path = output_dir.join(format!("{}_error.log", key));
    let body = format!("# Critical error while processing {}\nError: {}", key, error);
    if let Err(e) = fs::write(&log_path, body).await {
        log_warning!("Could not write {}: {}", log_path.display(), e);
    }
}
