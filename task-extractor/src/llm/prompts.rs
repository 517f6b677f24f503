//! Prompt templates for hierarchy extraction and test case generation

use crate::test_cases::Ticket;

/// System prompt sent with test case requests
pub const TEST_CASE_SYSTEM_PROMPT: &str = "You generate QA test cases.";

const EXTRACTION_TEMPLATE: &str = r#"Document Task Extraction for Jira Issues

Analyze the document below and extract every task that should become a Jira issue. Organize them hierarchically:

1. Main tasks or topics become "Epics"
2. Secondary tasks become "Tasks" under their Epic
3. Detailed work items become "Subtasks" under their Task

Format the output as JSON with exactly this structure:
{
  "tasks": [
    {
      "title": "Main Task 1",
      "description": "Description of main task 1 from the document",
      "subtasks": [
        {
          "title": "Subtask 1.1",
          "description": "Description of subtask 1.1 from the document",
          "subtasks": [
            {
              "title": "Sub-subtask 1.1.1",
              "description": "Description of sub-subtask 1.1.1 from the document"
            }
          ]
        }
      ]
    }
  ]
}

Guidelines:
- Use only titles and descriptions taken from the document
- Keep descriptions short but meaningful
- Never put newlines or tabs in a title or description
- Extract only actionable work items and keep their hierarchy
- Leave out overview, purpose and scope sections, tech stack suggestions, time or effort estimates and design notes
- Output the JSON only, without explanations

Document content:
"""
{document}
"""
"#;

/// Prompt asking the model for the task hierarchy of `document`
pub fn extraction_prompt(document: &str) -> String {
    EXTRACTION_TEMPLATE.replace("{document}", document)
}

/// Prompt asking the model for two test cases for `ticket`
pub fn test_case_prompt(ticket: &Ticket) -> String {
    format!(
        r#"You are a senior QA engineer. Based on the following task, write two detailed test cases including:
- A title
- Description
- Steps
- Expected Result
- Priority

Task:
Title: {}
Description: {}
"#,
        ticket.summary, ticket.description
    )
}
