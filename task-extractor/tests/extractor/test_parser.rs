//! Tests for parsing model output into a hierarchy

use super::common::*;
use task_extractor::error::ParseError;
use task_extractor::hierarchy::{count_tasks, parse_hierarchy, parse_or_fallback, ParseOutcome};

#[test]
fn test_parse_sample_hierarchy() {
    let hierarchy = parse_hierarchy(sample_hierarchy_json()).unwrap();
    assert_eq!(hierarchy, sample_hierarchy());
    assert_eq!(hierarchy.tasks.len(), 2);
}

#[test]
fn test_parse_answer_wrapped_in_prose() {
    let raw = r#"Intro text... {"tasks":[{"title":"Setup","description":"","subtasks":[{"title":"Configure env","description":"","subtasks":[]}]}]} trailing"#;

    let hierarchy = parse_hierarchy(raw).unwrap();
    assert_eq!(hierarchy.tasks.len(), 1);
    assert_eq!(hierarchy.tasks[0].title, "Setup");
    assert_eq!(hierarchy.tasks[0].children[0].title, "Configure env");

    let counts = count_tasks(&hierarchy);
    assert_eq!((counts.main_tasks, counts.subtasks, counts.sub_subtasks), (1, 1, 0));
}

#[test]
fn test_parse_code_fenced_answer() {
    let raw = format!("Here you go:\n```json\n{}\n```\nLet me know!", sample_hierarchy_json());
    assert_eq!(parse_hierarchy(&raw).unwrap(), sample_hierarchy());
}

#[test]
fn test_text_without_json_is_a_parse_error() {
    assert!(matches!(
        parse_hierarchy("no json here"),
        Err(ParseError::NoJsonObject)
    ));
}

#[test]
fn test_braces_in_trailing_prose_break_the_parse() {
    let raw = r#"{"tasks": []} and a stray {brace}"#;
    assert!(matches!(parse_hierarchy(raw), Err(ParseError::InvalidJson(_))));
}

#[test]
fn test_missing_root_key() {
    assert!(matches!(
        parse_hierarchy(r#"{"items": []}"#),
        Err(ParseError::MissingRootKey)
    ));
    assert!(matches!(
        parse_hierarchy(r#"{"tasks": {"title": "x"}}"#),
        Err(ParseError::MissingRootKey)
    ));
}

#[test]
fn test_missing_title_reports_path() {
    let raw = r#"{"tasks": [{"title": "A", "subtasks": [{"title": "B"}, {"description": "no title"}]}]}"#;
    match parse_hierarchy(raw) {
        Err(ParseError::InvalidNode { path, reason }) => {
            assert_eq!(path, "tasks[0].subtasks[1]");
            assert_eq!(reason, "missing title");
        }
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}

#[test]
fn test_null_fields_count_as_absent() {
    let raw = r#"{"tasks": [{"title": "A", "description": null, "subtasks": null}]}"#;
    let hierarchy = parse_hierarchy(raw).unwrap();
    assert_eq!(hierarchy.tasks[0].description, "");
    assert!(hierarchy.tasks[0].children.is_empty());
}

#[test]
fn test_wrong_field_types_are_rejected() {
    assert!(parse_hierarchy(r#"{"tasks": [{"title": 7}]}"#).is_err());
    assert!(parse_hierarchy(r#"{"tasks": [{"title": "A", "subtasks": "none"}]}"#).is_err());
    assert!(parse_hierarchy(r#"{"tasks": ["A"]}"#).is_err());
}

#[test]
fn test_titles_are_single_line() {
    let raw = "{\"tasks\": [{\"title\": \"  Set up\\n\\tCI  \"}]}";
    let hierarchy = parse_hierarchy(raw).unwrap();
    assert_eq!(hierarchy.tasks[0].title, "Set up CI");
}

#[test]
fn test_empty_task_list_is_valid() {
    let hierarchy = parse_hierarchy(r#"{"tasks": []}"#).unwrap();
    assert!(hierarchy.is_empty());
}

#[test]
fn test_fallback_keeps_raw_text() {
    match parse_or_fallback("  Sorry, I cannot do that.  ") {
        ParseOutcome::Unparsed { text, error } => {
            assert_eq!(text, "Sorry, I cannot do that.");
            assert!(matches!(error, ParseError::NoJsonObject));
        }
        ParseOutcome::Parsed(_) => panic!("expected fallback"),
    }
}
