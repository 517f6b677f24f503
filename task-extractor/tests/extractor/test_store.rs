//! Tests for the persisted summary file

use super::common::*;
use task_extractor::hierarchy::store::{load_hierarchy, save_hierarchy, save_raw};
use task_extractor::hierarchy::{parse_or_fallback, ParseOutcome};

#[test]
fn test_persisted_hierarchy_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    save_hierarchy(&sample_hierarchy(), &path).unwrap();
    assert_eq!(load_hierarchy(&path).unwrap(), sample_hierarchy());
}

#[test]
fn test_canonical_file_uses_tasks_and_subtasks_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    save_hierarchy(&sample_hierarchy(), &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["tasks"][0]["title"], "Setup");
    assert_eq!(value["tasks"][0]["subtasks"][0]["title"], "Configure env");
    assert!(value["tasks"][1].get("subtasks").is_none());
}

#[test]
fn test_unparsed_answer_is_saved_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let text = match parse_or_fallback("Here is {not json} sorry") {
        ParseOutcome::Unparsed { text, .. } => text,
        ParseOutcome::Parsed(_) => panic!("expected fallback"),
    };
    save_raw(&text, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json}");
    assert!(load_hierarchy(&path).is_err());
}
