//! Tests for counting, flattening and positional IDs

use super::common::*;
use task_extractor::hierarchy::{count_tasks, flatten, Hierarchy, TaskLevel};

#[test]
fn test_counts_per_level() {
    let counts = count_tasks(&sample_hierarchy());
    assert_eq!(counts.main_tasks, 2);
    assert_eq!(counts.subtasks, 3);
    assert_eq!(counts.sub_subtasks, 2);
    assert_eq!(counts.total(), 7);
    assert_eq!(counts.uncounted, 0);
}

#[test]
fn test_root_count_matches_top_level() {
    let hierarchy = sample_hierarchy();
    let roots = flatten(&hierarchy)
        .iter()
        .filter(|row| row.level == TaskLevel::MainTask)
        .count();
    assert_eq!(roots, hierarchy.tasks.len());
}

#[test]
fn test_flatten_ids_in_depth_first_order() {
    let ids: Vec<String> = flatten(&sample_hierarchy())
        .iter()
        .map(|row| row.id.to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["T1", "T1.1", "T1.1.1", "T1.2", "T1.2.1", "T1.3", "T2"]
    );
}

#[test]
fn test_flatten_ids_are_unique_and_increasing() {
    let rows = flatten(&sample_hierarchy());
    for pair in rows.windows(2) {
        assert!(pair[0].id < pair[1].id, "{} !< {}", pair[0].id, pair[1].id);
    }
}

#[test]
fn test_levels_follow_depth() {
    let rows = flatten(&sample_hierarchy());
    assert_eq!(rows[0].level, TaskLevel::MainTask);
    assert_eq!(rows[1].level, TaskLevel::Subtask);
    assert_eq!(rows[2].level, TaskLevel::SubSubtask);
    assert_eq!(rows[2].title, "Write .env");
    assert_eq!(rows[0].description, "Prepare the project");
}

#[test]
fn test_fourth_level_is_left_out() {
    let hierarchy = Hierarchy::new(vec![leaf("A").with_children(vec![
        leaf("B").with_children(vec![leaf("C").with_children(vec![
            leaf("D").with_children(vec![leaf("E")]),
        ])]),
    ])]);

    let counts = count_tasks(&hierarchy);
    assert_eq!(counts.total(), 3);
    assert_eq!(counts.uncounted, 2);
    assert_eq!(flatten(&hierarchy).len(), 3);
}

#[test]
fn test_empty_hierarchy() {
    let hierarchy = Hierarchy::default();
    assert_eq!(count_tasks(&hierarchy).total(), 0);
    assert!(flatten(&hierarchy).is_empty());
}
