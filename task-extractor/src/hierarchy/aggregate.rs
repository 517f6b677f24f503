//! Counting and flattening over the three recognized levels.
//!
//! Both views stop at Sub-subtask. Deeper nodes stay in the tree but are not
//! counted or listed; [`TaskCounts::uncounted`] reports how many were left out.

use crate::hierarchy::types::{Hierarchy, TaskCounts, TaskLevel, TaskNode, TaskPath, TaskRow};

/// Count main tasks, subtasks and sub-subtasks
pub fn count_tasks(hierarchy: &Hierarchy) -> TaskCounts {
    let mut counts = TaskCounts {
        main_tasks: hierarchy.tasks.len(),
        ..TaskCounts::default()
    };

    for task in &hierarchy.tasks {
        counts.subtasks += task.children.len();
        for subtask in &task.children {
            counts.sub_subtasks += subtask.children.len();
            for sub_subtask in &subtask.children {
                counts.uncounted += sub_subtask.descendant_count();
            }
        }
    }

    counts
}

/// Flatten into ID-addressed rows, depth-first and left-to-right
pub fn flatten(hierarchy: &Hierarchy) -> Vec<TaskRow> {
    let mut rows = Vec::new();
    for (idx, task) in hierarchy.tasks.iter().enumerate() {
        push_rows(task, TaskPath::root(idx + 1), &mut rows);
    }
    rows
}

fn push_rows(node: &TaskNode, path: TaskPath, rows: &mut Vec<TaskRow>) {
    let Some(level) = TaskLevel::from_depth(path.depth()) else {
        return;
    };

    rows.push(TaskRow {
        level,
        id: path.clone(),
        title: node.title.clone(),
        description: node.description.clone(),
    });

    for (idx, child) in node.children.iter().enumerate() {
        push_rows(child, path.child(idx + 1), rows);
    }
}
