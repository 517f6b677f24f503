//! Plain-text views of a hierarchy for the terminal

use crate::hierarchy::aggregate::{count_tasks, flatten};
use crate::hierarchy::types::{Hierarchy, TaskCounts, TaskNode, TaskPath, TaskRow};

/// One-line statistics summary
pub fn render_counts(counts: &TaskCounts) -> String {
    let mut line = format!(
        "Main Tasks: {} | Subtasks: {} | Sub-subtasks: {} | Total Tasks: {}",
        counts.main_tasks,
        counts.subtasks,
        counts.sub_subtasks,
        counts.total()
    );
    if counts.uncounted > 0 {
        line.push_str(&format!(
            " | Not counted (nested deeper than Sub-subtask): {}",
            counts.uncounted
        ));
    }
    line
}

/// Indented tree, every depth
pub fn render_tree(hierarchy: &Hierarchy) -> String {
    let mut out = String::new();
    for (idx, task) in hierarchy.tasks.iter().enumerate() {
        write_node(task, &TaskPath::root(idx + 1), &mut out);
    }
    out
}

fn write_node(node: &TaskNode, path: &TaskPath, out: &mut String) {
    let indent = "  ".repeat(path.depth());
    out.push_str(&format!("{}{} {}\n", indent, path, node.title));
    if !node.description.is_empty() {
        out.push_str(&format!("{}    {}\n", indent, node.description));
    }
    for (idx, child) in node.children.iter().enumerate() {
        write_node(child, &path.child(idx + 1), out);
    }
}

/// Fixed-width table of the flattened rows
pub fn render_table(rows: &[TaskRow]) -> String {
    let headers = ["Level", "ID", "Title", "Description"];
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.level.to_string(),
                row.id.to_string(),
                row.title.clone(),
                row.description.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers.map(String::from), &widths);
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Statistics, tree and table together
pub fn render_all(hierarchy: &Hierarchy) -> String {
    format!(
        "{}\n\n{}\n{}",
        render_counts(&count_tasks(hierarchy)),
        render_tree(hierarchy),
        render_table(&flatten(hierarchy))
    )
}
