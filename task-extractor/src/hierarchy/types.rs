//! Data types for the task hierarchy.
//!
//! A [`Hierarchy`] is an ordered list of root [`TaskNode`]s (the Epics). Each
//! node owns its children; sibling order is significant everywhere (display,
//! IDs, tracker creation order). IDs are never stored on a node, they are
//! derived as [`TaskPath`]s during traversal.

use serde::Serialize;
use std::fmt;

/// Number of levels the tracker vocabulary knows (Epic / Task / Subtask)
pub const RECOGNIZED_LEVELS: usize = 3;

// ============================================================================
// Tree Types
// ============================================================================

/// One work item and its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNode {
    /// Non-empty single-line title
    pub title: String,

    /// Free-text description, empty when absent
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Child items, serialized under `subtasks`
    #[serde(rename = "subtasks", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaskNode>,
}

impl TaskNode {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper used when assembling trees by hand
    pub fn with_children(mut self, children: Vec<TaskNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Number of nodes below this one that sit at most `levels` levels down
    pub fn descendants_within(&self, levels: usize) -> usize {
        if levels == 0 {
            return 0;
        }
        self.children
            .iter()
            .map(|child| 1 + child.descendants_within(levels - 1))
            .sum()
    }
}

/// Ordered sequence of root task nodes; serializes as `{"tasks": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hierarchy {
    pub tasks: Vec<TaskNode>,
}

impl Hierarchy {
    pub fn new(tasks: Vec<TaskNode>) -> Self {
        Self { tasks }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of nodes at every depth
    pub fn node_count(&self) -> usize {
        self.tasks
            .iter()
            .map(|task| 1 + task.descendant_count())
            .sum()
    }

    /// Canonical persisted form (pretty JSON)
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Pre-order, left-to-right traversal over every depth
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<(TaskPath, &TaskNode)> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(idx, node)| (TaskPath::root(idx + 1), node))
            .collect();
        stack.reverse();
        Walk { stack }
    }
}

/// Iterator returned by [`Hierarchy::walk`]
pub struct Walk<'a> {
    stack: Vec<(TaskPath, &'a TaskNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (TaskPath, &'a TaskNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for (idx, child) in node.children.iter().enumerate().rev() {
            self.stack.push((path.child(idx + 1), child));
        }
        Some((path, node))
    }
}

// ============================================================================
// Addressing Types
// ============================================================================

/// Positional ID: 1-based sibling index at each depth, displayed as `T2.3.1`
///
/// The derived ordering is lexicographic over the indices, which is the
/// depth-first, left-to-right order of the tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskPath(Vec<usize>);

impl TaskPath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Zero-based depth (roots are depth 0)
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T")?;
        for (pos, index) in self.0.iter().enumerate() {
            if pos > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl Serialize for TaskPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Display level of a node, assigned strictly by depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskLevel {
    #[serde(rename = "Main Task")]
    MainTask,
    #[serde(rename = "Subtask")]
    Subtask,
    #[serde(rename = "Sub-subtask")]
    SubSubtask,
}

impl TaskLevel {
    /// Level for a zero-based depth; `None` past the recognized levels
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(TaskLevel::MainTask),
            1 => Some(TaskLevel::Subtask),
            2 => Some(TaskLevel::SubSubtask),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskLevel::MainTask => "Main Task",
            TaskLevel::Subtask => "Subtask",
            TaskLevel::SubSubtask => "Sub-subtask",
        }
    }
}

impl fmt::Display for TaskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Aggregate Types
// ============================================================================

/// One row of the flattened table view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    #[serde(rename = "Level")]
    pub level: TaskLevel,
    #[serde(rename = "ID")]
    pub id: TaskPath,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Per-level counts over the three recognized levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub main_tasks: usize,
    pub subtasks: usize,
    pub sub_subtasks: usize,

    /// Nodes nested deeper than Sub-subtask; not part of the counts above
    pub uncounted: usize,
}

impl TaskCounts {
    /// Sum of the three counted levels
    pub fn total(&self) -> usize {
        self.main_tasks + self.subtasks + self.sub_subtasks
    }
}
