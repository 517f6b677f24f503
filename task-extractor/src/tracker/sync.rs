//! Parent-before-child creation of tracker issues.
//!
//! The walk is depth-first and left-to-right, one creation call at a time.
//! A child is only attempted after its parent's call returned a key; when a
//! parent fails, its descendants are counted as skipped and never sent.
//! Only the three recognized levels are synced.
//!
//! Running the walk twice creates every issue twice: there is no
//! de-duplication key.

use serde::Serialize;
use task_extractor_sdk::{log_found, log_item_created, log_item_failed, log_item_skipped, log_stats_summary};

use crate::hierarchy::{Hierarchy, TaskNode, TaskPath, RECOGNIZED_LEVELS};
use crate::tracker::{IssueTracker, IssueType, ParentIssue};

/// An issue the walk created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncedItem {
    pub path: TaskPath,
    pub key: String,
    pub issue_type: IssueType,
}

/// A creation call that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedItem {
    pub path: TaskPath,
    pub title: String,
    pub error: String,
}

/// Outcome of one sync walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub created: Vec<SyncedItem>,
    pub failed: Vec<FailedItem>,
    /// Descendants of failed items, never attempted
    pub skipped: usize,
    /// Nodes nested deeper than Subtask, never attempted
    pub beyond_depth: usize,
}

impl SyncReport {
    /// True when every recognized node was created
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }
}

/// Create one tracker issue per node, parents first
pub async fn sync_to_tracker<T>(hierarchy: &Hierarchy, tracker: &T) -> SyncReport
where
    T: IssueTracker + ?Sized,
{
    let mut report = SyncReport::default();

    let synced_nodes: usize = hierarchy
        .tasks
        .iter()
        .map(|task| 1 + task.descendants_within(RECOGNIZED_LEVELS - 1))
        .sum();
    log_found!(synced_nodes, "tasks to sync");

    let mut stack: Vec<(TaskPath, &TaskNode, Option<ParentIssue>)> = hierarchy
        .tasks
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, node)| (TaskPath::root(idx + 1), node, None))
        .collect();

    while let Some((path, node, parent)) = stack.pop() {
        if path.depth() >= RECOGNIZED_LEVELS {
            report.beyond_depth += 1 + node.descendant_count();
            continue;
        }

        match tracker
            .create_issue(&node.title, &node.description, parent.as_ref())
            .await
        {
            Ok(created) => {
                log_item_created!(path, created.issue_type, created.key);

                let as_parent = created.as_parent();
                for (idx, child) in node.children.iter().enumerate().rev() {
                    stack.push((path.child(idx + 1), child, Some(as_parent.clone())));
                }

                report.created.push(SyncedItem {
                    path,
                    key: created.key,
                    issue_type: created.issue_type,
                });
            }
            Err(e) => {
                log_item_failed!(path, e);

                let remaining_levels = RECOGNIZED_LEVELS - 1 - path.depth();
                let skipped = node.descendants_within(remaining_levels);
                if skipped > 0 {
                    log_item_skipped!(
                        path,
                        format!("{} descendant(s) need the missing parent issue", skipped)
                    );
                }
                report.skipped += skipped;
                report.beyond_depth += node.descendant_count() - skipped;

                report.failed.push(FailedItem {
                    path,
                    title: node.title.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    log_stats_summary!(report.created.len(), report.failed.len(), report.skipped);
    report
}
