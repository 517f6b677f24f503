//! Issue tracker collaborator and the hierarchy sync walker.
//!
//! - `jira` - REST client for Jira Cloud
//! - `sync` - parent-before-child creation walk
//!
//! Sync is not idempotent: running it twice creates every issue twice.

pub mod jira;
pub mod sync;

use serde::{Deserialize, Serialize};
use std::fmt;
use task_extractor_sdk::async_trait;

use crate::error::ExternalCallError;

pub use jira::JiraClient;
pub use sync::{sync_to_tracker, FailedItem, SyncReport, SyncedItem};

/// Tracker issue types the hierarchy maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    Epic,
    Task,
    Subtask,
}

impl IssueType {
    /// Type for a new issue given its parent's type
    ///
    /// No parent → Epic, Epic → Task, Task → Subtask; anything else falls
    /// back to Task.
    pub fn infer(parent: Option<IssueType>) -> IssueType {
        match parent {
            None => IssueType::Epic,
            Some(IssueType::Epic) => IssueType::Task,
            Some(IssueType::Task) => IssueType::Subtask,
            Some(IssueType::Subtask) => IssueType::Task,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IssueType::Epic => "Epic",
            IssueType::Task => "Task",
            IssueType::Subtask => "Subtask",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to an already created parent issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentIssue {
    pub key: String,
    pub issue_type: IssueType,
}

/// What the tracker returned for a created issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub key: String,
    pub issue_type: IssueType,
}

impl CreatedIssue {
    /// Use this issue as the parent of the next level
    pub fn as_parent(&self) -> ParentIssue {
        ParentIssue {
            key: self.key.clone(),
            issue_type: self.issue_type,
        }
    }
}

/// External issue tracker
///
/// Implementations apply [`IssueType::infer`] to pick the type and report
/// failures as errors rather than panicking, so a walk can continue with
/// sibling items.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn create_issue(
        &self,
        summary: &str,
        description: &str,
        parent: Option<&ParentIssue>,
    ) -> Result<CreatedIssue, ExternalCallError>;
}
