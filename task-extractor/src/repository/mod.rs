//! Source-control host collaborator and the branch creation walk.
//!
//! Every node on the three recognized levels gets a branch named after its
//! own title. Names are not de-duplicated: two nodes with the same derived
//! name collide at the host and the second creation fails.

pub mod github;

use serde::Serialize;
use task_extractor_sdk::{async_trait, log_branch_created, log_branch_failed, log_found};

use crate::error::ExternalCallError;
use crate::hierarchy::{Hierarchy, RECOGNIZED_LEVELS};

pub use github::GithubClient;

/// External repository host
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Create `name` pointing at the current head of `base`
    async fn create_branch(&self, name: &str, base: &str) -> Result<(), ExternalCallError>;
}

/// Branch name for a title: lowercase, spaces and periods become `_`
pub fn branch_name_for(title: &str) -> String {
    title.replace(&[' ', '.'][..], "_").to_lowercase()
}

/// A branch that could not be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedBranch {
    pub name: String,
    pub error: String,
}

/// Outcome of one branch walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchReport {
    pub created: Vec<String>,
    pub failed: Vec<FailedBranch>,
}

/// Create one branch per recognized node, sequentially
pub async fn create_branches<H>(hierarchy: &Hierarchy, host: &H, base: &str) -> BranchReport
where
    H: RepositoryHost + ?Sized,
{
    let mut report = BranchReport::default();

    let names: Vec<String> = hierarchy
        .walk()
        .filter(|(path, _)| path.depth() < RECOGNIZED_LEVELS)
        .map(|(_, node)| branch_name_for(&node.title))
        .collect();
    log_found!(names.len(), "branches to create");

    for name in names {
        match host.create_branch(&name, base).await {
            Ok(()) => {
                log_branch_created!(name);
                report.created.push(name);
            }
            Err(e) => {
                log_branch_failed!(name, e);
                report.failed.push(FailedBranch {
                    name,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
