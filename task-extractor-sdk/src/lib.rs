// Re-export async trait for convenience
pub use async_trait::async_trait;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix written in front of every structured event line on stderr
pub const EVENT_PREFIX: &str = "__TE_EVENT__:";

/// Final state of a step run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    CompletedWithFailures,
    Failed,
}

/// Structured logging events emitted while a step runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunLog {
    /// A step run started
    RunStarted { run_id: Uuid, step: String },
    /// A step run finished
    RunFinished { run_id: Uuid, status: RunStatus },
    /// Phase started
    PhaseStarted { phase: usize, name: String },
    /// Phase completed
    PhaseCompleted { phase: usize, name: String },
    /// Phase failed
    PhaseFailed {
        phase: usize,
        name: String,
        error: String,
    },
    /// An item of the hierarchy was created in the tracker
    ItemCreated {
        item_id: String,
        issue_key: String,
        issue_type: String,
    },
    /// Creating an item failed
    ItemFailed { item_id: String, error: String },
    /// An item was not attempted
    ItemSkipped { item_id: String, reason: String },
    /// A branch was created on the repository host
    BranchCreated { branch: String },
    /// Creating a branch failed
    BranchFailed { branch: String, error: String },
    /// State file written (hierarchy, test cases)
    StateFileCreated {
        file_path: String,
        description: String,
    },
}

/// Wire form of an event: the event plus the time it was emitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: RunLog,
}

impl RunLog {
    /// Render this event as a single prefixed line
    pub fn to_line(&self) -> Option<String> {
        let event = RunEvent {
            at: Utc::now(),
            event: self.clone(),
        };
        serde_json::to_string(&event)
            .ok()
            .map(|json| format!("{}{}", EVENT_PREFIX, json))
    }

    /// Emit this log event to stderr for machine consumers
    pub fn emit(&self) {
        if let Some(line) = self.to_line() {
            use std::io::Write;
            eprintln!("{}", line);
            let _ = std::io::stderr().flush();
        }
    }

    /// Parse a line previously produced by [`RunLog::to_line`]
    pub fn parse_line(line: &str) -> Option<RunEvent> {
        let json = line.strip_prefix(EVENT_PREFIX)?;
        serde_json::from_str(json).ok()
    }
}

/// Identity of one step run; brackets the run's events
#[derive(Debug, Clone)]
pub struct RunHandle {
    pub id: Uuid,
    pub step: String,
}

impl RunHandle {
    /// Start a run and emit `RunStarted`
    pub fn start(step: impl Into<String>) -> Self {
        let handle = Self {
            id: Uuid::new_v4(),
            step: step.into(),
        };
        RunLog::RunStarted {
            run_id: handle.id,
            step: handle.step.clone(),
        }
        .emit();
        handle
    }

    /// Emit `RunFinished` with the given status
    pub fn finish(&self, status: RunStatus) {
        RunLog::RunFinished {
            run_id: self.id,
            status,
        }
        .emit();
    }
}

/// Helper macros for structured run logging
#[macro_export]
macro_rules! log_phase_start {
    ($phase:expr, $name:expr) => {
        $crate::RunLog::PhaseStarted {
            phase: $phase,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $name:expr) => {
        $crate::RunLog::PhaseCompleted {
            phase: $phase,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_failed {
    ($phase:expr, $name:expr, $error:expr) => {
        $crate::RunLog::PhaseFailed {
            phase: $phase,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_state_file {
    ($path:expr, $desc:expr) => {
        $crate::RunLog::StateFileCreated {
            file_path: $path.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Colored console output for human-readable logs. The item macros also emit
// the matching structured RunLog event.
// ============================================================================

/// Logs the start of a step with a header and description.
///
/// Outputs:
/// ```text
/// ═══ STEP 1: Extract ═══
/// Generate the task hierarchy from a document
/// ```
#[macro_export]
macro_rules! log_phase_start_console {
    ($phase:expr, $title:expr, $description:expr) => {
        println!("\x1b[1;36m═══ STEP {}: {} ═══\x1b[0m", $phase, $title);
        println!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs the completion of a step.
#[macro_export]
macro_rules! log_phase_complete_console {
    ($phase:expr) => {
        println!("\x1b[32m✓ Step {} complete\x1b[0m", $phase);
    };
}

/// Logs a created tracker item and emits `ItemCreated`.
///
/// Outputs:
/// ```text
/// ✓ T1.2 → Task PROJ-12
/// ```
#[macro_export]
macro_rules! log_item_created {
    ($item_id:expr, $issue_type:expr, $issue_key:expr) => {
        println!(
            "\x1b[32m✓ {} → {} {}\x1b[0m",
            $item_id, $issue_type, $issue_key
        );
        $crate::RunLog::ItemCreated {
            item_id: $item_id.to_string(),
            issue_key: $issue_key.to_string(),
            issue_type: $issue_type.to_string(),
        }
        .emit();
    };
}

/// Logs a failed tracker item and emits `ItemFailed`.
#[macro_export]
macro_rules! log_item_failed {
    ($item_id:expr, $error:expr) => {
        println!("\x1b[31m✗ {}: {}\x1b[0m", $item_id, $error);
        $crate::RunLog::ItemFailed {
            item_id: $item_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

/// Logs an item that was not attempted and emits `ItemSkipped`.
#[macro_export]
macro_rules! log_item_skipped {
    ($item_id:expr, $reason:expr) => {
        println!("\x1b[33m↷ {} skipped: {}\x1b[0m", $item_id, $reason);
        $crate::RunLog::ItemSkipped {
            item_id: $item_id.to_string(),
            reason: $reason.to_string(),
        }
        .emit();
    };
}

/// Logs a created branch and emits `BranchCreated`.
#[macro_export]
macro_rules! log_branch_created {
    ($branch:expr) => {
        println!("\x1b[32m✓ Created branch: {}\x1b[0m", $branch);
        $crate::RunLog::BranchCreated {
            branch: $branch.to_string(),
        }
        .emit();
    };
}

/// Logs a failed branch and emits `BranchFailed`.
#[macro_export]
macro_rules! log_branch_failed {
    ($branch:expr, $error:expr) => {
        println!("\x1b[31m✗ Failed to create branch {}: {}\x1b[0m", $branch, $error);
        $crate::RunLog::BranchFailed {
            branch: $branch.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

/// Logs a summary line for a walk.
///
/// Outputs:
/// ```text
/// Total: 7 created, 1 failed, 2 skipped
/// ```
#[macro_export]
macro_rules! log_stats_summary {
    ($created:expr, $failed:expr, $skipped:expr) => {
        println!(
            "\x1b[1mTotal: \x1b[32m{} created\x1b[0m, \x1b[31m{} failed\x1b[0m, {} skipped",
            $created, $failed, $skipped
        );
    };
}

/// Logs the number of items found.
///
/// Outputs:
/// ```text
/// Found 14 tasks to sync
/// ```
#[macro_export]
macro_rules! log_found {
    ($count:expr, $item_type:expr) => {
        println!("\x1b[36mFound {} {}\x1b[0m", $count, $item_type);
    };
}

/// Logs an informational message.
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been saved.
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}

/// Logs a debug message (intended to be used conditionally).
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        println!("\x1b[2m[DEBUG] {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[2m[DEBUG] {}\x1b[0m", format!($fmt, $($arg)*));
    };
}
