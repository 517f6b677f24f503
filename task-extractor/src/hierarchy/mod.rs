//! Task hierarchy: model, parsing, aggregation and persistence.
//!
//! ## Module Structure
//!
//! - `types` - `TaskNode`, `Hierarchy`, positional `TaskPath` IDs
//! - `parser` - greedy JSON extraction and validated tree construction
//! - `aggregate` - per-level counts and the flattened table
//! - `store` - the persisted `summary.json` file
//! - `render` - plain-text views for the CLI

pub mod aggregate;
pub mod parser;
pub mod render;
pub mod store;
pub mod types;

pub use aggregate::{count_tasks, flatten};
pub use parser::{extract_json_span, extract_or_raw, parse_hierarchy, parse_or_fallback, ParseOutcome};
pub use types::{Hierarchy, TaskCounts, TaskLevel, TaskNode, TaskPath, TaskRow, RECOGNIZED_LEVELS};
