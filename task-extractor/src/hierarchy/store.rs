//! Persisted hierarchy file (`summary.json` by default).
//!
//! The file holds either the canonical `{"tasks": [...]}` serialization or,
//! when the model answer could not be parsed, the raw answer so an operator
//! can inspect it. Loading always goes through the parser.

use anyhow::{Context, Result};
use std::path::Path;

use crate::hierarchy::parser::parse_hierarchy;
use crate::hierarchy::types::Hierarchy;

/// Default file name for the persisted hierarchy
pub const DEFAULT_SUMMARY_FILE: &str = "summary.json";

/// Write the canonical serialization
pub fn save_hierarchy(hierarchy: &Hierarchy, path: &Path) -> Result<()> {
    let json = hierarchy
        .to_json_pretty()
        .context("Failed to serialize hierarchy")?;
    save_raw(&json, path)
}

/// Write text as-is (used for unparsed model output)
pub fn save_raw(text: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read and parse a persisted hierarchy
pub fn load_hierarchy(path: &Path) -> Result<Hierarchy> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let hierarchy = parse_hierarchy(&text)
        .with_context(|| format!("Failed to parse hierarchy from {}", path.display()))?;
    Ok(hierarchy)
}
