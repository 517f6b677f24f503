//! Hierarchy parsing from free-form model output.
//!
//! Model responses usually wrap the JSON object in prose or code fences.
//! Extraction is greedy: everything from the first `{` to the last `}`.
//! Braces in the surrounding prose end up inside the candidate and make it
//! fail to parse.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::hierarchy::types::{Hierarchy, TaskNode};

/// Key holding the root sequence
pub const ROOT_KEY: &str = "tasks";

/// Key holding a node's children
pub const CHILDREN_KEY: &str = "subtasks";

/// Result of [`parse_or_fallback`]
#[derive(Debug)]
pub enum ParseOutcome {
    /// The text held a valid hierarchy
    Parsed(Hierarchy),
    /// The text is kept as-is for manual inspection
    Unparsed { text: String, error: ParseError },
}

/// Greedy JSON span: first `{` through last `}`
///
/// Returns `None` when either brace is missing or the last `}` comes before
/// the first `{`.
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// The JSON span when one exists, otherwise the trimmed raw text
pub fn extract_or_raw(raw: &str) -> &str {
    extract_json_span(raw).unwrap_or_else(|| raw.trim())
}

/// Parse raw text into a hierarchy
pub fn parse_hierarchy(raw: &str) -> Result<Hierarchy, ParseError> {
    let candidate = extract_json_span(raw).ok_or(ParseError::NoJsonObject)?;
    let value: Value = serde_json::from_str(candidate)?;

    let tasks = value
        .as_object()
        .and_then(|root| root.get(ROOT_KEY))
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingRootKey)?;

    let tasks = coerce_nodes(tasks, ROOT_KEY)?;
    Ok(Hierarchy::new(tasks))
}

/// Parse, keeping the text when it is not a hierarchy
pub fn parse_or_fallback(raw: &str) -> ParseOutcome {
    match parse_hierarchy(raw) {
        Ok(hierarchy) => ParseOutcome::Parsed(hierarchy),
        Err(error) => ParseOutcome::Unparsed {
            text: extract_or_raw(raw).to_string(),
            error,
        },
    }
}

fn coerce_nodes(entries: &[Value], parent_path: &str) -> Result<Vec<TaskNode>, ParseError> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| coerce_node(entry, &format!("{}[{}]", parent_path, idx)))
        .collect()
}

fn coerce_node(entry: &Value, path: &str) -> Result<TaskNode, ParseError> {
    let object = entry.as_object().ok_or_else(|| invalid(path, "expected an object"))?;

    let title = match object.get("title") {
        Some(Value::String(title)) => normalize_title(title),
        Some(Value::Null) | None => String::new(),
        Some(_) => return Err(invalid(path, "title must be a string")),
    };
    if title.is_empty() {
        return Err(invalid(path, "missing title"));
    }

    let description = optional_string(object, "description", path)?;

    let children = match object.get(CHILDREN_KEY) {
        Some(Value::Array(children)) => {
            coerce_nodes(children, &format!("{}.{}", path, CHILDREN_KEY))?
        }
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(invalid(path, "subtasks must be an array")),
    };

    Ok(TaskNode {
        title,
        description,
        children,
    })
}

fn optional_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, ParseError> {
    match object.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(_) => Err(invalid(path, &format!("{} must be a string", key))),
    }
}

/// Trim and collapse newlines, tabs and other control characters into single spaces
fn normalize_title(title: &str) -> String {
    title
        .split(|c: char| c.is_control() || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn invalid(path: &str, reason: &str) -> ParseError {
    ParseError::InvalidNode {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
