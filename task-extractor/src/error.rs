//! Error taxonomy shared by the hierarchy parser and the external collaborators.
//!
//! - [`ParseError`] - malformed or missing hierarchy structure; recoverable, the
//!   run continues without a hierarchy
//! - [`ExternalCallError`] - one tracker, repository host or LLM call failed;
//!   recoverable per node, never retried
//! - [`ConfigurationError`] - a collaborator is missing required settings;
//!   reported before any call is attempted

/// The raw text could not be turned into a hierarchy
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No `{ ... }` span was found in the text
    #[error("no JSON object found in text")]
    NoJsonObject,

    /// The located span is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The top-level value is not an object with a `tasks` array
    #[error("structure missing required root key `tasks`")]
    MissingRootKey,

    /// One entry of the tree could not be coerced into a task node
    #[error("invalid task at {path}: {reason}")]
    InvalidNode { path: String, reason: String },
}

/// A call to an external collaborator failed
#[derive(Debug, thiserror::Error)]
pub enum ExternalCallError {
    /// Transport level failure (connect, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The collaborator answered with an unexpected status
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The answer was well-formed HTTP but not the expected payload
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A local helper process failed
    #[error("process error: {0}")]
    Process(String),

    /// Local I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExternalCallError {
    /// Build a `Status` error from a non-success response, keeping its body
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ExternalCallError::Status { status, body }
    }
}

/// A collaborator cannot be constructed from the current configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// One or more required variables are unset or empty
    #[error("{collaborator} is not configured: missing {}", .variables.join(", "))]
    Missing {
        collaborator: &'static str,
        variables: Vec<&'static str>,
    },
}
