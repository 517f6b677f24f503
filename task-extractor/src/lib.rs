// Environment-driven settings for every collaborator
pub mod config;

// Error types shared across modules
pub mod error;

// Task hierarchy model, parsing and views
pub mod hierarchy;

// Document loading
pub mod document;

// Text generation backends and prompts
pub mod llm;

// Issue tracker sync
pub mod tracker;

// Repository branch creation
pub mod repository;

// Test case generation
pub mod test_cases;

// CLI and step orchestration
pub mod cli;
pub mod workflow;

pub use error::{ConfigurationError, ExternalCallError, ParseError};
