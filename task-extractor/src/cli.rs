//! CLI argument definitions for the task extractor.

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::llm::LlmBackend;

/// Which step to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
    /// Ask the model for a hierarchy and persist it
    Extract,
    /// Show statistics, tree and table of the persisted hierarchy
    View,
    /// Create tracker issues (Epic / Task / Subtask)
    Jira,
    /// Create one repository branch per item
    Branches,
    /// Write test cases for every item
    TestCases,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Extract => "extract",
            Step::View => "view",
            Step::Jira => "jira",
            Step::Branches => "branches",
            Step::TestCases => "test-cases",
        }
    }
}

/// Output format for the view step
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewFormat {
    Text,
    Json,
    Yaml,
}

/// Task hierarchy extractor
///
/// Turns a project document into an Epic / Task / Subtask hierarchy with an
/// LLM, then optionally pushes it to Jira, creates GitHub branches or writes
/// test cases.
#[derive(Parser, Debug, Clone)]
#[command(name = "task-extractor")]
#[command(about = "Extract an Epic / Task / Subtask hierarchy from a project document")]
#[command(version)]
pub struct Args {
    /// Which step to run
    #[arg(long, value_enum, value_name = "STEP")]
    pub step: Step,

    /// Project document (.docx, .txt or .md); required for extract
    #[arg(long, value_name = "PATH")]
    pub document: Option<String>,

    /// Text generation backend for extract
    #[arg(long, value_enum, default_value = "ollama")]
    pub backend: LlmBackend,

    /// Persisted hierarchy file
    ///
    /// Written by extract, read by every other step. Defaults to ./summary.json
    #[arg(long, value_name = "PATH")]
    pub summary: Option<String>,

    /// Output format for view
    #[arg(long, value_enum, default_value = "text")]
    pub format: ViewFormat,

    /// Base branch for new branches (defaults to GITHUB_BASE_BRANCH or main)
    #[arg(long, value_name = "BRANCH")]
    pub base_branch: Option<String>,

    /// Directory for generated test cases. Defaults to ./test_cases
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<String>,

    /// Write template test cases instead of asking the model
    #[arg(long)]
    pub simulate: bool,

    /// Enable debug output
    ///
    /// Prints raw model answers and the resolved run configuration.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Validate arguments for the selected step
    pub fn validate(&self) -> Result<()> {
        match self.step {
            Step::Extract if self.document.is_none() => {
                anyhow::bail!("The extract step requires --document")
            }
            Step::TestCases | Step::Extract | Step::View | Step::Jira | Step::Branches => {}
        }

        if self.simulate && self.step != Step::TestCases {
            anyhow::bail!("--simulate only applies to the test-cases step");
        }
        Ok(())
    }
}
