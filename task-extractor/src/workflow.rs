//! Step orchestration for the task extractor.
//!
//! One invocation runs one step:
//! 1. `extract` - document → model → parsed hierarchy → summary file
//! 2. `view` - statistics, tree and table of the summary file
//! 3. `jira` - one tracker issue per node (Epic / Task / Subtask)
//! 4. `branches` - one repository branch per node
//! 5. `test-cases` - one markdown file of test cases per node
//!
//! Every step except `extract` starts from the persisted hierarchy.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::{Args, Step, ViewFormat};
use crate::config::AppConfig;
use crate::document::load_document;
use crate::hierarchy::render::render_all;
use crate::hierarchy::store::{load_hierarchy, save_hierarchy, save_raw, DEFAULT_SUMMARY_FILE};
use crate::hierarchy::{count_tasks, flatten, parse_or_fallback, Hierarchy, ParseOutcome, TaskCounts, TaskRow};
use crate::llm::prompts::TEST_CASE_SYSTEM_PROMPT;
use crate::llm::{extract_tasks, GeminiClient, GroqClient, LlmBackend, OllamaRunner, TextGenerator};
use crate::repository::{create_branches, GithubClient};
use crate::test_cases::{generate_test_cases, TestCaseMode, DEFAULT_OUTPUT_DIR};
use crate::tracker::{sync_to_tracker, JiraClient};
use task_extractor_sdk::{
    log_debug, log_file_saved, log_found, log_info, log_phase_complete, log_phase_complete_console,
    log_phase_failed, log_phase_start, log_phase_start_console, log_state_file, log_stats_summary,
    log_warning, RunHandle, RunStatus,
};

/// Run configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub step: Step,

    /// Project document for extract
    pub document: Option<PathBuf>,

    pub backend: LlmBackend,

    /// Persisted hierarchy
    pub summary_path: PathBuf,

    pub format: ViewFormat,

    /// Overrides the configured base branch
    pub base_branch: Option<String>,

    /// Directory for test case files
    pub output_dir: PathBuf,

    /// Template test cases, no model call
    pub simulate: bool,

    pub debug: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        RunConfig {
            step: args.step,
            document: args.document.map(PathBuf::from),
            backend: args.backend,
            summary_path: args
                .summary
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_FILE)),
            format: args.format,
            base_branch: args.base_branch,
            output_dir: args
                .output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            simulate: args.simulate,
            debug: args.debug,
        }
    }
}

/// Statistics plus table, as emitted by `view --format json|yaml`
#[derive(Debug, Serialize)]
pub struct HierarchyView {
    pub counts: TaskCounts,
    pub total: usize,
    pub rows: Vec<TaskRow>,
}

impl HierarchyView {
    pub fn of(hierarchy: &Hierarchy) -> Self {
        let counts = count_tasks(hierarchy);
        HierarchyView {
            counts,
            total: counts.total(),
            rows: flatten(hierarchy),
        }
    }
}

/// Run the selected step, bracketed by `RunStarted` / `RunFinished` events
pub async fn run(config: RunConfig, app: &AppConfig) -> Result<RunStatus> {
    let handle = RunHandle::start(config.step.name());
    if config.debug {
        log_debug!("{:#?}", config);
    }

    let result = match config.step {
        Step::Extract => run_extract(&config, app).await,
        Step::View => run_view(&config),
        Step::Jira => run_jira(&config, app).await,
        Step::Branches => run_branches(&config, app).await,
        Step::TestCases => run_test_cases(&config, app).await,
    };

    match result {
        Ok(status) => {
            handle.finish(status);
            Ok(status)
        }
        Err(e) => {
            handle.finish(RunStatus::Failed);
            Err(e)
        }
    }
}

/// Pick the configured generator for extraction
pub fn build_generator(backend: LlmBackend, app: &AppConfig) -> Result<Box<dyn TextGenerator>> {
    let generator: Box<dyn TextGenerator> = match backend {
        LlmBackend::Ollama => Box::new(OllamaRunner::new(app.ollama_model.clone())),
        LlmBackend::Gemini => Box::new(GeminiClient::new(&app.gemini()?)),
        LlmBackend::Groq => Box::new(GroqClient::new(&app.groq()?)),
    };
    Ok(generator)
}

// ============================================================================
// Steps
// ============================================================================

async fn run_extract(config: &RunConfig, app: &AppConfig) -> Result<RunStatus> {
    log_phase_start_console!(1, "Extract", "Generate the task hierarchy from a document");
    log_phase_start!(1, "Extract");

    let document_path = config
        .document
        .as_deref()
        .context("The extract step requires a document")?;
    let document = load_document(document_path)?;
    log_info!("Loaded {} ({} chars)", document_path.display(), document.len());

    let generator = build_generator(config.backend, app)?;
    let extraction = match extract_tasks(generator.as_ref(), &document).await {
        Ok(extraction) => extraction,
        Err(e) => {
            log_phase_failed!(1, "Extract", e);
            return Err(e).context("Text generation failed");
        }
    };
    if config.debug {
        log_debug!("Model answer:\n{}", extraction.text);
    }

    let status = match parse_or_fallback(&extraction.text) {
        ParseOutcome::Parsed(hierarchy) => {
            save_hierarchy(&hierarchy, &config.summary_path)?;
            log_found!(count_tasks(&hierarchy).total(), "tasks");
            println!("{}", render_all(&hierarchy));
            RunStatus::Completed
        }
        ParseOutcome::Unparsed { text, error } => {
            log_warning!("Could not parse the model answer as a task hierarchy: {}", error);
            log_warning!("Saving the raw answer for inspection");
            save_raw(&text, &config.summary_path)?;
            RunStatus::CompletedWithFailures
        }
    };

    log_file_saved!(config.summary_path.display());
    log_state_file!(config.summary_path.display(), "Extracted task hierarchy");
    log_phase_complete!(1, "Extract");
    log_phase_complete_console!(1);
    Ok(status)
}

fn run_view(config: &RunConfig) -> Result<RunStatus> {
    let hierarchy = load_summary(&config.summary_path)?;
    println!("{}", render_view(&hierarchy, config.format)?);
    Ok(RunStatus::Completed)
}

/// Render a hierarchy in the requested output format
pub fn render_view(hierarchy: &Hierarchy, format: ViewFormat) -> Result<String> {
    let rendered = match format {
        ViewFormat::Text => render_all(hierarchy),
        ViewFormat::Json => serde_json::to_string_pretty(&HierarchyView::of(hierarchy))?,
        ViewFormat::Yaml => serde_yaml::to_string(&HierarchyView::of(hierarchy))?,
    };
    Ok(rendered)
}

async fn run_jira(config: &RunConfig, app: &AppConfig) -> Result<RunStatus> {
    log_phase_start_console!(3, "Jira", "Create Epic / Task / Subtask issues");
    log_phase_start!(3, "Jira");

    let jira = app.jira()?;
    let hierarchy = load_summary(&config.summary_path)?;
    let client = JiraClient::new(&jira);

    let report = sync_to_tracker(&hierarchy, &client).await;
    if report.beyond_depth > 0 {
        log_warning!(
            "{} items nested deeper than Subtask were not sent to Jira",
            report.beyond_depth
        );
    }

    log_phase_complete!(3, "Jira");
    log_phase_complete_console!(3);
    Ok(if report.is_complete() {
        RunStatus::Completed
    } else {
        RunStatus::CompletedWithFailures
    })
}

async fn run_branches(config: &RunConfig, app: &AppConfig) -> Result<RunStatus> {
    log_phase_start_console!(4, "Branches", "Create one branch per task");
    log_phase_start!(4, "Branches");

    let github = app.github()?;
    let hierarchy = load_summary(&config.summary_path)?;
    let base = config
        .base_branch
        .clone()
        .unwrap_or_else(|| app.github_base_branch.clone());
    let client = GithubClient::new(&github);

    let report = create_branches(&hierarchy, &client, &base).await;
    log_stats_summary!(report.created.len(), report.failed.len(), 0);

    log_phase_complete!(4, "Branches");
    log_phase_complete_console!(4);
    Ok(if report.failed.is_empty() {
        RunStatus::Completed
    } else {
        RunStatus::CompletedWithFailures
    })
}

async fn run_test_cases(config: &RunConfig, app: &AppConfig) -> Result<RunStatus> {
    log_phase_start_console!(5, "Test Cases", "Write test cases for every task");
    log_phase_start!(5, "Test Cases");

    let hierarchy = load_summary(&config.summary_path)?;

    let report = if config.simulate {
        generate_test_cases(&hierarchy, TestCaseMode::Simulated, &config.output_dir).await?
    } else {
        let groq = app.groq_test_cases()?;
        let client = GroqClient::new(&groq).with_system_prompt(TEST_CASE_SYSTEM_PROMPT);
        generate_test_cases(&hierarchy, TestCaseMode::Ai(&client), &config.output_dir).await?
    };
    log_stats_summary!(report.written.len(), report.failed.len(), 0);

    log_phase_complete!(5, "Test Cases");
    log_phase_complete_console!(5);
    Ok(if report.failed.is_empty() {
        RunStatus::Completed
    } else {
        RunStatus::CompletedWithFailures
    })
}

fn load_summary(path: &Path) -> Result<Hierarchy> {
    load_hierarchy(path).with_context(|| {
        format!(
            "No usable task hierarchy at {}; run --step extract first",
            path.display()
        )
    })
}
