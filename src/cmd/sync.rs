//! `branch-sync sync`: the host side of the workflow.
//!
//! Collects branch names (arguments first, prompts second), layers CLI flags
//! over the loaded config, runs the workflow and reports its outcome.

use anyhow::Result;
use serde_json::json;
use std::path::Path;
use std::sync::{Arc, Mutex};

use branch_sync::config::{suffix_issues, Config};
use branch_sync::output::{Output, OutputMode, ProgressSink};
use branch_sync::prompt::{TerminalPrompt, UserPrompt};
use branch_sync::runner::GitCli;
use branch_sync::ui::colors;
use branch_sync::workflow::{self, OutcomeStatus, WorkflowInput, WorkflowOutcome};

use super::resolve_workdir;

/// Arguments of the `sync` subcommand.
#[derive(Debug, Default)]
pub struct SyncArgs {
    pub source: Option<String>,
    pub target: Option<String>,
    pub dir: Option<String>,
    pub suffix: Option<String>,
    pub delete_existing: bool,
}

pub fn cmd_sync(args: SyncArgs, output: &Output) -> Result<OutcomeStatus> {
    let workdir = resolve_workdir(args.dir.as_deref())?;
    let config = Config::load(&workdir)?;
    let prompt = TerminalPrompt::new();

    let input = build_input(&args, &config, &workdir, &prompt)?;

    let tracker = StepTracker::new(output.clone());
    setup_interrupt_handler(tracker.last_step());

    let outcome = workflow::run(&input, &GitCli::new(), &prompt, &tracker);
    report_outcome(&outcome, &input, output);

    Ok(outcome.status)
}

/// Build the run input. A cancelled source prompt skips the target prompt;
/// the workflow then reports the missing branch.
pub fn build_input(
    args: &SyncArgs,
    config: &Config,
    workdir: &Path,
    prompt: &dyn UserPrompt,
) -> Result<WorkflowInput> {
    let suffix = match &args.suffix {
        Some(suffix) => {
            if let Some(issue) = suffix_issues(suffix).into_iter().next() {
                anyhow::bail!("Invalid --suffix: {}", issue);
            }
            suffix.clone()
        }
        None => config.target_branch_suffix.clone(),
    };

    let (source_prefill, target_prefill) = config.prompt_prefill();

    let source = branch_arg(args.source.as_deref(), "Enter source branch", source_prefill, prompt)?;
    let target = if source.is_empty() {
        String::new()
    } else {
        branch_arg(args.target.as_deref(), "Enter target branch", target_prefill, prompt)?
    };

    Ok(WorkflowInput::new(workdir, source, target)
        .with_suffix(suffix)
        .with_delete_existing(args.delete_existing || config.delete_before_sync))
}

fn branch_arg(
    given: Option<&str>,
    question: &str,
    prefill: &str,
    prompt: &dyn UserPrompt,
) -> Result<String> {
    match given.map(str::trim).filter(|b| !b.is_empty()) {
        Some(branch) => Ok(branch.to_string()),
        None => Ok(prompt.input(question, prefill)?.unwrap_or_default()),
    }
}

fn report_outcome(outcome: &WorkflowOutcome, input: &WorkflowInput, output: &Output) {
    if output.mode() == OutputMode::Json {
        output.event(&json!({
            "level": "outcome",
            "status": outcome.status.to_string(),
            "message": outcome.message,
            "source": input.source_branch,
            "target": input.target_branch,
            "sync_branch": input.sync_branch_name(),
            "ts": branch_sync::utc_now_iso(),
        }));
        return;
    }

    let (headline, rest) = match outcome.message.split_once('\n') {
        Some((headline, rest)) => (headline, rest.trim_start_matches('\n')),
        None => (outcome.message.as_str(), ""),
    };

    match outcome.status {
        OutcomeStatus::Success => output.success(headline),
        OutcomeStatus::Cancelled => output.warn(headline),
        OutcomeStatus::ConflictDetected | OutcomeStatus::Failed => output.error(headline),
    }
    if !rest.is_empty() {
        output.detail(rest);
    }
}

/// Forwards progress to the output and remembers the latest step, so an
/// interrupt can tell the operator where the repository was left.
struct StepTracker {
    output: Output,
    last: Arc<Mutex<String>>,
}

impl StepTracker {
    fn new(output: Output) -> Self {
        Self {
            output,
            last: Arc::new(Mutex::new(String::from("Starting"))),
        }
    }

    fn last_step(&self) -> Arc<Mutex<String>> {
        Arc::clone(&self.last)
    }
}

impl ProgressSink for StepTracker {
    fn progress(&self, message: &str) {
        if let Ok(mut last) = self.last.lock() {
            *last = message.to_string();
        }
        self.output.progress(message);
    }
}

/// Ctrl+C does not roll anything back; say where we stopped and exit 130.
fn setup_interrupt_handler(last_step: Arc<Mutex<String>>) {
    let _ = ctrlc::set_handler(move || {
        let step = last_step
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|_| "unknown step".to_string());
        eprintln!("\n{} Interrupted during: {}", colors::error("✗"), step);
        eprintln!(
            "  {} The repository was left as-is; check `git status` and `git stash list`",
            colors::secondary("→")
        );
        std::process::exit(130);
    });
}
