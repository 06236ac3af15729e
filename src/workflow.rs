//! The branch synchronization workflow.
//!
//! One run brings `target` up to date with `source` through a disposable
//! `<target><suffix>` branch:
//!
//! 1. Stop if either branch name is missing or starts with `-`
//! 2. Stash local changes (after asking) if the tree is dirty
//! 3. Check out and pull `source`
//! 4. Check out and pull `target`, or create it from `source`
//! 5. Create the sync branch fresh, or keep and update an existing one
//! 6. Merge `source` into the sync branch
//!
//! Steps run strictly in order and the first unhandled failure ends the run.
//! Nothing is rolled back: an interrupted or failed run leaves the repository
//! in whatever state the last completed git command produced.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::conflict::{parse_conflicts, ConflictEntry};
use crate::messages;
use crate::output::ProgressSink;
use crate::prompt::UserPrompt;
use crate::runner::{CommandRunner, GitCommandError};

pub const DEFAULT_SYNC_SUFFIX: &str = "-sync";
pub const DEFAULT_STASH_LABEL: &str = "WIP";

const STASH_OPTIONS: [&str; 2] = ["Stash changes and continue", "Cancel"];

/// Everything one run needs. Built once by the caller and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInput {
    pub working_directory: PathBuf,
    pub source_branch: String,
    pub target_branch: String,
    pub sync_suffix: String,
    pub delete_existing_sync_branch: bool,
}

impl WorkflowInput {
    pub fn new(
        working_directory: impl Into<PathBuf>,
        source_branch: impl Into<String>,
        target_branch: impl Into<String>,
    ) -> Self {
        Self {
            working_directory: working_directory.into(),
            source_branch: source_branch.into(),
            target_branch: target_branch.into(),
            sync_suffix: DEFAULT_SYNC_SUFFIX.to_string(),
            delete_existing_sync_branch: false,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.sync_suffix = suffix.into();
        self
    }

    pub fn with_delete_existing(mut self, delete: bool) -> Self {
        self.delete_existing_sync_branch = delete;
        self
    }

    /// `target + suffix`, e.g. `release` + `-sync` = `release-sync`.
    pub fn sync_branch_name(&self) -> String {
        format!("{}{}", self.target_branch.trim(), self.sync_suffix)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    Cancelled,
    ConflictDetected,
    Failed,
}

impl OutcomeStatus {
    /// Process exit code for the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            OutcomeStatus::Success | OutcomeStatus::Cancelled => 0,
            OutcomeStatus::Failed => 1,
            OutcomeStatus::ConflictDetected => 2,
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::Cancelled => write!(f, "cancelled"),
            OutcomeStatus::ConflictDetected => write!(f, "conflict"),
            OutcomeStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl WorkflowOutcome {
    pub fn new(status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Reasons a run stops early.
#[derive(Debug)]
pub enum SyncError {
    /// The operator declined or left a prompt blank
    InputCancelled(String),
    /// A branch name git would read as an option
    InvalidBranch(String),
    /// The tree was dirty and the operator chose not to stash
    DirtyTreeDeclined,
    /// A git command exited non-zero
    CommandFailed { command: String, stderr: String },
    /// `git merge` failed. With no parsed conflicts the merge may never
    /// have started; `stderr` says why.
    MergeConflict {
        source: String,
        sync_branch: String,
        conflicts: Vec<ConflictEntry>,
        stderr: String,
    },
    /// Reading an answer from the operator failed
    Interaction(anyhow::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::InputCancelled(reason) => write!(f, "cancelled: {}", reason),
            SyncError::InvalidBranch(reason) => write!(f, "{}", reason),
            SyncError::DirtyTreeDeclined => write!(f, "working tree has uncommitted changes"),
            SyncError::CommandFailed { command, stderr } => {
                write!(f, "{} failed: {}", command, stderr.trim_end())
            }
            SyncError::MergeConflict {
                source,
                sync_branch,
                conflicts,
                ..
            } => write!(
                f,
                "merging {} into {} produced {} conflict(s)",
                source,
                sync_branch,
                conflicts.len()
            ),
            SyncError::Interaction(err) => write!(f, "prompt failed: {:#}", err),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<SyncError> for WorkflowOutcome {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::InputCancelled(reason) => {
                WorkflowOutcome::new(OutcomeStatus::Cancelled, reason)
            }
            SyncError::InvalidBranch(reason) => WorkflowOutcome::new(OutcomeStatus::Failed, reason),
            SyncError::DirtyTreeDeclined => {
                WorkflowOutcome::new(OutcomeStatus::Cancelled, messages::dirty_tree_declined())
            }
            SyncError::CommandFailed { stderr, .. } => {
                WorkflowOutcome::new(OutcomeStatus::Failed, messages::command_failed(&stderr))
            }
            SyncError::MergeConflict {
                source,
                sync_branch,
                conflicts,
                stderr,
            } => WorkflowOutcome::new(
                OutcomeStatus::ConflictDetected,
                messages::merge_conflict(&source, &sync_branch, &conflicts, &stderr),
            ),
            SyncError::Interaction(err) => {
                WorkflowOutcome::new(OutcomeStatus::Failed, format!("Error: {:#}", err))
            }
        }
    }
}

/// Run the workflow to completion. Never panics and never returns early
/// without an outcome.
pub fn run(
    input: &WorkflowInput,
    runner: &dyn CommandRunner,
    prompt: &dyn UserPrompt,
    progress: &dyn ProgressSink,
) -> WorkflowOutcome {
    let sync = BranchSync {
        dir: &input.working_directory,
        runner,
        prompt,
        progress,
    };

    match sync.execute(input) {
        Ok(message) => WorkflowOutcome::new(OutcomeStatus::Success, message),
        Err(err) => err.into(),
    }
}

struct BranchSync<'a> {
    dir: &'a Path,
    runner: &'a dyn CommandRunner,
    prompt: &'a dyn UserPrompt,
    progress: &'a dyn ProgressSink,
}

impl BranchSync<'_> {
    fn execute(&self, input: &WorkflowInput) -> Result<String, SyncError> {
        let source = input.source_branch.trim();
        if source.is_empty() {
            return Err(SyncError::InputCancelled(messages::branch_required("Source")));
        }
        let target = input.target_branch.trim();
        if target.is_empty() {
            return Err(SyncError::InputCancelled(messages::branch_required("Target")));
        }
        for (role, name) in [("source", source), ("target", target)] {
            if name.starts_with('-') {
                return Err(SyncError::InvalidBranch(messages::invalid_branch(role, name)));
            }
        }
        let sync_branch = input.sync_branch_name();

        self.stash_if_dirty()?;
        self.update_source(source)?;
        self.ensure_target(target)?;
        self.ensure_sync_branch(target, &sync_branch, input.delete_existing_sync_branch)?;
        self.merge(source, &sync_branch)?;

        Ok(messages::sync_complete(target, &sync_branch))
    }

    fn stash_if_dirty(&self) -> Result<(), SyncError> {
        self.progress.progress("Checking for uncommitted changes...");
        let status = self.git(&["status", "--porcelain"])?;

        if status.trim().is_empty() {
            self.progress.progress("No changes to stash.");
            return Ok(());
        }

        let choice = self
            .prompt
            .choose(
                "You have uncommitted changes. Stash them before switching branches?",
                &STASH_OPTIONS,
            )
            .map_err(SyncError::Interaction)?;
        if choice != Some(0) {
            return Err(SyncError::DirtyTreeDeclined);
        }

        let label = self
            .prompt
            .input("Stash message (blank for \"WIP\")", "")
            .map_err(SyncError::Interaction)?
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_STASH_LABEL.to_string());

        self.progress
            .progress(&format!("Stashing changes as \"{}\"...", label));
        self.git(&["stash", "push", "-m", &label])?;
        Ok(())
    }

    fn update_source(&self, source: &str) -> Result<(), SyncError> {
        self.checkout_and_pull(source)
    }

    fn ensure_target(&self, target: &str) -> Result<(), SyncError> {
        if self.exists(target)? {
            return self.checkout_and_pull(target);
        }

        // Created from HEAD, which is the freshly pulled source branch
        self.progress.progress(&format!(
            "Target branch {} does not exist. Creating it...",
            target
        ));
        self.git(&["checkout", "-b", target])?;
        Ok(())
    }

    fn ensure_sync_branch(
        &self,
        target: &str,
        sync_branch: &str,
        delete_existing: bool,
    ) -> Result<(), SyncError> {
        if self.exists(sync_branch)? {
            let recreate = delete_existing || self.ask_recreate(target, sync_branch)?;
            if !recreate {
                return self.checkout_and_pull(sync_branch);
            }

            self.progress.progress(&format!(
                "Branch {} already exists. Deleting it...",
                sync_branch
            ));
            self.git(&["branch", "-D", sync_branch])?;
        }

        self.progress.progress(&format!(
            "Creating a new branch {} from {}...",
            sync_branch, target
        ));
        self.git(&["checkout", "-b", sync_branch])?;
        Ok(())
    }

    /// `true` to delete and recreate, `false` to keep and update.
    fn ask_recreate(&self, target: &str, sync_branch: &str) -> Result<bool, SyncError> {
        let delete = format!("Delete and recreate it from {}", target);
        let keep = "Keep it and pull the latest changes".to_string();
        let question = format!("Branch {} already exists. What would you like to do?", sync_branch);

        let choice = self
            .prompt
            .choose(&question, &[delete.as_str(), keep.as_str()])
            .map_err(SyncError::Interaction)?;

        match choice {
            Some(0) => Ok(true),
            Some(_) => Ok(false),
            None => Err(SyncError::InputCancelled(format!(
                "Sync cancelled; {} was left untouched",
                sync_branch
            ))),
        }
    }

    fn merge(&self, source: &str, sync_branch: &str) -> Result<(), SyncError> {
        self.progress.progress(&format!(
            "Merging {} branch into {}...",
            source, sync_branch
        ));

        if let Err(err) = self.runner.run(self.dir, &["merge", source]) {
            let (conflicts, stderr) = match err.downcast_ref::<GitCommandError>() {
                Some(git_err) => (
                    parse_conflicts(&format!("{}\n{}", git_err.stdout, git_err.stderr)),
                    git_err.stderr.trim().to_string(),
                ),
                None => (Vec::new(), format!("{:#}", err)),
            };
            return Err(SyncError::MergeConflict {
                source: source.to_string(),
                sync_branch: sync_branch.to_string(),
                conflicts,
                stderr,
            });
        }

        self.progress.progress("Merge completed successfully.");
        Ok(())
    }

    fn checkout_and_pull(&self, branch: &str) -> Result<(), SyncError> {
        self.progress
            .progress(&format!("Checking out {} branch...", branch));
        self.git(&["checkout", branch])?;

        self.progress
            .progress(&format!("Pulling latest changes from {} branch...", branch));
        self.git(&["pull", "origin", branch])?;
        Ok(())
    }

    fn exists(&self, branch: &str) -> Result<bool, SyncError> {
        self.progress
            .progress(&format!("Checking whether {} exists...", branch));
        self.runner
            .branch_exists(self.dir, branch)
            .map_err(|err| SyncError::CommandFailed {
                command: format!("git rev-parse --verify {}", branch),
                stderr: format!("{:#}", err),
            })
    }

    fn git(&self, args: &[&str]) -> Result<String, SyncError> {
        self.runner.run(self.dir, args).map_err(|err| {
            let command = format!("git {}", args.join(" "));
            match err.downcast_ref::<GitCommandError>() {
                Some(git_err) => SyncError::CommandFailed {
                    command,
                    stderr: git_err.stderr.clone(),
                },
                None => SyncError::CommandFailed {
                    command,
                    stderr: format!("{:#}", err),
                },
            }
        })
    }
}
