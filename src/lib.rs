//! # branch-sync
//!
//! Brings a target branch up to date with a source branch without touching
//! the target directly: the merge happens on a disposable `<target>-sync`
//! branch that can be pushed and opened as a pull request.
//!
//! ## Modules
//!
//! - [`workflow`] - the sync run itself and its outcome types
//! - [`runner`] - git command execution ([`runner::GitCli`], [`runner::InMemoryRunner`])
//! - [`prompt`] - operator prompts ([`prompt::TerminalPrompt`], [`prompt::ScriptedPrompt`])
//! - [`output`] - progress reporting in human, JSON, or quiet mode
//! - [`config`] - layered configuration
//! - [`conflict`] - conflict details parsed from merge output
//! - [`messages`] - operator-facing result messages
//!
//! ## Example
//!
//! ```no_run
//! use branch_sync::output::{Output, OutputMode};
//! use branch_sync::prompt::TerminalPrompt;
//! use branch_sync::runner::GitCli;
//! use branch_sync::workflow::{self, WorkflowInput};
//!
//! let input = WorkflowInput::new(".", "main", "release");
//! let output = Output::new(OutputMode::Human);
//! let outcome = workflow::run(&input, &GitCli::new(), &TerminalPrompt::new(), &output);
//! println!("{}: {}", outcome.status, outcome.message);
//! ```

pub mod config;
pub mod conflict;
pub mod messages;
pub mod output;
pub mod prompt;
pub mod runner;
pub mod ui;
pub mod workflow;

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
