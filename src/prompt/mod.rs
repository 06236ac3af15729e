//! Operator prompts.
//!
//! Both prompt kinds may come back empty: `None` means the operator cancelled
//! (Esc, Ctrl+D, blank answer, or no terminal attached).

use anyhow::Result;

pub mod scripted;
pub mod terminal;

pub use scripted::{Answer, ScriptedPrompt};
pub use terminal::TerminalPrompt;

/// Source of operator decisions during a run.
pub trait UserPrompt {
    /// Ask for free text, pre-filled with `initial`.
    fn input(&self, prompt: &str, initial: &str) -> Result<Option<String>>;

    /// Ask the operator to pick one of `options`; returns the chosen index.
    fn choose(&self, prompt: &str, options: &[&str]) -> Result<Option<usize>>;
}
