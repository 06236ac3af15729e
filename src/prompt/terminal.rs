use anyhow::Result;
use dialoguer::{Input, Select};

use super::UserPrompt;

/// Interactive prompts on the controlling terminal.
///
/// When stdin is not a TTY every prompt is treated as cancelled, so scripted
/// invocations stop cleanly instead of hanging.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    fn interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }
}

impl UserPrompt for TerminalPrompt {
    fn input(&self, prompt: &str, initial: &str) -> Result<Option<String>> {
        if !Self::interactive() {
            return Ok(None);
        }

        let value: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;

        let value = value.trim().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    fn choose(&self, prompt: &str, options: &[&str]) -> Result<Option<usize>> {
        if !Self::interactive() {
            return Ok(None);
        }

        let selection = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact_opt()?;

        Ok(selection)
    }
}
