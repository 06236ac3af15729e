use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::Result;

use super::UserPrompt;

/// A canned answer for [`ScriptedPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(Option<String>),
    Choice(Option<usize>),
}

/// Replays pre-recorded answers in order, recording every question asked.
///
/// Running out of answers behaves like the operator cancelling.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompt texts shown so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn input(&self, prompt: &str, _initial: &str) -> Result<Option<String>> {
        match self.next(prompt) {
            None => Ok(None),
            Some(Answer::Text(value)) => Ok(value.filter(|v| !v.trim().is_empty())),
            Some(other) => anyhow::bail!("Expected a text answer for '{}', got {:?}", prompt, other),
        }
    }

    fn choose(&self, prompt: &str, options: &[&str]) -> Result<Option<usize>> {
        match self.next(prompt) {
            None => Ok(None),
            Some(Answer::Choice(Some(index))) if index >= options.len() => {
                anyhow::bail!("Choice {} out of range for '{}'", index, prompt)
            }
            Some(Answer::Choice(choice)) => Ok(choice),
            Some(other) => anyhow::bail!("Expected a choice for '{}', got {:?}", prompt, other),
        }
    }
}
