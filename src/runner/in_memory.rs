use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Result;

use super::command_runner::{CommandRunner, GitCommandError};

/// Scripted implementation of CommandRunner for testing.
///
/// Every invocation is recorded as its argument string (`"checkout -b main"`).
/// Branch existence is tracked so `checkout -b` and `branch -D` are visible to
/// later `branch_exists` calls.
#[derive(Debug, Default)]
pub struct InMemoryRunner {
    status: String,
    branches: RefCell<HashSet<String>>,
    failures: HashMap<String, (String, String)>,
    commands: RefCell<Vec<String>>,
}

impl InMemoryRunner {
    /// Create a runner with a clean tree and no branches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by `status --porcelain`.
    pub fn with_status(mut self, porcelain: &str) -> Self {
        self.status = porcelain.to_string();
        self
    }

    /// Pretend `name` already exists.
    pub fn with_branch(self, name: &str) -> Self {
        self.branches.borrow_mut().insert(name.to_string());
        self
    }

    /// Make the command `args` (e.g. `"merge main"`) exit non-zero.
    pub fn with_failure(mut self, args: &str, stdout: &str, stderr: &str) -> Self {
        self.failures
            .insert(args.to_string(), (stdout.to_string(), stderr.to_string()));
        self
    }

    /// Commands issued so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.borrow().contains(name)
    }
}

impl CommandRunner for InMemoryRunner {
    fn run(&self, _dir: &Path, args: &[&str]) -> Result<String> {
        let line = args.join(" ");
        self.commands.borrow_mut().push(line.clone());

        if let Some((stdout, stderr)) = self.failures.get(&line) {
            return Err(GitCommandError::new(args, stdout.clone(), stderr.clone()).into());
        }

        match args {
            ["status", "--porcelain"] => return Ok(self.status.clone()),
            ["checkout", "-b", name] => {
                self.branches.borrow_mut().insert(name.to_string());
            }
            ["branch", "-D", name] => {
                self.branches.borrow_mut().remove(*name);
            }
            _ => {}
        }

        Ok(String::new())
    }

    fn branch_exists(&self, _dir: &Path, name: &str) -> Result<bool> {
        self.commands
            .borrow_mut()
            .push(format!("rev-parse --verify {}", name));
        Ok(self.branches.borrow().contains(name))
    }
}
