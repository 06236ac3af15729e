//! Process-backed [`CommandRunner`] that shells out to the `git` binary.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};

use super::command_runner::{CommandRunner, GitCommandError};

/// Runs the system `git` with captured output.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different git executable (e.g. an absolute path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The `git --version` line of the executable this runner calls, e.g.
    /// `git version 2.43.0`.
    pub fn version(&self) -> Result<String> {
        let dir = std::env::temp_dir();
        let output = self.spawn(&dir, &["--version"])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GitCommandError::new(&["--version"], "", stderr).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn spawn(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            // Never block on an editor for the merge commit message
            .env("GIT_MERGE_AUTOEDIT", "no")
            .output()
            .with_context(|| format!("Failed to run {} {}", self.program, args.join(" ")))
    }
}

impl CommandRunner for GitCli {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let output = self.spawn(dir, args)?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let mut err = GitCommandError::new(args, stdout, stderr);
            err.code = output.status.code();
            return Err(err.into());
        }

        Ok(stdout)
    }

    fn branch_exists(&self, dir: &Path, name: &str) -> Result<bool> {
        let output = self.spawn(dir, &["rev-parse", "--verify", name])?;
        Ok(output.status.success())
    }
}
