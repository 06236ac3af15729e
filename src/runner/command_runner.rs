use anyhow::Result;
use std::fmt;
use std::path::Path;

/// Executes git commands inside a working directory.
pub trait CommandRunner {
    /// Run `git <args>` in `dir` and return captured stdout.
    ///
    /// # Errors
    ///
    /// A non-zero exit is reported as a [`GitCommandError`] wrapped in
    /// `anyhow::Error`. Failing to spawn git at all is a plain error.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String>;

    /// Whether `name` resolves to a commit (`git rev-parse --verify <name>`).
    ///
    /// A failed verification is `Ok(false)`, not an error.
    fn branch_exists(&self, dir: &Path, name: &str) -> Result<bool>;
}

/// A git invocation that exited with a non-zero status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommandError {
    pub args: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

impl GitCommandError {
    pub fn new(args: &[&str], stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            args: args.iter().map(|a| a.to_string()).collect(),
            stdout: stdout.into(),
            stderr: stderr.into(),
            code: Some(1),
        }
    }

    /// The command line as typed, e.g. `git checkout main`.
    pub fn command_line(&self) -> String {
        format!("git {}", self.args.join(" "))
    }
}

impl fmt::Display for GitCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.command_line(), self.stderr.trim())
    }
}

impl std::error::Error for GitCommandError {}
