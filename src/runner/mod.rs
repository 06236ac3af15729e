//! Git command execution.
//!
//! The workflow never spawns processes itself; it talks to a [`CommandRunner`].
//! [`GitCli`] is the real implementation and [`InMemoryRunner`] is a scripted
//! stand-in used by tests.

pub mod command_runner;
pub mod git_cli;
pub mod in_memory;

pub use command_runner::{CommandRunner, GitCommandError};
pub use git_cli::GitCli;
pub use in_memory::InMemoryRunner;
