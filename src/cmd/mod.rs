//! Command module structure for the branch-sync CLI

use anyhow::{Context, Result};
use std::path::PathBuf;

use branch_sync::output::OutputMode;

pub mod config;
pub mod sync;
pub mod util;

/// Resolve the repository working directory from `-C`, expanding `~`.
///
/// Fails before any git command runs when the directory does not exist.
pub fn resolve_workdir(dir: Option<&str>) -> Result<PathBuf> {
    let path = match dir {
        Some(dir) => PathBuf::from(shellexpand::tilde(dir).to_string()),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    if !path.is_dir() {
        anyhow::bail!(
            "No workspace folder is open: {} is not a directory",
            path.display()
        );
    }

    Ok(path)
}

/// Pick the output mode from global flags and `BRANCH_SYNC_QUIET`.
pub fn output_mode(quiet: bool, json: bool) -> OutputMode {
    if json {
        OutputMode::Json
    } else if quiet || branch_sync::ui::is_quiet() {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    }
}
