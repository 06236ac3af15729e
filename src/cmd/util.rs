//! `version`, `man` and `completion`.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use branch_sync::output::{Output, OutputMode};
use branch_sync::runner::GitCli;

use crate::cli::Cli;

/// What `version -v` reports. The git line comes from the same executable
/// `sync` will drive, so a missing or unexpected git shows up here first.
#[derive(Debug)]
pub struct VersionReport {
    pub version: &'static str,
    pub commit: &'static str,
    pub built: &'static str,
    pub git: Result<String>,
}

impl VersionReport {
    pub fn collect(git: &GitCli) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: env!("GIT_SHA"),
            built: env!("BUILD_DATE"),
            git: git.version(),
        }
    }

    fn git_line(&self) -> String {
        match &self.git {
            Ok(line) => line.clone(),
            Err(e) => format!("unavailable ({:#})", e),
        }
    }

    pub fn render(&self, verbose: bool) -> Vec<String> {
        let mut lines = vec![format!("branch-sync {}", self.version)];
        if verbose {
            lines.push(format!("commit: {}", self.commit));
            lines.push(format!("built: {}", self.built));
            lines.push(format!("git: {}", self.git_line()));
        }
        lines
    }
}

pub fn cmd_version(verbose: bool, output: &Output) -> Result<()> {
    let report = VersionReport::collect(&GitCli::new());

    if output.mode() == OutputMode::Json {
        output.event(&json!({
            "level": "version",
            "version": report.version,
            "commit": report.commit,
            "built": report.built,
            "git": report.git_line(),
        }));
        return Ok(());
    }

    for line in report.render(verbose) {
        println!("{}", line);
    }
    Ok(())
}

/// Write `branch-sync.1` plus one page per subcommand (`branch-sync-sync.1`, ...).
pub fn cmd_man(out_dir: Option<&PathBuf>) -> Result<()> {
    let dir = out_dir.map(PathBuf::as_path).unwrap_or(Path::new("."));
    for path in write_man_pages(dir)? {
        println!("Man page written to: {}", path.display());
    }
    Ok(())
}

fn write_man_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut pages = vec![(name.clone(), cmd.clone())];
    for sub in cmd.get_subcommands() {
        pages.push((format!("{}-{}", name, sub.get_name()), sub.clone()));
    }

    let mut written = Vec::new();
    for (page, command) in pages {
        let mut buffer = Vec::new();
        clap_mangen::Man::new(command)
            .title(page.to_uppercase())
            .render(&mut buffer)?;
        let path = dir.join(format!("{}.1", page));
        fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

pub fn cmd_completion(shell: Shell) -> Result<()> {
    write_completion(shell, &mut std::io::stdout())
}

fn write_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
    Ok(())
}
