//! CLI argument definitions for branch-sync.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "branch-sync")]
#[command(version)]
#[command(about = "Sync a target branch with a source branch through a disposable merge branch", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    branch-sync sync main release      Merge main into release-sync, ready for a pull request\n    branch-sync config --init          Write a project config to .branch-sync/config.md"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit one JSON object per line instead of human-readable output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge SOURCE into a fresh <TARGET><suffix> branch
    ///
    /// Stashes local changes (after asking), pulls SOURCE and TARGET from
    /// origin, (re)creates the sync branch from TARGET and merges SOURCE into
    /// it. Nothing is pushed. Missing branch names are prompted for.
    Sync {
        /// Branch whose changes should be propagated
        source: Option<String>,
        /// Branch that should receive them
        target: Option<String>,
        /// Repository working directory (default: current directory)
        #[arg(short = 'C', long = "dir", value_name = "DIR")]
        dir: Option<String>,
        /// Suffix for the sync branch name (overrides config)
        #[arg(long, allow_hyphen_values = true)]
        suffix: Option<String>,
        /// Delete an existing sync branch without asking
        #[arg(long)]
        delete_existing: bool,
    },
    /// Show or edit synchronization settings
    Config {
        /// Write a template to .branch-sync/config.md
        #[arg(long)]
        init: bool,
        /// Validate the global and project config files
        #[arg(long, conflicts_with = "init")]
        validate: bool,
        /// Only print where config files are looked up
        #[arg(long, conflicts_with_all = ["init", "validate"])]
        path: bool,
        /// Repository working directory (default: current directory)
        #[arg(short = 'C', long = "dir", value_name = "DIR")]
        dir: Option<String>,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate man page
    Man {
        /// Output directory (default: current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Show version information
    Version {
        /// Show additional build information
        #[arg(long, short)]
        verbose: bool,
    },
}
