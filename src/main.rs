//! CLI entry point for branch-sync.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;

use branch_sync::output::Output;

use cli::{Cli, Commands};
use cmd::sync::SyncArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cmd::output_mode(cli.quiet, cli.json));

    match cli.command {
        Commands::Sync {
            source,
            target,
            dir,
            suffix,
            delete_existing,
        } => {
            let status = cmd::sync::cmd_sync(
                SyncArgs {
                    source,
                    target,
                    dir,
                    suffix,
                    delete_existing,
                },
                &output,
            )?;
            std::process::exit(status.exit_code());
        }
        Commands::Config {
            init,
            validate,
            path,
            dir,
        } => {
            let code = cmd::config::cmd_config(dir.as_deref(), init, validate, path)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
        Commands::Man { out_dir } => cmd::util::cmd_man(out_dir.as_ref()),
        Commands::Version { verbose } => cmd::util::cmd_version(verbose, &output),
    }
}
