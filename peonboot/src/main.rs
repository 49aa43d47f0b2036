mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use peonboot::commands::{complete, launch};
use peonboot_core::observability;
use peonboot_launcher::LaunchMode;

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Install { args } => {
            std::process::exit(launch::launch(LaunchMode::Install, args));
        }
        Commands::Uninstall { args } => {
            std::process::exit(launch::launch(LaunchMode::Uninstall, args));
        }
        Commands::Complete { prev, word } => {
            complete::cmd_complete(prev.as_deref(), &word)?;
        }
        Commands::Completions { shell } => {
            complete::cmd_completions(shell.into(), "peonboot")?;
        }
    }

    Ok(())
}
