use std::ffi::OsString;

use clap::{Parser, Subcommand, ValueEnum};
use peonboot_core::completion::Shell;

/// peonboot - bootstrap for peon-ping: install, uninstall, shell completion
#[derive(Parser, Debug)]
#[command(name = "peonboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the peon-ping installer (local checkout first, then download)
    #[command(disable_help_flag = true)]
    Install {
        /// Arguments forwarded to install.py unchanged
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Run the peon-ping uninstaller from the installed location
    #[command(disable_help_flag = true)]
    Uninstall {
        /// Arguments forwarded to uninstall.py unchanged
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Print completion candidates for the `peon` command, one per line
    Complete {
        /// Token before the word being completed
        #[arg(long, value_name = "TOKEN", allow_hyphen_values = true)]
        prev: Option<String>,

        /// Partial word being completed
        #[arg(value_name = "WORD", default_value = "", allow_hyphen_values = true)]
        word: String,
    },

    /// Print a script that registers `peon` tab completion
    Completions {
        #[arg(value_enum)]
        shell: ShellArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ShellArg {
    Bash,
    #[value(alias = "pwsh")]
    Powershell,
}

impl From<ShellArg> for Shell {
    fn from(s: ShellArg) -> Self {
        match s {
            ShellArg::Bash => Shell::Bash,
            ShellArg::Powershell => Shell::PowerShell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_forwards_everything() {
        let cli = Cli::try_parse_from(["peonboot", "install", "--help", "-y", "two words"]).unwrap();
        match cli.command {
            Commands::Install { args } => {
                assert_eq!(args, vec![OsString::from("--help"), "-y".into(), "two words".into()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_uninstall_without_args() {
        let cli = Cli::try_parse_from(["peonboot", "uninstall"]).unwrap();
        assert!(matches!(cli.command, Commands::Uninstall { args } if args.is_empty()));
    }

    #[test]
    fn test_complete_accepts_flag_like_word() {
        let cli = Cli::try_parse_from(["peonboot", "complete", "--prev=peon", "--", "--p"]).unwrap();
        match cli.command {
            Commands::Complete { prev, word } => {
                assert_eq!(prev.as_deref(), Some("peon"));
                assert_eq!(word, "--p");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_complete_pack_selector_as_prev() {
        let cli = Cli::try_parse_from(["peonboot", "complete", "--prev=--pack"]).unwrap();
        match cli.command {
            Commands::Complete { prev, word } => {
                assert_eq!(prev.as_deref(), Some("--pack"));
                assert_eq!(word, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_completions_shell_alias() {
        let cli = Cli::try_parse_from(["peonboot", "completions", "pwsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: ShellArg::Powershell }
        ));
    }
}
