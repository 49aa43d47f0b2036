//! `peonboot complete` / `peonboot completions`.

use std::io::{self, Write};

use anyhow::Result;
use peonboot_core::completion::{self, Shell};
use peonboot_core::config::PathsConfig;

/// Print completion candidates, one per line.
pub fn cmd_complete(prev: Option<&str>, word: &str) -> Result<()> {
    let packs_dir = PathsConfig::from_env().packs_dir();
    let candidates = completion::complete(prev, word, packs_dir.as_deref());
    let mut out = io::stdout().lock();
    for c in candidates {
        writeln!(out, "{}", c)?;
    }
    Ok(())
}

/// Print the registration script for `shell`.
pub fn cmd_completions(shell: Shell, program: &str) -> Result<()> {
    print!("{}", completion::registration_script(shell, program));
    Ok(())
}
