//! Tab completion for the `peon` command.
//!
//! Candidates are either the static option names or, right after `--pack`,
//! the installed sound packs: subdirectories of `<install_dir>/packs` that
//! contain a `manifest.json`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::paths::PACK_MANIFEST;

/// The flag whose value is a pack name.
pub const PACK_SELECTOR: &str = "--pack";

/// Options understood by `peon`, in help order.
pub const OPTIONS: &[&str] = &[
    "--pause", "--resume", "--toggle", "--status", "--packs", "--pack", "--help",
];

/// Completion candidates for the token being typed.
///
/// `prev` is the token before the cursor word, `word` the partial word itself.
/// Pack names are returned unfiltered; shells do their own prefix matching there.
pub fn complete(prev: Option<&str>, word: &str, packs_dir: Option<&Path>) -> Vec<String> {
    if prev == Some(PACK_SELECTOR) {
        return packs_dir.map(discover_packs).unwrap_or_default();
    }
    OPTIONS
        .iter()
        .filter(|opt| opt.starts_with(word))
        .map(|opt| opt.to_string())
        .collect()
}

/// Names of pack directories under `packs_dir`, sorted. Missing dir → empty.
pub fn discover_packs(packs_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(packs_dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| {
            let p = e.path();
            p.is_dir() && p.join(PACK_MANIFEST).is_file()
        })
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .collect();
    names.sort();
    names
}

/// Shells a registration script can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    PowerShell,
}

#[derive(Debug, Error)]
#[error("unsupported shell '{0}' (expected bash or powershell)")]
pub struct UnknownShell(pub String);

impl FromStr for Shell {
    type Err = UnknownShell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bash" => Ok(Self::Bash),
            "powershell" | "pwsh" => Ok(Self::PowerShell),
            _ => Err(UnknownShell(s.to_string())),
        }
    }
}

const BASH_TEMPLATE: &str = r#"# peon-ping tab completion
_peon_completion() {
    local cur prev
    cur="${COMP_WORDS[COMP_CWORD]}"
    prev=""
    if [ "$COMP_CWORD" -gt 0 ]; then
        prev="${COMP_WORDS[COMP_CWORD-1]}"
    fi
    COMPREPLY=( $(compgen -W "$(__PROGRAM__ complete --prev="$prev" -- "$cur")" -- "$cur") )
}
complete -F _peon_completion peon
"#;

const POWERSHELL_TEMPLATE: &str = r#"# peon-ping tab completion
Register-ArgumentCompleter -Native -CommandName peon -ScriptBlock {
    param($wordToComplete, $commandAst, $cursorPosition)
    $tokens = @($commandAst.CommandElements | ForEach-Object { $_.ToString() })
    if ($wordToComplete) { $prev = $tokens[-2] } else { $prev = $tokens[-1] }
    & __PROGRAM__ complete "--prev=$prev" -- "$wordToComplete" | ForEach-Object {
        [System.Management.Automation.CompletionResult]::new($_, $_, 'ParameterValue', $_)
    }
}
"#;

/// Script that registers completion for `peon`, calling back into `program complete`.
pub fn registration_script(shell: Shell, program: &str) -> String {
    let template = match shell {
        Shell::Bash => BASH_TEMPLATE,
        Shell::PowerShell => POWERSHELL_TEMPLATE,
    };
    template.replace("__PROGRAM__", program)
}
