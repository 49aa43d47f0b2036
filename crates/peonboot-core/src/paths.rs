//! Well-known locations and names shared by the launcher and the completion provider.

use std::path::{Path, PathBuf};

/// Raw-file base of the peon-ping repository, tracking the `main` branch.
pub const DEFAULT_REPO_BASE: &str = "https://raw.githubusercontent.com/tonyyont/peon-ping/main";

pub const INSTALL_SCRIPT: &str = "install.py";
pub const UNINSTALL_SCRIPT: &str = "uninstall.py";

/// Marks a directory under `packs/` as a sound pack.
pub const PACK_MANIFEST: &str = "manifest.json";

/// `~/.claude/hooks/peon-ping`, or `None` without a home directory.
pub fn default_install_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".claude").join("hooks").join("peon-ping"))
}

pub fn packs_dir(install_dir: &Path) -> PathBuf {
    install_dir.join("packs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_install_dir_shape() {
        if let Some(dir) = default_install_dir() {
            assert!(dir.ends_with(Path::new(".claude").join("hooks").join("peon-ping")));
        }
    }
}
