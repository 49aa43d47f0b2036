//! Where the delegate script comes from.
//!
//! Resolution is a single decision, `resolve_source`, returning either a local
//! file or a URL. `Pending::fetch` downloads a remote source into memory and
//! `Pending::stage` puts it on disk; a downloaded delegate owns its temp file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use peonboot_core::config::{LauncherConfig, PathsConfig};
use peonboot_core::paths::{INSTALL_SCRIPT, UNINSTALL_SCRIPT};
use tempfile::NamedTempFile;

use crate::error::LaunchError;
use crate::fetch::{self, ScriptFetcher};

/// Which delegate the launcher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Checkout first, then download.
    Install,
    /// Installed location first, then checkout. Never downloads.
    Uninstall,
}

impl LaunchMode {
    pub fn script_name(self) -> &'static str {
        match self {
            Self::Install => INSTALL_SCRIPT,
            Self::Uninstall => UNINSTALL_SCRIPT,
        }
    }
}

/// Directories consulted during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locations {
    /// Directory holding the launcher executable.
    pub launcher_dir: Option<PathBuf>,
    /// Installed peon-ping directory.
    pub install_dir: Option<PathBuf>,
}

impl Locations {
    pub fn from_env() -> Self {
        let invoked_as = std::env::args_os().next();
        let current_exe = std::env::current_exe().ok();
        Self {
            launcher_dir: launcher_dir(invoked_as.as_deref(), current_exe.as_deref()),
            install_dir: PathsConfig::from_env().install_dir,
        }
    }
}

/// Directory the launcher was started from.
///
/// Prefers the path it was invoked by, so a launcher symlinked into a
/// checkout finds the scripts next to the link. A bare program name (found
/// through PATH) falls back to the resolved executable.
pub fn launcher_dir(invoked_as: Option<&OsStr>, current_exe: Option<&Path>) -> Option<PathBuf> {
    let invoked = invoked_as
        .map(Path::new)
        .filter(|p| p.parent().is_some_and(|d| !d.as_os_str().is_empty()) && p.is_file());
    invoked
        .or(current_exe)
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

/// Where the delegate lives before it is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateSource {
    Local(PathBuf),
    Remote(String),
}

/// Decide where the delegate for `mode` comes from.
pub fn resolve_source(
    mode: LaunchMode,
    locations: &Locations,
    config: &LauncherConfig,
) -> Result<DelegateSource, LaunchError> {
    let script = mode.script_name();
    let search_order: Vec<&Path> = match mode {
        LaunchMode::Install => locations.launcher_dir.as_deref().into_iter().collect(),
        LaunchMode::Uninstall => locations
            .install_dir
            .as_deref()
            .into_iter()
            .chain(locations.launcher_dir.as_deref())
            .collect(),
    };

    let candidates: Vec<PathBuf> = search_order.iter().map(|dir| dir.join(script)).collect();
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        tracing::debug!(path = %found.display(), "Using local delegate");
        return Ok(DelegateSource::Local(found.clone()));
    }

    match mode {
        LaunchMode::Install => Ok(DelegateSource::Remote(config.url_for(script))),
        LaunchMode::Uninstall => Err(LaunchError::DelegateNotFound {
            script: script.to_string(),
            searched: candidates,
        }),
    }
}

/// A delegate whose contents are known but not yet on disk.
#[derive(Debug)]
pub enum Pending {
    Local(PathBuf),
    Fetched {
        body: Vec<u8>,
        script: &'static str,
    },
}

impl Pending {
    /// Download `source` if it is remote. Writes nothing to disk.
    pub fn fetch(
        source: DelegateSource,
        mode: LaunchMode,
        fetcher: &dyn ScriptFetcher,
    ) -> Result<Self, LaunchError> {
        match source {
            DelegateSource::Local(path) => Ok(Self::Local(path)),
            DelegateSource::Remote(url) => {
                let script = mode.script_name();
                let body = fetch::download(fetcher, &url, script)?;
                Ok(Self::Fetched { body, script })
            }
        }
    }

    /// Make the delegate runnable, staging a fetched body in a temp file.
    pub fn stage(self, staging_dir: Option<&Path>) -> Result<Delegate, LaunchError> {
        match self {
            Self::Local(path) => Ok(Delegate::Local(path)),
            Self::Fetched { body, script } => {
                let file = fetch::write_temp(&body, script, staging_dir)?;
                Ok(Delegate::Downloaded(file))
            }
        }
    }
}

/// A delegate ready to run.
#[derive(Debug)]
pub enum Delegate {
    Local(PathBuf),
    /// Deleted from disk when dropped.
    Downloaded(NamedTempFile),
}

impl Delegate {
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(path) => path,
            Self::Downloaded(file) => file.path(),
        }
    }
}
