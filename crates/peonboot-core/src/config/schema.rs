//! Structured configuration built from the environment.

use std::path::PathBuf;
use std::time::Duration;

use super::env_keys::{launcher as launcher_keys, observability as obv_keys, paths as path_keys};
use super::loader::{lookup_bool, lookup_optional, lookup_or, lookup_u64};
use crate::paths;

/// Default HTTP read timeout for the delegate fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Launcher settings: where to fetch from and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Base URL, without trailing slash, that delegate script names are appended to
    pub repo_base: String,
    pub fetch_timeout: Duration,
    /// `None` waits for the delegate indefinitely
    pub child_timeout: Option<Duration>,
    /// Directory for the downloaded delegate; `None` uses the system temp dir
    pub staging_dir: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            repo_base: paths::DEFAULT_REPO_BASE.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            child_timeout: None,
            staging_dir: None,
        }
    }
}

impl LauncherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let repo_base = lookup_or(&lookup, launcher_keys::PEONBOOT_REPO_BASE, &[], || {
            paths::DEFAULT_REPO_BASE.to_string()
        })
        .trim_end_matches('/')
        .to_string();
        let fetch_secs = lookup_u64(
            &lookup,
            launcher_keys::PEONBOOT_FETCH_TIMEOUT_SECS,
            &[],
            DEFAULT_FETCH_TIMEOUT_SECS,
        );
        let child_secs = lookup_u64(&lookup, launcher_keys::PEONBOOT_CHILD_TIMEOUT_SECS, &[], 0);
        let staging_dir =
            lookup_optional(&lookup, launcher_keys::PEONBOOT_STAGING_DIR, &[]).map(PathBuf::from);
        Self {
            repo_base,
            fetch_timeout: Duration::from_secs(fetch_secs),
            child_timeout: (child_secs > 0).then(|| Duration::from_secs(child_secs)),
            staging_dir,
        }
    }

    /// URL of a file relative to the repo base.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.repo_base, file_name)
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Installed peon-ping directory; `None` only when no home directory can be found
    /// and no override is set.
    pub install_dir: Option<PathBuf>,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let install_dir = lookup_optional(&lookup, path_keys::CLAUDE_PEON_DIR, path_keys::PEON_DIR_ALIASES)
            .map(PathBuf::from)
            .or_else(paths::default_install_dir);
        Self { install_dir }
    }

    pub fn packs_dir(&self) -> Option<PathBuf> {
        self.install_dir.as_deref().map(paths::packs_dir)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    /// Process-wide config, read once.
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self::from_lookup(|k| std::env::var(k).ok()))
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let quiet = lookup_bool(&lookup, obv_keys::PEONBOOT_QUIET, obv_keys::QUIET_ALIASES, false);
        let log_level = lookup_or(&lookup, obv_keys::PEONBOOT_LOG_LEVEL, &[], || {
            "peonboot=info".to_string()
        });
        let log_json = lookup_bool(&lookup, obv_keys::PEONBOOT_LOG_JSON, &[], false);
        Self {
            quiet,
            log_level,
            log_json,
        }
    }
}
