//! InterpreterResolver trait: how the launcher picks the program that runs
//! the delegate script.
//!
//! The default resolver walks a fixed, most-preferred-first list of names
//! against the executable search path and takes the first hit.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Interpreter names tried in order.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Interpreter chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterpreter {
    /// Candidate name that matched (e.g. `python3`)
    pub name: String,
    /// Absolute path of the executable
    pub path: PathBuf,
}

/// Extension point for interpreter lookup.
pub trait InterpreterResolver {
    /// Names this resolver tries, in order. Used for error reporting.
    fn candidates(&self) -> Vec<String>;

    /// Returns `None` when no candidate resolves.
    fn resolve(&self) -> Option<ResolvedInterpreter>;
}

/// Resolves candidate names against a search path (PATH by default).
#[derive(Debug, Clone)]
pub struct PathSearch {
    candidates: Vec<String>,
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new(INTERPRETER_CANDIDATES.iter().map(|s| s.to_string()).collect())
    }
}

impl PathSearch {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            search_path: std::env::var_os("PATH"),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Search `path` (same syntax as PATH) instead of the process PATH.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn with_cwd(mut self, cwd: &Path) -> Self {
        self.cwd = cwd.to_path_buf();
        self
    }
}

impl InterpreterResolver for PathSearch {
    fn candidates(&self) -> Vec<String> {
        self.candidates.clone()
    }

    fn resolve(&self) -> Option<ResolvedInterpreter> {
        let search_path = self.search_path.as_ref()?;
        self.candidates.iter().find_map(|name| {
            match which::which_in(name, Some(search_path), &self.cwd) {
                Ok(path) => {
                    tracing::debug!(interpreter = %name, path = %path.display(), "Interpreter resolved");
                    Some(ResolvedInterpreter {
                        name: name.clone(),
                        path,
                    })
                }
                Err(_) => {
                    tracing::debug!(interpreter = %name, "Interpreter not on search path");
                    None
                }
            }
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn fake_exe(dir: &Path, name: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();
        p
    }

    #[test]
    fn test_prefers_first_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        fake_exe(tmp.path(), "python3");
        fake_exe(tmp.path(), "python");
        let found = PathSearch::default()
            .with_search_path(tmp.path().as_os_str())
            .resolve()
            .unwrap();
        assert_eq!(found.name, "python3");
        assert_eq!(found.path, tmp.path().join("python3"));
    }

    #[test]
    fn test_falls_back_to_later_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        fake_exe(tmp.path(), "python");
        let found = PathSearch::default()
            .with_search_path(tmp.path().as_os_str())
            .resolve()
            .unwrap();
        assert_eq!(found.name, "python");
    }

    #[test]
    fn test_earlier_path_entry_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fake_exe(first.path(), "python3");
        fake_exe(second.path(), "python3");
        let joined = std::env::join_paths([first.path(), second.path()]).unwrap();
        let found = PathSearch::default().with_search_path(joined).resolve().unwrap();
        assert_eq!(found.path, first.path().join("python3"));
    }

    #[test]
    fn test_non_executable_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("python3"), "not a program").unwrap();
        let found = PathSearch::default()
            .with_search_path(tmp.path().as_os_str())
            .resolve();
        assert!(found.is_none());
    }

    #[test]
    fn test_none_when_nothing_resolves() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathSearch::default().with_search_path(tmp.path().as_os_str());
        assert!(resolver.resolve().is_none());
        assert_eq!(resolver.candidates(), vec!["python3", "python"]);
    }
}
