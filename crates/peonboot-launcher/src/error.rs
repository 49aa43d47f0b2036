//! Launcher error taxonomy.
//!
//! Every variant is terminal for the current run: the binary prints the
//! message once to stderr and exits with [`LaunchError::exit_code`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Exit code used when the run is cancelled by Ctrl+C / SIGTERM.
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no usable interpreter found on PATH (tried: {})", .candidates.join(", "))]
    NoInterpreter { candidates: Vec<String> },

    #[error("{script} not found (looked in: {})", display_paths(.searched))]
    DelegateNotFound {
        script: String,
        searched: Vec<PathBuf>,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to stage downloaded script: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("failed to start {}: {source}", .interpreter.display())]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for delegate: {0}")]
    Wait(#[source] std::io::Error),

    #[error("delegate killed: exceeded timeout of {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("interrupted")]
    Interrupted,
}

impl LaunchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => EXIT_INTERRUPTED,
            _ => 1,
        }
    }
}

/// Errors fetching the delegate script in fallback mode.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download of {url} failed: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("cannot reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("network fallback is not available in this build; run from a peon-ping checkout")]
    Disabled,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = LaunchError::NoInterpreter {
            candidates: vec!["python3".into(), "python".into()],
        };
        assert_eq!(
            e.to_string(),
            "no usable interpreter found on PATH (tried: python3, python)"
        );

        let e = LaunchError::DelegateNotFound {
            script: "uninstall.py".into(),
            searched: vec![PathBuf::from("/a/uninstall.py"), PathBuf::from("/b/uninstall.py")],
        };
        assert!(e.to_string().starts_with("uninstall.py not found"));
        assert!(e.to_string().contains("/a/uninstall.py, /b/uninstall.py"));

        let e: LaunchError = FetchError::Status {
            url: "https://x/install.py".into(),
            status: 404,
        }
        .into();
        assert_eq!(e.to_string(), "download of https://x/install.py failed: HTTP 404");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(LaunchError::NoInterpreter { candidates: vec![] }.exit_code(), 1);
        assert_eq!(LaunchError::Fetch(FetchError::Disabled).exit_code(), 1);
        assert_eq!(LaunchError::Timeout(Duration::from_secs(3)).exit_code(), 1);
        assert_eq!(LaunchError::Interrupted.exit_code(), EXIT_INTERRUPTED);
    }
}
