//! Run the delegate under the resolved interpreter.
//!
//! The child inherits stdin/stdout/stderr; the launcher only waits on it.
//! Waiting polls `try_wait` so a timeout or a cancellation request can be
//! acted on without a second thread.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::LaunchError;

/// Poll interval while waiting on the child.
pub const WAIT_POLL_INTERVAL_MS: u64 = 100;

/// How long an interrupted child gets to exit on its own before it is killed.
pub const CANCEL_GRACE_MS: u64 = 2000;

/// Wait policy for the child process.
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Kill the child once it has run this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Raised by the signal handler. Shared with the launcher.
    pub cancel: Arc<AtomicBool>,
}

/// Spawn `interpreter script args...` and return the child's exit code.
pub fn run_delegate(
    interpreter: &Path,
    script: &Path,
    args: &[OsString],
    opts: &WaitOptions,
) -> Result<i32, LaunchError> {
    tracing::debug!(
        interpreter = %interpreter.display(),
        script = %script.display(),
        argc = args.len(),
        "Spawning delegate"
    );
    let mut child = Command::new(interpreter)
        .arg(script)
        .args(args)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            interpreter: interpreter.to_path_buf(),
            source,
        })?;

    let status = wait_for_child(&mut child, opts)?;
    let code = exit_code_from_status(status);
    tracing::debug!(code, "Delegate exited");
    Ok(code)
}

/// Wait for `child`, honoring the timeout and the cancel flag.
///
/// On cancel the child has usually received the same signal from the
/// terminal; it gets [`CANCEL_GRACE_MS`] to exit before being killed.
/// Either way the result is `Interrupted`.
pub fn wait_for_child(child: &mut Child, opts: &WaitOptions) -> Result<ExitStatus, LaunchError> {
    let start = Instant::now();
    let poll = Duration::from_millis(WAIT_POLL_INTERVAL_MS);
    let mut cancelled_at: Option<Instant> = None;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if cancelled_at.is_some() {
                    return Err(LaunchError::Interrupted);
                }
                return Ok(status);
            }
            Ok(None) => {}
            Err(e) => return Err(LaunchError::Wait(e)),
        }

        if opts.cancel.load(Ordering::SeqCst) {
            let since = *cancelled_at.get_or_insert_with(Instant::now);
            if since.elapsed() >= Duration::from_millis(CANCEL_GRACE_MS) {
                tracing::warn!("Delegate still running after interrupt, killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Err(LaunchError::Interrupted);
            }
        }

        if let Some(timeout) = opts.timeout {
            if start.elapsed() > timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(LaunchError::Timeout(timeout));
            }
        }

        thread::sleep(poll);
    }
}

/// Exit code the launcher reports for a finished child.
///
/// Signal deaths map to `128 + signal` on Unix, as shells report them.
pub fn exit_code_from_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    fn sh() -> &'static Path {
        Path::new("/bin/sh")
    }

    fn script(dir: &Path, body: &str) -> std::path::PathBuf {
        let p = dir.join("delegate.sh");
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn test_exit_code_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let s = script(tmp.path(), "exit 7\n");
        let code = run_delegate(sh(), &s, &[], &WaitOptions::default()).unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    fn test_args_reach_script_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("args.txt");
        let s = script(
            tmp.path(),
            &format!("for a in \"$@\"; do printf '%s\\n' \"$a\" >> '{}'; done\n", out.display()),
        );
        let args: Vec<OsString> = ["--pack", "two words", "", "-x"]
            .into_iter()
            .map(OsString::from)
            .collect();
        let code = run_delegate(sh(), &s, &args, &WaitOptions::default()).unwrap();
        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "--pack\ntwo words\n\n-x\n");
    }

    #[test]
    fn test_signal_death_maps_to_128_plus_signal() {
        let tmp = tempfile::tempdir().unwrap();
        let s = script(tmp.path(), "kill -TERM $$\n");
        let code = run_delegate(sh(), &s, &[], &WaitOptions::default()).unwrap();
        assert_eq!(code, 128 + 15);
    }

    #[test]
    fn test_timeout_kills_child() {
        let tmp = tempfile::tempdir().unwrap();
        let s = script(tmp.path(), "sleep 30\n");
        let opts = WaitOptions {
            timeout: Some(Duration::from_millis(300)),
            ..Default::default()
        };
        let started = Instant::now();
        let err = run_delegate(sh(), &s, &[], &opts).unwrap_err();
        assert!(matches!(err, LaunchError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_cancel_yields_interrupted() {
        let tmp = tempfile::tempdir().unwrap();
        let s = script(tmp.path(), "sleep 30\n");
        let opts = WaitOptions::default();
        opts.cancel.store(true, Ordering::SeqCst);
        let err = run_delegate(sh(), &s, &[], &opts).unwrap_err();
        assert!(matches!(err, LaunchError::Interrupted));
    }

    #[test]
    fn test_missing_interpreter_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let s = script(tmp.path(), "exit 0\n");
        let err = run_delegate(&tmp.path().join("no-such-python"), &s, &[], &WaitOptions::default())
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
