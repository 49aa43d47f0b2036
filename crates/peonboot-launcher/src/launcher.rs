//! The bootstrap launcher: interpreter → delegate → run.
//!
//! `run` is the whole flow. The interpreter is resolved first so a machine
//! without Python fails before any network or child-process work happens.
//! Interrupt handling is armed only once the delegate is downloaded: until
//! then nothing is on disk and Ctrl+C may terminate the process outright.

use std::ffi::OsString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use peonboot_core::config::LauncherConfig;

use crate::delegate::{self, LaunchMode, Locations, Pending};
use crate::error::LaunchError;
use crate::fetch::{self, ScriptFetcher};
use crate::runner::{self, WaitOptions};
use crate::runtime_resolver::{InterpreterResolver, PathSearch};

pub struct Launcher {
    mode: LaunchMode,
    locations: Locations,
    config: LauncherConfig,
    resolver: Box<dyn InterpreterResolver>,
    fetcher: Box<dyn ScriptFetcher>,
    cancel: Arc<AtomicBool>,
    arm_interrupts: Option<Box<dyn Fn(Arc<AtomicBool>)>>,
}

impl Launcher {
    pub fn new(
        mode: LaunchMode,
        locations: Locations,
        config: LauncherConfig,
        resolver: Box<dyn InterpreterResolver>,
        fetcher: Box<dyn ScriptFetcher>,
    ) -> Self {
        Self {
            mode,
            locations,
            config,
            resolver,
            fetcher,
            cancel: Arc::new(AtomicBool::new(false)),
            arm_interrupts: None,
        }
    }

    /// Launcher wired to the process environment: PATH search, real HTTP,
    /// locations from the invocation path and `CLAUDE_PEON_DIR`.
    pub fn from_env(mode: LaunchMode) -> Self {
        let config = LauncherConfig::from_env();
        let fetcher = fetch::default_fetcher(config.fetch_timeout);
        Self::new(
            mode,
            Locations::from_env(),
            config,
            Box::new(PathSearch::default()),
            fetcher,
        )
    }

    /// Share a cancellation flag, typically one raised by a Ctrl+C handler.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Called with the cancel flag right before anything is written to disk
    /// or spawned. Typically installs a Ctrl+C handler that raises the flag.
    pub fn with_interrupt_arming(mut self, arm: impl Fn(Arc<AtomicBool>) + 'static) -> Self {
        self.arm_interrupts = Some(Box::new(arm));
        self
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    /// Run the delegate with `args` and return its exit code.
    ///
    /// A downloaded delegate is removed before this returns, whatever the outcome.
    pub fn run(&self, args: &[OsString]) -> Result<i32, LaunchError> {
        let interpreter = self
            .resolver
            .resolve()
            .ok_or_else(|| LaunchError::NoInterpreter {
                candidates: self.resolver.candidates(),
            })?;

        let source = delegate::resolve_source(self.mode, &self.locations, &self.config)?;
        let pending = Pending::fetch(source, self.mode, self.fetcher.as_ref())
            .map_err(|e| self.interrupted_or(e))?;

        if let Some(arm) = &self.arm_interrupts {
            arm(self.cancel.clone());
        }
        if self.is_cancelled() {
            return Err(LaunchError::Interrupted);
        }
        let delegate = pending
            .stage(self.config.staging_dir.as_deref())
            .map_err(|e| self.interrupted_or(e))?;

        tracing::info!(
            mode = ?self.mode,
            interpreter = %interpreter.path.display(),
            delegate = %delegate.path().display(),
            "Launching delegate"
        );
        let opts = WaitOptions {
            timeout: self.config.child_timeout,
            cancel: self.cancel.clone(),
        };
        let code = runner::run_delegate(&interpreter.path, delegate.path(), args, &opts)
            .map_err(|e| self.interrupted_or(e))?;
        drop(delegate);
        Ok(code)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// A failure after the user asked to stop is reported as the interrupt.
    fn interrupted_or(&self, err: LaunchError) -> LaunchError {
        if self.is_cancelled() {
            LaunchError::Interrupted
        } else {
            err
        }
    }
}
