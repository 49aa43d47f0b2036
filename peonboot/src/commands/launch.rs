//! Run a delegate script and turn the outcome into a process exit code.

use std::ffi::OsString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use peonboot_launcher::{LaunchMode, Launcher};

/// Install a Ctrl+C / SIGTERM handler that only raises `cancel`.
///
/// The delegate gets the same signal from the terminal; the launcher keeps
/// running long enough to reap it and drop its staged script.
pub fn install_interrupt_handler(cancel: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        tracing::info!("Received interrupt, stopping...");
        cancel.store(true, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")
}

/// Run the delegate for `mode` with `args`; returns the exit code to report.
///
/// Until the delegate has been downloaded the default signal disposition
/// stays in place, so Ctrl+C during a slow download ends the process at once.
pub fn launch(mode: LaunchMode, args: Vec<OsString>) -> i32 {
    let launcher = Launcher::from_env(mode).with_interrupt_arming(|cancel| {
        if let Err(e) = install_interrupt_handler(cancel) {
            tracing::warn!("{:#}", e);
        }
    });

    match launcher.run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
