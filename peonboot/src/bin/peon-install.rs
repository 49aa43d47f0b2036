//! `peon-install [ARGS]...`: run the peon-ping installer with ARGS untouched.
//!
//! Uses `install.py` next to this binary when present, otherwise downloads it.

use std::ffi::OsString;

use peonboot_launcher::LaunchMode;

fn main() {
    peonboot_core::observability::init_tracing();
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let code = peonboot::commands::launch::launch(LaunchMode::Install, args);
    std::process::exit(code);
}
