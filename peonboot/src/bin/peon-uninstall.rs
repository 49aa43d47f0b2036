//! `peon-uninstall [ARGS]...`: run the installed peon-ping uninstaller.

use std::ffi::OsString;

use peonboot_launcher::LaunchMode;

fn main() {
    peonboot_core::observability::init_tracing();
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let code = peonboot::commands::launch::launch(LaunchMode::Uninstall, args);
    std::process::exit(code);
}
