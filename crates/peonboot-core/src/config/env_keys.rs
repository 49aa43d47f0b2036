//! Environment variable keys and their aliases.
//!
//! Primary variables use the `PEONBOOT_*` prefix. `CLAUDE_PEON_DIR` is shared
//! with the peon-ping hook script so both agree on the installed location.

/// Installed location of peon-ping
pub mod paths {
    pub const CLAUDE_PEON_DIR: &str = "CLAUDE_PEON_DIR";
    pub const PEON_DIR_ALIASES: &[&str] = &["PEONBOOT_INSTALL_DIR"];
}

/// Launcher behavior
pub mod launcher {
    /// Base URL the delegate script is fetched from in fallback mode.
    pub const PEONBOOT_REPO_BASE: &str = "PEONBOOT_REPO_BASE";

    /// HTTP read timeout for the fetch, in seconds.
    pub const PEONBOOT_FETCH_TIMEOUT_SECS: &str = "PEONBOOT_FETCH_TIMEOUT_SECS";

    /// Child wait timeout in seconds. Unset or `0` waits forever.
    pub const PEONBOOT_CHILD_TIMEOUT_SECS: &str = "PEONBOOT_CHILD_TIMEOUT_SECS";

    /// Where the downloaded delegate is staged. Defaults to the system temp dir.
    pub const PEONBOOT_STAGING_DIR: &str = "PEONBOOT_STAGING_DIR";
}

/// Observability and logging
pub mod observability {
    pub const PEONBOOT_QUIET: &str = "PEONBOOT_QUIET";
    pub const QUIET_ALIASES: &[&str] = &["PEON_QUIET"];

    pub const PEONBOOT_LOG_LEVEL: &str = "PEONBOOT_LOG_LEVEL";

    pub const PEONBOOT_LOG_JSON: &str = "PEONBOOT_LOG_JSON";
}
