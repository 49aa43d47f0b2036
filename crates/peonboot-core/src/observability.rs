//! Observability: tracing init.
//!
//! Uses `config::ObservabilityConfig` for PEONBOOT_QUIET, LOG_LEVEL, LOG_JSON.
//! Logs always go to stderr: stdout belongs to the delegate script.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

const QUIET_DIRECTIVE: &str = "peonboot=warn";

/// Filter used when `RUST_LOG` is unset. Quiet mode drops info chatter.
fn default_directive(cfg: &ObservabilityConfig) -> &str {
    if cfg.quiet {
        QUIET_DIRECTIVE
    } else {
        &cfg.log_level
    }
}

/// Initialize tracing. Call once at process startup.
/// When PEONBOOT_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(cfg)));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .without_time()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ObservabilityConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ObservabilityConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_quiet_suppresses_info() {
        let cfg = config(&[("PEONBOOT_QUIET", "1"), ("PEONBOOT_LOG_LEVEL", "peonboot=debug")]);
        assert_eq!(default_directive(&cfg), "peonboot=warn");
    }

    #[test]
    fn test_log_level_used_when_not_quiet() {
        assert_eq!(default_directive(&config(&[])), "peonboot=info");
        let cfg = config(&[("PEONBOOT_LOG_LEVEL", "peonboot=debug")]);
        assert_eq!(default_directive(&cfg), "peonboot=debug");
    }
}
