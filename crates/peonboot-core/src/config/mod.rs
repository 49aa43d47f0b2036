//! peonboot configuration layer
//!
//! All environment reads go through this module; callers use the structured
//! configs below instead of `std::env::var`.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool`, `env_u64` and their lookup-based forms
//! - `schema`: `LauncherConfig`, `PathsConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants, including accepted aliases

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, env_u64};
pub use schema::{LauncherConfig, ObservabilityConfig, PathsConfig};
