//! Command implementations shared by `peonboot` and the pass-through binaries.

pub mod complete;
pub mod launch;
