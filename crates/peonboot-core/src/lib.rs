pub mod completion;
pub mod config;
pub mod observability;
pub mod paths;
