pub mod delegate;
pub mod error;
pub mod fetch;
pub mod launcher;
pub mod runner;
pub mod runtime_resolver;

pub use delegate::{Delegate, DelegateSource, LaunchMode, Locations, Pending};
pub use error::{FetchError, LaunchError};
pub use launcher::Launcher;
