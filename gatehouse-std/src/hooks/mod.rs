//! Standard lifecycle hooks.

pub mod logging;

pub use logging::LoggingHook;
