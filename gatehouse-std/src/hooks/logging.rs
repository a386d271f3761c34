//! Logging Hook - Observability for dispatch passes.

use gatehouse_core::{BoxError, Context, Hook, Locator};
use std::fmt::Debug;

/// A lifecycle hook that logs the locator of each pass.
///
/// # Example
///
/// ```rust,ignore
/// use gatehouse::{Dispatcher, hooks::LoggingHook};
///
/// let mut dispatcher = Dispatcher::new(locator, context, registry);
/// dispatcher.register_start(LoggingHook::named("request"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` with a default name.
    pub fn new() -> Self {
        Self { name: "dispatch" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name is used in log messages to identify the hook.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, C> Hook<L, C> for LoggingHook
where
    L: Locator + Debug,
    C: Context,
{
    async fn on_dispatch(&self, locator: &L, _context: &C) -> Result<(), BoxError> {
        tracing::debug!(name = %self.name, ?locator, "dispatch pass reached hook");
        Ok(())
    }
}
