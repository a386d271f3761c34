//! Testing utilities for Gatehouse.
//!
//! This module provides utilities to make testing dispatch order easier.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of invocations
//! - [`StaticLocator`]: A locator with fixed controller locations
//! - [`RecordingHook`]: A hook that writes its label to a [`CallLog`]
//! - [`ScriptedController`]: A controller with a fixed outcome that writes to a [`CallLog`]

use gatehouse_core::{
    BoxError, Context, Controller, Hook, Location, Locator, NoControllerFound, Outcome,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered log of invocations.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// dispatcher.register_start(RecordingHook::new("start", log.clone()));
/// dispatcher.run().await?;
/// assert_eq!(log.entries(), ["start:home", "home"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// Get a copy of the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Get the number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

// ============================================================================
// Static Locator
// ============================================================================

/// A locator with fixed access-controller and main-controller locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocator {
    name: String,
    access: Vec<Location>,
    main: Option<Location>,
}

impl StaticLocator {
    /// Create a locator without any controller.
    ///
    /// Asking it for its main controller fails until [`serving`](Self::serving)
    /// is called.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: Vec::new(),
            main: None,
        }
    }

    /// Append an access controller.
    pub fn guarded_by(mut self, location: impl Into<Location>) -> Self {
        self.access.push(location.into());
        self
    }

    /// Set the main controller.
    pub fn serving(mut self, location: impl Into<Location>) -> Self {
        self.main = Some(location.into());
        self
    }

    /// The locator's name, used in log entries.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Locator for StaticLocator {
    fn access_controller_locations(&self) -> Vec<Location> {
        self.access.clone()
    }

    fn main_controller_location(&self) -> Result<Location, NoControllerFound> {
        self.main.clone().ok_or_else(|| {
            NoControllerFound::new(format!("locator `{}` has no main controller", self.name))
        })
    }
}

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records `"{label}:{locator name}"` for every pass it sees.
#[derive(Debug, Clone)]
pub struct RecordingHook {
    label: String,
    log: CallLog,
}

impl RecordingHook {
    /// Create a hook writing to `log`.
    pub fn new(label: impl Into<String>, log: CallLog) -> Self {
        Self {
            label: label.into(),
            log,
        }
    }
}

impl<C: Context> Hook<StaticLocator, C> for RecordingHook {
    async fn on_dispatch(&self, locator: &StaticLocator, _context: &C) -> Result<(), BoxError> {
        self.log.push(format!("{}:{}", self.label, locator.name()));
        Ok(())
    }
}

// ============================================================================
// Scripted Controller
// ============================================================================

#[derive(Debug, Clone)]
enum Script {
    Continue,
    Redirect(StaticLocator),
    Fail(String),
}

/// A controller that records its label and answers with a fixed outcome.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    label: String,
    log: CallLog,
    script: Script,
}

impl ScriptedController {
    /// A controller that lets the dispatch continue.
    pub fn approving(label: impl Into<String>, log: CallLog) -> Self {
        Self {
            label: label.into(),
            log,
            script: Script::Continue,
        }
    }

    /// A controller that redirects to `target` every time it is called.
    pub fn redirecting(label: impl Into<String>, log: CallLog, target: StaticLocator) -> Self {
        Self {
            label: label.into(),
            log,
            script: Script::Redirect(target),
        }
    }

    /// A controller that fails with `message`.
    pub fn failing(label: impl Into<String>, log: CallLog, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            log,
            script: Script::Fail(message.into()),
        }
    }
}

impl<C: Context> Controller<StaticLocator, C> for ScriptedController {
    async fn call(
        &self,
        _locator: &StaticLocator,
        _context: &C,
    ) -> Result<Outcome<StaticLocator>, BoxError> {
        self.log.push(self.label.clone());
        match &self.script {
            Script::Continue => Ok(Outcome::Continue),
            Script::Redirect(target) => Ok(Outcome::Redirect(target.clone())),
            Script::Fail(message) => Err(message.clone().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_log_is_shared() {
        let log = CallLog::new();
        let other = log.clone();
        log.push("a");
        other.push("b");
        assert_eq!(log.entries(), ["a", "b"]);
        log.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_static_locator_without_main_controller() {
        let locator = StaticLocator::new("orphan").guarded_by("auth");
        assert_eq!(locator.access_controller_locations().len(), 1);
        let err = locator.main_controller_location().unwrap_err();
        assert_eq!(err.reason(), "locator `orphan` has no main controller");
    }

    #[tokio::test]
    async fn test_scripted_controller_redirects() {
        let log = CallLog::new();
        let target = StaticLocator::new("login").serving("login");
        let controller = ScriptedController::redirecting("wall", log.clone(), target.clone());

        let outcome = controller
            .call(&StaticLocator::new("admin"), &())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Redirect(target));
        assert_eq!(log.entries(), ["wall"]);
    }

    #[tokio::test]
    async fn test_recording_hook_labels_locator() {
        let log = CallLog::new();
        let hook = RecordingHook::new("start", log.clone());
        hook.on_dispatch(&StaticLocator::new("home"), &()).await.unwrap();
        assert_eq!(log.entries(), ["start:home"]);
    }
}
