//! Error types for Gatehouse.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`GatehouseError`] - Top-level error type for all Gatehouse operations
//! - [`DispatchError`] - Errors raised while running a dispatch
//! - [`ConfigError`] - Errors raised while building the configuration
//! - [`NoControllerFound`] - A locator could not resolve a main controller
//! - [`InvalidControllerArtifact`] - A location did not yield an invocable controller

use crate::location::Location;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Gatehouse operations.
#[derive(Error, Debug)]
pub enum GatehouseError {
    /// An error occurred during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// The configuration could not be built.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// The lifecycle point a hook was registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before any controller of a pass.
    Start,
    /// After the access controllers, before the main controller.
    Between,
    /// After the main controller, when it did not redirect.
    End,
}

impl Phase {
    /// Lowercase name, used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Between => "between",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a dispatch.
///
/// The dispatcher recovers from none of these; each one is handed to the
/// caller of `run` as soon as it happens.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The locator could not resolve a main controller.
    #[error(transparent)]
    NoControllerFound(#[from] NoControllerFound),

    /// A location did not resolve to an invocable controller.
    #[error(transparent)]
    InvalidControllerArtifact(#[from] InvalidControllerArtifact),

    /// A controller returned an error.
    #[error("controller `{location}` failed")]
    Controller {
        /// Location of the failing controller.
        location: Location,
        /// The error returned by the controller.
        #[source]
        source: BoxError,
    },

    /// A lifecycle hook returned an error.
    #[error("{phase} hook failed")]
    Hook {
        /// Registry the failing hook belongs to.
        phase: Phase,
        /// The error returned by the hook.
        #[source]
        source: BoxError,
    },

    /// More consecutive redirects than the configured limit.
    #[error("redirect limit of {limit} exceeded")]
    RedirectLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// No main controller can be found or is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no controller found: {reason}")]
pub struct NoControllerFound {
    reason: String,
}

impl NoControllerFound {
    /// Create a new error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why no controller could be resolved.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A location was wired to something that cannot be invoked as a controller.
///
/// This is a programming error in the application wiring, never a runtime
/// condition worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid controller artifact at `{location}`: {reason}")]
pub struct InvalidControllerArtifact {
    location: Location,
    reason: String,
}

impl InvalidControllerArtifact {
    /// Create a new error for `location`.
    pub fn new(location: Location, reason: impl Into<String>) -> Self {
        Self {
            location,
            reason: reason.into(),
        }
    }

    /// The location that failed to load.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Why the location could not be loaded.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors that can occur while building the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration is missing, malformed, or was never bootstrapped.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Human readable description.
        message: String,
        /// Underlying I/O or parse error, if any.
        #[source]
        source: Option<BoxError>,
    },
}

impl ConfigError {
    /// An invalid configuration without an underlying cause.
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration {
            message: message.into(),
            source: None,
        }
    }

    /// An invalid configuration caused by `source`.
    pub fn invalid_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ConfigError::InvalidConfiguration {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
