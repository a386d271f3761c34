//! # gatehouse - Request-Lifecycle Dispatcher
//!
//! `gatehouse` runs a routed request through its lifecycle: access
//! controllers guard it, a main controller serves it, and lifecycle hooks
//! observe every pass. Any controller can reroute the request by returning a
//! new locator, which restarts the lifecycle from the top.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gatehouse::{ControllerRegistry, Dispatcher, Outcome, hooks::LoggingHook};
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register_fn("admin/guard", |route: &Route, session: &Session| {
//!     let logged_in = session.is_logged_in();
//!     async move { (!logged_in).then(Route::login) }
//! })?;
//! registry.register_fn("admin/index", |_: &Route, _: &Session| async {})?;
//!
//! let mut dispatcher = Dispatcher::new(route, session, registry);
//! dispatcher.register_start(LoggingHook::named("request"));
//! dispatcher.run().await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;

pub use dispatcher::Dispatcher;

pub use gatehouse_core::{
    // Error types
    BoxError,
    ConfigError,
    // Controller
    Context,
    Controller,
    ControllerFuture,
    ControllerLoader,
    DispatchError,
    DynController,
    // Hook
    DynHook,
    GatehouseError,
    Hook,
    HookFuture,
    IntoHookResult,
    IntoOutcome,
    InvalidControllerArtifact,
    // Locator
    Location,
    Locator,
    NoControllerFound,
    Outcome,
    Phase,
    RequestInformation,
};

pub use gatehouse_std::{
    registry::{ControllerRegistry, RegistryError},
    request::RequestInfo,
};

/// Configuration bootstrap.
pub mod config {
    pub use gatehouse_std::config::{
        CONFIG_FILE, Configuration, ConfigurationBuilder, DEFAULT_CONFIG_FILE_NAME, IS_PROD_ENV,
        Parameters, VENDOR_DIR,
    };
}

/// Standard hook implementations.
pub mod hooks {
    pub use gatehouse_std::hooks::LoggingHook;
}

/// Testing utilities.
pub mod testing {
    pub use gatehouse_std::testing::{CallLog, RecordingHook, ScriptedController, StaticLocator};
}

/// Prelude module - common imports for Gatehouse.
///
/// # Usage
///
/// ```rust,ignore
/// use gatehouse::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Controller, ControllerRegistry, DispatchError, Dispatcher, Hook, Location,
        Locator, NoControllerFound, Outcome,
    };
}
