//! # gatehouse-core
//!
//! Core traits for the Gatehouse request-lifecycle dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! routers and controller crates that don't need the dispatcher itself.
//!
//! # Contracts
//!
//! ## [`Locator`]
//!
//! The output of routing. Names the access controllers guarding a request and
//! the main controller serving it, as [`Location`]s.
//!
//! ## [`ControllerLoader`]
//!
//! Turns a [`Location`] into an invocable [`DynController`], or fails with
//! [`InvalidControllerArtifact`].
//!
//! ## [`Controller`]
//!
//! Invoked with `(&locator, &context)`. Returns an [`Outcome`]: `Continue`, or
//! `Redirect(locator)` to restart the dispatch with another locator.
//!
//! ## [`Hook`]
//!
//! Observes a lifecycle [`Phase`] of every dispatch pass.
//!
//! # Error Types
//!
//! - [`GatehouseError`] - Top-level error type
//! - [`DispatchError`] - Dispatch-time errors
//! - [`ConfigError`] - Setup-time errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod controller;
mod error;
mod hook;
mod location;
mod locator;
mod outcome;
mod request;

// Re-exports
pub use controller::{Context, Controller, ControllerFuture, ControllerLoader, DynController};
pub use error::{
    BoxError, ConfigError, DispatchError, GatehouseError, InvalidControllerArtifact,
    NoControllerFound, Phase,
};
pub use hook::{DynHook, Hook, HookFuture};
pub use location::Location;
pub use locator::Locator;
pub use outcome::{IntoHookResult, IntoOutcome, Outcome};
pub use request::RequestInformation;
