//! # gatehouse-std
//!
//! Standard implementations for the Gatehouse request-lifecycle dispatcher.
//!
//! This crate provides:
//! - **Controller loading**: [`registry::ControllerRegistry`]
//! - **Configuration bootstrap**: [`config::Configuration`], [`config::Parameters`]
//! - **Request information**: [`request::RequestInfo`]
//! - **Standard hooks**: [`hooks::LoggingHook`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use gatehouse_core;

// Modules
pub mod config;
pub mod hooks;
pub mod registry;
pub mod request;
pub mod testing;
