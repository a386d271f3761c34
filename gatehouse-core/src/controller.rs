//! # Controllers
//!
//! A controller is the unit of work bound to one [`Location`]. Access
//! controllers guard a request, the main controller serves it; both share the
//! same signature and both may redirect.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|locator: &MyLocator, ctx: &MyContext| async { ... }`
//! 2. **Struct implementation**: `impl Controller<MyLocator, MyContext> for LoginWall`
//!
//! Closures must not borrow the locator or the context in the returned future;
//! clone what the async block needs first.

use crate::{
    error::{BoxError, InvalidControllerArtifact},
    location::Location,
    locator::Locator,
    outcome::{IntoOutcome, Outcome},
};
use std::{future::Future, pin::Pin, sync::Arc};

/// Shared state threaded through every hook and controller of a dispatch.
///
/// The dispatcher never looks inside it. Any `Send + Sync + 'static` type
/// qualifies; wrap a container in an `Arc` to share it beyond the dispatch.
pub trait Context: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Context for T {}

/// The boxed future returned by [`DynController::call_dyn`].
pub type ControllerFuture<'a, L> =
    Pin<Box<dyn Future<Output = Result<Outcome<L>, BoxError>> + Send + 'a>>;

/// A unit of work invoked with the current locator and the execution context.
///
/// Returning [`Outcome::Redirect`] abandons the current dispatch pass and
/// starts a fresh one with the returned locator.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Controller` for `{L}`",
    label = "missing `Controller` implementation",
    note = "Controllers must implement `call(&self, &{L}, &{C})`, or be a closure `Fn(&{L}, &{C}) -> impl Future`."
)]
pub trait Controller<L: Locator, C: Context>: Send + Sync + 'static {
    /// Invoke the controller.
    fn call(
        &self,
        locator: &L,
        context: &C,
    ) -> impl Future<Output = Result<Outcome<L>, BoxError>> + Send;
}

impl<F, L, C, Fut, R> Controller<L, C> for F
where
    L: Locator,
    C: Context,
    F: Fn(&L, &C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoOutcome<L>,
{
    fn call(
        &self,
        locator: &L,
        context: &C,
    ) -> impl Future<Output = Result<Outcome<L>, BoxError>> + Send {
        let fut = (self)(locator, context);
        async move { fut.await.into_outcome() }
    }
}

/// Dynamic object-safe version of [`Controller`].
///
/// Use this trait when controllers of different types live in one collection.
pub trait DynController<L, C>: Send + Sync + 'static {
    /// Invoke the controller (dynamic dispatch version).
    fn call_dyn<'a>(&'a self, locator: &'a L, context: &'a C) -> ControllerFuture<'a, L>;
}

impl<L: Locator, C: Context, T: Controller<L, C>> DynController<L, C> for T {
    fn call_dyn<'a>(&'a self, locator: &'a L, context: &'a C) -> ControllerFuture<'a, L> {
        Box::pin(self.call(locator, context))
    }
}

/// Turns a [`Location`] into an invocable controller.
///
/// # Errors
///
/// `load` fails with [`InvalidControllerArtifact`] when nothing invocable is
/// wired to the location. The dispatcher treats that as fatal.
pub trait ControllerLoader<L: Locator, C: Context>: Send + Sync {
    /// Load the controller at `location`.
    fn load(
        &self,
        location: &Location,
    ) -> Result<Arc<dyn DynController<L, C>>, InvalidControllerArtifact>;
}

impl<L: Locator, C: Context, T: ControllerLoader<L, C> + ?Sized> ControllerLoader<L, C>
    for Arc<T>
{
    fn load(
        &self,
        location: &Location,
    ) -> Result<Arc<dyn DynController<L, C>>, InvalidControllerArtifact> {
        (**self).load(location)
    }
}
