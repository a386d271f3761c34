//! # Lifecycle Hooks
//!
//! Hooks are callbacks bound to a fixed point of every dispatch pass:
//!
//! - **start**: before any controller, including on every re-dispatch
//! - **between**: after the access controllers let the request through
//! - **end**: after a main controller that did not redirect
//!
//! Hooks observe; they cannot redirect. Returning an error aborts the dispatch.

use crate::{
    controller::Context,
    error::BoxError,
    locator::Locator,
    outcome::IntoHookResult,
};
use std::{future::Future, pin::Pin};

/// The boxed future returned by [`DynHook::on_dispatch_dyn`].
pub type HookFuture<'a> = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;

/// A callback invoked at one lifecycle point of each dispatch pass.
///
/// This trait uses native `async fn` for static dispatch.
/// For storage in a registry, use [`DynHook`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook<{L}, {C}>`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `on_dispatch`, or be a closure `Fn(&{L}, &{C}) -> impl Future`."
)]
pub trait Hook<L: Locator, C: Context>: Send + Sync + 'static {
    /// Called with the locator of the current pass.
    fn on_dispatch(
        &self,
        locator: &L,
        context: &C,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

impl<F, L, C, Fut, R> Hook<L, C> for F
where
    L: Locator,
    C: Context,
    F: Fn(&L, &C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoHookResult,
{
    fn on_dispatch(
        &self,
        locator: &L,
        context: &C,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let fut = (self)(locator, context);
        async move { fut.await.into_hook_result() }
    }
}

/// Dynamic object-safe version of [`Hook`].
pub trait DynHook<L, C>: Send + Sync + 'static {
    /// Called with the locator of the current pass (dynamic dispatch version).
    fn on_dispatch_dyn<'a>(&'a self, locator: &'a L, context: &'a C) -> HookFuture<'a>;
}

// Blanket implementation: Any type implementing Hook implements DynHook automatically.
impl<L: Locator, C: Context, T: Hook<L, C>> DynHook<L, C> for T {
    fn on_dispatch_dyn<'a>(&'a self, locator: &'a L, context: &'a C) -> HookFuture<'a> {
        Box::pin(self.on_dispatch(locator, context))
    }
}
