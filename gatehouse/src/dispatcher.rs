//! The request-lifecycle dispatcher.
//!
//! A dispatch pass for a locator runs, strictly in this order:
//!
//! 1. every **start** hook
//! 2. every access controller named by the locator
//! 3. every **between** hook
//! 4. the main controller
//! 5. every **end** hook
//!
//! A controller that returns [`Outcome::Redirect`] ends its pass on the spot
//! (nothing later in that pass runs) and a new pass starts for the returned
//! locator, beginning again with the start hooks.

use futures::future::BoxFuture;
use gatehouse_core::{
    Context, ControllerLoader, DispatchError, DynHook, Hook, Location, Locator, Outcome, Phase,
};
use gatehouse_std::registry::ControllerRegistry;
use std::fmt;
use tracing::Instrument;

/// Starts and controls the lifecycle of a request.
///
/// Build one dispatcher per request: hand it the locator the router produced,
/// the execution context and a [`ControllerLoader`], register hooks, then
/// await [`run`](Self::run).
///
/// # Re-dispatch
///
/// There is no limit on how often controllers may redirect. A chain of
/// locators that redirects back onto itself never terminates; routers and
/// controllers must not build such cycles, or the dispatcher must be given a
/// bound with [`with_redirect_limit`](Self::with_redirect_limit).
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = ControllerRegistry::new();
/// registry.register_fn("auth", |req: &Route, session: &Session| { ... })?;
/// registry.register_fn("home", |req: &Route, session: &Session| { ... })?;
///
/// let mut dispatcher = Dispatcher::new(route, session, registry);
/// dispatcher.register_start(LoggingHook::named("request"));
/// dispatcher.run().await?;
/// ```
pub struct Dispatcher<L, C, R = ControllerRegistry<L, C>> {
    locator: L,
    context: C,
    loader: R,
    start: Vec<Box<dyn DynHook<L, C>>>,
    between: Vec<Box<dyn DynHook<L, C>>>,
    end: Vec<Box<dyn DynHook<L, C>>>,
    redirect_limit: Option<usize>,
}

impl<L, C, R> Dispatcher<L, C, R>
where
    L: Locator,
    C: Context,
    R: ControllerLoader<L, C>,
{
    /// Create a dispatcher for `locator`.
    pub fn new(locator: L, context: C, loader: R) -> Self {
        Self {
            locator,
            context,
            loader,
            start: Vec::new(),
            between: Vec::new(),
            end: Vec::new(),
            redirect_limit: None,
        }
    }

    /// Fail with [`DispatchError::RedirectLimitExceeded`] once more than
    /// `limit` redirects happen within one [`run`](Self::run).
    pub fn with_redirect_limit(mut self, limit: usize) -> Self {
        self.redirect_limit = Some(limit);
        self
    }

    /// Register a hook to the beginning of every pass.
    pub fn register_start<H: Hook<L, C>>(&mut self, hook: H) -> &mut Self {
        self.start.push(Box::new(hook));
        self
    }

    /// Register a hook after the access controllers but before the main
    /// controller.
    pub fn register_between<H: Hook<L, C>>(&mut self, hook: H) -> &mut Self {
        self.between.push(Box::new(hook));
        self
    }

    /// Register a hook to the end of every pass that was not redirected.
    pub fn register_end<H: Hook<L, C>>(&mut self, hook: H) -> &mut Self {
        self.end.push(Box::new(hook));
        self
    }

    /// Number of hooks registered for `phase`.
    pub fn hook_count(&self, phase: Phase) -> usize {
        self.hooks(phase).len()
    }

    /// The locator the dispatch starts with.
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// The execution context handed to hooks and controllers.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// The controller loader.
    pub fn loader(&self) -> &R {
        &self.loader
    }

    /// Starts the dispatching process.
    ///
    /// Every call performs a complete dispatch of the initial locator.
    ///
    /// # Errors
    ///
    /// Any [`DispatchError`] aborts the dispatch immediately and is returned
    /// unchanged. Nothing is retried.
    pub async fn run(&self) -> Result<(), DispatchError> {
        self.dispatch(&self.locator, 0).await
    }

    fn dispatch<'a>(
        &'a self,
        locator: &'a L,
        redirects: usize,
    ) -> BoxFuture<'a, Result<(), DispatchError>> {
        let span = tracing::debug_span!("dispatch_pass", redirects);
        Box::pin(
            async move {
                self.run_hooks(Phase::Start, locator).await?;

                for location in locator.access_controller_locations() {
                    if let Outcome::Redirect(next) =
                        self.invoke("access", &location, locator).await?
                    {
                        let redirects = self.count_redirect(&location, redirects)?;
                        return self.dispatch(&next, redirects).await;
                    }
                }

                // Resolved before the between hooks so a locator without a
                // main controller fails the pass before they run.
                let location = locator.main_controller_location()?;

                self.run_hooks(Phase::Between, locator).await?;

                if let Outcome::Redirect(next) = self.invoke("main", &location, locator).await? {
                    let redirects = self.count_redirect(&location, redirects)?;
                    return self.dispatch(&next, redirects).await;
                }

                self.run_hooks(Phase::End, locator).await
            }
            .instrument(span),
        )
    }

    async fn invoke(
        &self,
        role: &'static str,
        location: &Location,
        locator: &L,
    ) -> Result<Outcome<L>, DispatchError> {
        let controller = self.loader.load(location)?;
        tracing::debug!(role, controller = %location, "invoking controller");
        controller
            .call_dyn(locator, &self.context)
            .await
            .map_err(|source| DispatchError::Controller {
                location: location.clone(),
                source,
            })
    }

    fn count_redirect(&self, from: &Location, redirects: usize) -> Result<usize, DispatchError> {
        let redirects = redirects + 1;
        if let Some(limit) = self.redirect_limit.filter(|limit| redirects > *limit) {
            tracing::warn!(controller = %from, limit, "redirect limit exceeded");
            return Err(DispatchError::RedirectLimitExceeded { limit });
        }
        tracing::info!(controller = %from, redirects, "controller requested re-dispatch");
        Ok(redirects)
    }

    async fn run_hooks(&self, phase: Phase, locator: &L) -> Result<(), DispatchError> {
        for hook in self.hooks(phase) {
            hook.on_dispatch_dyn(locator, &self.context)
                .await
                .map_err(|source| DispatchError::Hook { phase, source })?;
        }
        Ok(())
    }

    fn hooks(&self, phase: Phase) -> &[Box<dyn DynHook<L, C>>] {
        match phase {
            Phase::Start => &self.start,
            Phase::Between => &self.between,
            Phase::End => &self.end,
        }
    }
}

impl<L: fmt::Debug, C, R> fmt::Debug for Dispatcher<L, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("locator", &self.locator)
            .field("start_hooks", &self.start.len())
            .field("between_hooks", &self.between.len())
            .field("end_hooks", &self.end.len())
            .field("redirect_limit", &self.redirect_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_std::testing::{CallLog, RecordingHook, ScriptedController, StaticLocator};

    fn build(
        locator: StaticLocator,
        registry: ControllerRegistry<StaticLocator, ()>,
    ) -> Dispatcher<StaticLocator, ()> {
        Dispatcher::new(locator, (), registry)
    }

    #[test]
    fn test_registration_does_not_invoke() {
        let log = CallLog::new();
        let mut dispatcher = build(StaticLocator::new("home"), ControllerRegistry::new());
        dispatcher
            .register_start(RecordingHook::new("start", log.clone()))
            .register_start(RecordingHook::new("start", log.clone()))
            .register_end(RecordingHook::new("end", log.clone()));

        assert_eq!(dispatcher.hook_count(Phase::Start), 2);
        assert_eq!(dispatcher.hook_count(Phase::Between), 0);
        assert_eq!(dispatcher.hook_count(Phase::End), 1);
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_accessors_expose_construction_parts() {
        let log = CallLog::new();
        let mut registry: ControllerRegistry<StaticLocator, ()> = ControllerRegistry::new();
        registry
            .register("home", ScriptedController::approving("home", log.clone()))
            .unwrap();

        let dispatcher = build(StaticLocator::new("front").serving("home"), registry);

        assert_eq!(dispatcher.locator().name(), "front");
        assert!(dispatcher.loader().contains("home"));
        assert_eq!(dispatcher.context(), &());

        dispatcher.run().await.unwrap();
        assert_eq!(log.entries(), vec!["home"]);
        assert_eq!(dispatcher.locator().name(), "front");
    }

    #[tokio::test]
    async fn test_unregistered_main_controller_is_invalid_artifact() {
        let log = CallLog::new();
        let mut dispatcher = build(
            StaticLocator::new("home").serving("missing"),
            ControllerRegistry::new(),
        );
        dispatcher.register_end(RecordingHook::new("end", log.clone()));

        let err = dispatcher.run().await.unwrap_err();
        match err {
            DispatchError::InvalidControllerArtifact(artifact) => {
                assert_eq!(artifact.location().as_str(), "missing");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_redirect_limit() {
        let log = CallLog::new();
        let looping = StaticLocator::new("loop").serving("loop");
        let mut registry: ControllerRegistry<StaticLocator, ()> = ControllerRegistry::new();
        registry
            .register(
                "loop",
                ScriptedController::redirecting("loop", log.clone(), looping.clone()),
            )
            .unwrap();

        let dispatcher = build(looping, registry).with_redirect_limit(3);
        let err = dispatcher.run().await.unwrap_err();

        assert!(matches!(err, DispatchError::RedirectLimitExceeded { limit: 3 }));
        assert_eq!(log.len(), 4);
    }

    #[tokio::test]
    async fn test_controller_error_carries_location() {
        let log = CallLog::new();
        let mut registry: ControllerRegistry<StaticLocator, ()> = ControllerRegistry::new();
        registry
            .register("home", ScriptedController::failing("home", log.clone(), "db down"))
            .unwrap();

        let err = build(StaticLocator::new("home").serving("home"), registry)
            .run()
            .await
            .unwrap_err();

        match err {
            DispatchError::Controller { location, source } => {
                assert_eq!(location.as_str(), "home");
                assert_eq!(source.to_string(), "db down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
