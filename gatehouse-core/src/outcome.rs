//! Controller outcomes.
//!
//! A controller either lets the dispatch go on ([`Outcome::Continue`]) or asks
//! for the request to be dispatched again from scratch with another locator
//! ([`Outcome::Redirect`]).

use crate::error::BoxError;

/// Result of invoking a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<L> {
    /// Keep going with the current pass.
    Continue,
    /// Abandon the current pass and dispatch this locator instead.
    Redirect(L),
}

impl<L> Outcome<L> {
    /// Returns `true` for [`Outcome::Redirect`].
    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect(_))
    }

    /// The redirect target, if any.
    pub fn into_redirect(self) -> Option<L> {
        match self {
            Outcome::Continue => None,
            Outcome::Redirect(locator) => Some(locator),
        }
    }
}

impl<L> Default for Outcome<L> {
    fn default() -> Self {
        Outcome::Continue
    }
}

impl<L> From<Option<L>> for Outcome<L> {
    fn from(redirect: Option<L>) -> Self {
        match redirect {
            Some(locator) => Outcome::Redirect(locator),
            None => Outcome::Continue,
        }
    }
}

/// Conversion of a controller's return value into an [`Outcome`].
///
/// # Default Implementations
///
/// - `()` → `Continue`
/// - `Option<L>` → `Some` redirects, `None` continues
/// - `Outcome<L>` → As is
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be turned into an `Outcome<{L}>`",
    label = "missing `IntoOutcome` implementation",
    note = "Controllers may return `()`, `Option<{L}>`, `Outcome<{L}>`, or a `Result` of those."
)]
pub trait IntoOutcome<L> {
    /// Convert into an outcome or an error.
    fn into_outcome(self) -> Result<Outcome<L>, BoxError>;
}

impl<L> IntoOutcome<L> for () {
    fn into_outcome(self) -> Result<Outcome<L>, BoxError> {
        Ok(Outcome::Continue)
    }
}

impl<L> IntoOutcome<L> for Outcome<L> {
    fn into_outcome(self) -> Result<Outcome<L>, BoxError> {
        Ok(self)
    }
}

impl<L> IntoOutcome<L> for Option<L> {
    fn into_outcome(self) -> Result<Outcome<L>, BoxError> {
        Ok(self.into())
    }
}

impl<L, T, E> IntoOutcome<L> for Result<T, E>
where
    T: IntoOutcome<L>,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<Outcome<L>, BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}

/// Conversion of a hook's return value into a hook result.
///
/// Implemented for `()` and for `Result<(), E>`.
pub trait IntoHookResult {
    /// Convert into success or an error.
    fn into_hook_result(self) -> Result<(), BoxError>;
}

impl IntoHookResult for () {
    fn into_hook_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> IntoHookResult for Result<(), E> {
    fn into_hook_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
