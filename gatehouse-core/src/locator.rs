//! # Locator
//!
//! A locator is the result of routing: it knows which access controllers guard
//! a request and which main controller serves it. The dispatcher only ever asks
//! these two questions; how the answers are derived (URL matching, console
//! arguments, ...) is the router's business.
//!
//! Locators are immutable. A controller that wants the request to be served
//! elsewhere returns a *new* locator instead of changing the current one.

use crate::{error::NoControllerFound, location::Location};
use std::sync::Arc;

/// Resolves a request to controller locations.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Locator`",
    label = "missing `Locator` implementation",
    note = "Locators must expose `access_controller_locations` and `main_controller_location`."
)]
pub trait Locator: Send + Sync + 'static {
    /// Locations of the access controllers in charge of the request, in
    /// invocation order. Empty if the request is unguarded.
    fn access_controller_locations(&self) -> Vec<Location>;

    /// Location of the main controller in charge of the request.
    ///
    /// # Errors
    ///
    /// Returns [`NoControllerFound`] if no controller is available.
    fn main_controller_location(&self) -> Result<Location, NoControllerFound>;
}

impl<T: Locator + ?Sized> Locator for Box<T> {
    fn access_controller_locations(&self) -> Vec<Location> {
        (**self).access_controller_locations()
    }

    fn main_controller_location(&self) -> Result<Location, NoControllerFound> {
        (**self).main_controller_location()
    }
}

impl<T: Locator + ?Sized> Locator for Arc<T> {
    fn access_controller_locations(&self) -> Vec<Location> {
        (**self).access_controller_locations()
    }

    fn main_controller_location(&self) -> Result<Location, NoControllerFound> {
        (**self).main_controller_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Guarded;

    impl Locator for Guarded {
        fn access_controller_locations(&self) -> Vec<Location> {
            vec!["auth".into(), "csrf".into()]
        }

        fn main_controller_location(&self) -> Result<Location, NoControllerFound> {
            Ok("home".into())
        }
    }

    #[test]
    fn test_boxed_dyn_locator_delegates() {
        let locator: Box<dyn Locator> = Box::new(Guarded);
        assert_eq!(
            locator.access_controller_locations(),
            vec![Location::from("auth"), Location::from("csrf")]
        );
        assert_eq!(locator.main_controller_location().unwrap().as_str(), "home");
    }
}
