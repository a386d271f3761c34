//! Location-keyed controller registry.
//!
//! This is the default [`ControllerLoader`]: controllers are registered up
//! front under their [`Location`] and looked up by key at dispatch time.

use gatehouse_core::{
    Context, Controller, ControllerLoader, DynController, IntoOutcome, InvalidControllerArtifact,
    Location, Locator,
};
use std::{collections::HashMap, fmt, future::Future, sync::Arc};
use thiserror::Error;

/// Errors that can occur while registering controllers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A controller is already registered under this location.
    #[error("a controller is already registered at `{0}`")]
    DuplicateLocation(Location),
}

/// A registry of controllers backed by `HashMap`.
pub struct ControllerRegistry<L, C> {
    controllers: HashMap<Location, Arc<dyn DynController<L, C>>>,
    allow_overrides: bool,
}

impl<L, C> ControllerRegistry<L, C> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
            allow_overrides: false,
        }
    }

    /// Allow registering a location twice (later registrations win).
    pub fn allow_overrides(mut self) -> Self {
        self.allow_overrides = true;
        self
    }

    /// Register an already type-erased controller.
    pub fn register_dyn(
        &mut self,
        location: impl Into<Location>,
        controller: Arc<dyn DynController<L, C>>,
    ) -> Result<&mut Self, RegistryError> {
        let location = location.into();
        if !self.allow_overrides && self.controllers.contains_key(&location) {
            return Err(RegistryError::DuplicateLocation(location));
        }
        self.controllers.insert(location, controller);
        Ok(self)
    }

    /// Check if a controller is registered at `location`.
    pub fn contains(&self, location: &str) -> bool {
        self.controllers.contains_key(location)
    }

    /// Get the number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl<L: Locator, C: Context> ControllerRegistry<L, C> {
    /// Register a controller under `location`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateLocation`] if the location is taken and
    /// overrides are not allowed.
    pub fn register<T: Controller<L, C>>(
        &mut self,
        location: impl Into<Location>,
        controller: T,
    ) -> Result<&mut Self, RegistryError> {
        self.register_dyn(location, Arc::new(controller))
    }

    /// Register a closure as a controller.
    ///
    /// Same as [`register`](Self::register), but the closure's argument types
    /// are inferred.
    pub fn register_fn<F, Fut, R>(
        &mut self,
        location: impl Into<Location>,
        controller: F,
    ) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&L, &C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send,
        R: IntoOutcome<L>,
    {
        self.register(location, controller)
    }
}

impl<L, C> Default for ControllerRegistry<L, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, C> fmt::Debug for ControllerRegistry<L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locations: Vec<_> = self.controllers.keys().collect();
        locations.sort();
        f.debug_struct("ControllerRegistry")
            .field("locations", &locations)
            .field("allow_overrides", &self.allow_overrides)
            .finish()
    }
}

impl<L: Locator, C: Context> ControllerLoader<L, C> for ControllerRegistry<L, C> {
    fn load(
        &self,
        location: &Location,
    ) -> Result<Arc<dyn DynController<L, C>>, InvalidControllerArtifact> {
        self.controllers.get(location).cloned().ok_or_else(|| {
            InvalidControllerArtifact::new(location.clone(), "no controller registered")
        })
    }
}
