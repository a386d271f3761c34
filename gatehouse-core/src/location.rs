//! Controller locations.

use std::{borrow::Borrow, fmt, sync::Arc};

/// The key identifying one controller.
///
/// A locator hands out locations; a [`ControllerLoader`] turns them into
/// controllers. Cloning is cheap (reference counted).
///
/// [`ControllerLoader`]: crate::ControllerLoader
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location(Arc<str>);

impl Location {
    /// Create a location from any string-like value.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// The location key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(key: &str) -> Self {
        Self(Arc::from(key))
    }
}

impl From<String> for Location {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Location {
    fn borrow(&self) -> &str {
        &self.0
    }
}
