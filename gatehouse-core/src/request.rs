//! Request information handed from the router to the controllers.
//!
//! The dispatcher does not need any of this; it is the standard way for a
//! locator to tell controllers what was requested.

/// Information derived from the request.
///
/// *Real* arguments are the path segments that selected the controller;
/// *virtual* arguments are the remaining segments, left for the controller
/// to interpret.
pub trait RequestInformation {
    /// The request type (`GET`, `POST`, `CONSOLE`, ...). May differ from the
    /// transport-level method.
    fn request_type(&self) -> &str;

    /// Arguments related to the controller path.
    fn real_args(&self) -> &[String];

    /// Arguments not related to the controller path.
    fn virtual_args(&self) -> &[String];

    /// The real argument at `pos`, if any.
    fn real_arg(&self, pos: usize) -> Option<&str> {
        self.real_args().get(pos).map(String::as_str)
    }

    /// The virtual argument at `pos`, if any.
    fn virtual_arg(&self, pos: usize) -> Option<&str> {
        self.virtual_args().get(pos).map(String::as_str)
    }

    /// Number of real arguments.
    fn count_real_args(&self) -> usize {
        self.real_args().len()
    }

    /// Number of virtual arguments.
    fn count_virtual_args(&self) -> usize {
        self.virtual_args().len()
    }
}
