//! Plain value implementation of [`RequestInformation`].

use gatehouse_core::RequestInformation;
use serde::{Deserialize, Serialize};

/// Request information as resolved by a router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    request_type: String,
    #[serde(default)]
    real_args: Vec<String>,
    #[serde(default)]
    virtual_args: Vec<String>,
}

impl RequestInfo {
    /// Create request information for `request_type` with no arguments.
    pub fn new(request_type: impl Into<String>) -> Self {
        Self {
            request_type: request_type.into(),
            real_args: Vec::new(),
            virtual_args: Vec::new(),
        }
    }

    /// Set the arguments related to the controller path.
    pub fn with_real_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.real_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the arguments not related to the controller path.
    pub fn with_virtual_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.virtual_args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl RequestInformation for RequestInfo {
    fn request_type(&self) -> &str {
        &self.request_type
    }

    fn real_args(&self) -> &[String] {
        &self.real_args
    }

    fn virtual_args(&self) -> &[String] {
        &self.virtual_args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_access() {
        let info = RequestInfo::new("GET")
            .with_real_args(["blog", "post"])
            .with_virtual_args(["42"]);

        assert_eq!(info.request_type(), "GET");
        assert_eq!(info.count_real_args(), 2);
        assert_eq!(info.real_arg(1), Some("post"));
        assert_eq!(info.real_arg(2), None);
        assert_eq!(info.count_virtual_args(), 1);
        assert_eq!(info.virtual_arg(0), Some("42"));
    }

    #[test]
    fn test_deserialize_without_args() {
        let info: RequestInfo = serde_json::from_str(r#"{ "request_type": "CONSOLE" }"#).unwrap();
        assert_eq!(info, RequestInfo::new("CONSOLE"));
    }
}
