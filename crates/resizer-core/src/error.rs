//! Routing error types
//!
//! Every variant here is raised while turning a notification into a
//! [`RoutingDecision`](crate::RoutingDecision), before any store access.

/// Errors produced while parsing an inbound event and its object key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Malformed object key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Could not determine the image type of '{0}'")]
    UnrecognizedType(String),

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}

impl RouteError {
    /// Machine-readable error code (e.g., "MALFORMED_KEY")
    pub fn error_code(&self) -> &'static str {
        match self {
            RouteError::MalformedEvent(_) => "MALFORMED_EVENT",
            RouteError::MalformedKey { .. } => "MALFORMED_KEY",
            RouteError::UnrecognizedType(_) => "UNRECOGNIZED_TYPE",
            RouteError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
        }
    }

    pub(crate) fn malformed_key(key: &str, reason: impl Into<String>) -> Self {
        RouteError::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
