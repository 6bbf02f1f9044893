//! Validation errors for user-entered target URLs.

use thiserror::Error;

/// Local validation failures. No request is sent when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    Empty,

    #[error("Please enter a valid URL (e.g. https://example.com): {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme '{0}': use http or https")]
    UnsupportedScheme(String),

    #[error("URL must include a host name")]
    MissingHost,
}
