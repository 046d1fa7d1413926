use thiserror::Error;

/// Failures talking to the model backend.
///
/// These are never retried; the turn that hit one ends and the error is
/// shown to the user as that turn's reply.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    Auth(String),
    /// Errors returned by the backend
    #[error("Provider error: {0}")]
    Provider(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormat {
        message: String,
        raw_response: String,
    },
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err.to_string())
    }
}
