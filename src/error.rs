//! Request error types
//!
//! Every failure of a backend call collapses into `RequestError`. Panels
//! treat all variants the same way; the variants exist for logs.

use thiserror::Error;

/// Errors that can occur when talking to the risk backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The request never produced a response (connection refused, DNS, abort)
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not valid JSON or did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The backend answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },
}

impl RequestError {
    /// Short kind name for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Network(_) => "network",
            RequestError::Decode(_) => "decode",
            RequestError::Status { .. } => "status",
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Network(err.to_string())
        }
    }
}

/// Result type alias for backend calls
pub type RequestResult<T> = Result<T, RequestError>;
