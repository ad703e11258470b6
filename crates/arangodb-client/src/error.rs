//! Error types for the ArangoDB client
//!
//! Every failure surfaces as one [`Error`] variant, built with `thiserror`.
//! The blocking bridge returns the same values as the async API so callers
//! can branch on the variant regardless of which entry point they used.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// ArangoDB error number for "duplicate name" on graph/collection creation.
pub const ERROR_ARANGO_DUPLICATE_NAME: i64 = 1207;

/// ArangoDB error number for "graph not found".
pub const ERROR_GRAPH_NOT_FOUND: i64 = 1924;

/// Main error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The server rejected the supplied credentials (HTTP 401).
    #[error("The user '{username}' is not authorized")]
    Authentication {
        /// Username that was attempted
        username: String,
    },

    /// Connection-level failure (DNS, refused connection, broken pipe).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// The response body did not match the expected envelope or result shape.
    #[error("Failed to deserialize server response: {0}")]
    Deserialization(String),

    /// The server flagged an application-level error in the response envelope.
    #[error("Server error {error_num} (HTTP {code}): {message}")]
    Server {
        /// HTTP-style code reported by the server
        code: u16,
        /// ArangoDB error number (`errorNum`)
        error_num: i64,
        /// Error message reported by the server
        message: String,
    },

    /// The request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL provided or constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// The blocking bridge could not run the operation.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Returns the ArangoDB error number if this is a server error.
    pub fn error_num(&self) -> Option<i64> {
        match self {
            Error::Server { error_num, .. } => Some(*error_num),
            _ => None,
        }
    }

    /// True for server errors reporting a conflict (duplicate names, revision clashes).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::Server { code: 409, .. }
                | Error::Server {
                    error_num: ERROR_ARANGO_DUPLICATE_NAME,
                    ..
                }
        )
    }

    /// True for server errors reporting a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Server { code: 404, .. })
    }

    /// True if the server rejected the credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Option<Duration>) -> Self {
        match timeout {
            Some(limit) if err.is_timeout() => Error::Timeout(limit),
            _ => Error::Transport(err.to_string()),
        }
    }
}
