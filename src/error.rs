//! Client error types
//!
//! Defines all errors that can occur while talking to the tracker API
//! or touching local storage.

use thiserror::Error;

/// Errors that can occur in the client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// No response was received (connection refused, DNS, CORS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The server answered with a non-success status
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// A success response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// An authenticated call was attempted without a stored token
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The key-value store rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// A newer request of the same kind (or a logout) made this result stale
    #[error("Superseded by a newer request")]
    Superseded,
}

impl ClientError {
    /// Whether this error means the session is no longer usable
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ClientError::Api { status, .. } => *status == 401 || *status == 403,
            ClientError::NotAuthenticated => true,
            _ => false,
        }
    }

    /// Whether no server response was involved
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Timeout)
    }

    /// Text to show the user.
    ///
    /// Transport failures map to `network`, server errors carry their own
    /// message when the body had one, anything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str, network: &str) -> String {
        match self {
            ClientError::Network(_) | ClientError::Timeout => network.to_string(),
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
