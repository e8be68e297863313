//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (transport-level)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Server answered 2xx but reported a logical failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True for the unified "fetch failed" condition: transport failures
    /// and non-2xx statuses. Read paths swallow these after logging.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
