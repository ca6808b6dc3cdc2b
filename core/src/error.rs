//! Error types for the restaurant API client.
//!
//! # Design
//! Two failure families reach callers: network errors (the server answered
//! outside `[200,300)`, or the request never completed) and decode errors.
//! The UI layer collapses both into one message, but the variants keep the
//! status and body around for logs.

use thiserror::Error;

/// Errors returned by `MunchiesClient` parse methods, transports and fetchers.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server returned a status outside `[200,300)`.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request could not be completed (DNS, connect, TLS, body read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("decoding failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for failures that happened on the wire rather than in decoding.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::HttpStatus { .. } | ApiError::Transport(_))
    }

    /// The HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
