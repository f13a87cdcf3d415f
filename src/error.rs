//! API Error Types
//!
//! This module defines the error taxonomy for requests made against the
//! EventHub service.
//!
//! # Error Categories
//!
//! - `Network` - transport-level failure, no response was received
//! - `Unauthorized` - HTTP 401, the session credential was rejected
//! - `Validation` - other 4xx responses carrying a server message
//! - `Server` - 5xx responses
//! - `Decode` - the response body could not be parsed
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

/// Errors surfaced by the HTTP client and endpoint surfaces
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure before any response arrived
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server rejected the request credential (HTTP 401)
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Client-side request problem (4xx other than 401)
    #[error("request rejected ({status}): {message}")]
    Validation {
        /// HTTP status code
        status: u16,
        /// Server-provided message when available
        message: String,
    },

    /// The server failed to process the request (5xx)
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server-provided message when available
        message: String,
    },

    /// The response body could not be decoded
    #[error("failed to decode response: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(status: u16, message: impl Into<String>) -> Self {
        Self::Validation {
            status,
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this error is an HTTP 401
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The server-provided message, when one exists.
    ///
    /// Transport and decode failures carry no server message; callers fall
    /// back to a generic message in that case.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => Some(message.as_str()),
            Self::Network(_) | Self::Decode { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}
