//! # Client Error Types
//!
//! Unified error handling for the recordings gateway. Every failure, whether it
//! comes from caller input, the transport, or the remote API, ends up as a
//! [`ClientError`] before it leaves this crate.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Machine-readable classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Timeout,
    Network,
    HttpStatus,
    MalformedResponse,
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Timeout => write!(f, "timeout"),
            Self::Network => write!(f, "network"),
            Self::HttpStatus => write!(f, "http_status"),
            Self::MalformedResponse => write!(f, "malformed_response"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

/// Error types for gateway operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Caller input rejected before any request was issued
    #[error("{0}")]
    Validation(String),

    /// Every attempt hit the per-attempt deadline
    #[error(
        "Request timed out after {} seconds. The API server may be slow or unreachable.",
        .timeout.as_secs_f64()
    )]
    Timeout { timeout: Duration },

    /// Connection-level failure
    #[error("Failed to connect to API: {0}")]
    Network(String),

    /// Non-2xx response from the API
    #[error(
        "API returned error status {status}{}",
        .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
    )]
    HttpStatus { status: u16, detail: Option<String> },

    /// 2xx response whose body is not valid JSON
    #[error("API returned invalid JSON response")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an HTTP status error, with optional detail from the response body
    pub fn http_status(status: u16, detail: Option<String>) -> Self {
        Self::HttpStatus { status, detail }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Timeout { .. } => ErrorKind::Timeout,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::HttpStatus { .. } => ErrorKind::HttpStatus,
            ClientError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            ClientError::Config(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status code, when the API answered with one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if error is transient (worth retrying)
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Timeout { .. } | ClientError::Network(_))
    }
}
