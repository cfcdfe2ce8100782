//! Agent service error types

use thiserror::Error;

/// Failure of a call to the remote agent service, with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Connectivity, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Server, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::MalformedResponse, message)
    }
}

/// Error classification
///
/// The user sees the same message for every kind; the kind only shows up in
/// logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// No response: connect failure, timeout, body read failure
    Connectivity,
    /// Non-success HTTP status
    Server,
    /// Body could not be read as a turn sequence
    MalformedResponse,
}

impl BackendErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Server => "server",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::connectivity(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            BackendError::connectivity(format!("Connection failed: {e}"))
        } else {
            BackendError::connectivity(format!("Request failed: {e}"))
        }
    }
}
