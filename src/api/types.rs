//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to send one user turn
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "userInput")]
    pub user_input: String,
}

/// Response for an accepted command
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub accepted: bool,
}

/// Payload of a `view` event on the event stream
#[derive(Debug, Serialize)]
pub struct ViewUpdate {
    /// Rendered transcript fragment
    pub html: String,
    pub accepting_input: bool,
    pub pending: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
