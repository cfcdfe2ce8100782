//! Wire types for the agent service

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTurnRequest {
    #[serde(rename = "userInput")]
    pub user_input: String,
}

impl SubmitTurnRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
        }
    }
}
