//! Conversation data model
//!
//! The transcript is replaced wholesale after every completed server
//! interaction. Nothing in the client appends to it locally.

use serde::{Deserialize, Serialize};

/// Opening prompt shown after a successful reset
pub const GREETING: &str =
    "First, what's your preferred tone of voice (e.g., formal, casual, enthusiastic)?";

/// Shown when the startup history fetch fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to connect to the chat server.";

/// Shown when a submission fails for any reason
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Agent,
}

impl Author {
    pub fn as_str(self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Agent => "agent",
        }
    }
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub author: Author,
    pub message: String,
}

impl Turn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            message: message.into(),
        }
    }

    pub fn agent(message: impl Into<String>) -> Self {
        Self {
            author: Author::Agent,
            message: message.into(),
        }
    }
}

/// Ordered turns plus the transient error flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    turns: Vec<Turn>,
    error: Option<String>,
}

impl Transcript {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Replace every turn with the sequence the server returned
    pub fn replace_turns(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    /// Replace the turns with the single opening prompt
    pub fn reset_to_greeting(&mut self) {
        self.turns = vec![Turn::agent(GREETING)];
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
