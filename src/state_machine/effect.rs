//! Effects produced by state transitions

use crate::backend::BackendError;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the current transcript from the agent service
    FetchHistory,

    /// Exchange one user turn with the agent service
    SendTurn { input: String },

    /// Ask the agent service to clear the conversation
    ClearHistory,

    /// Record a failed remote call that the user does not see
    LogFailure {
        operation: &'static str,
        error: BackendError,
    },

    /// Publish a fresh view snapshot to connected clients
    PublishView,
}

impl Effect {
    /// Whether this effect starts a remote call
    pub fn is_remote_call(&self) -> bool {
        matches!(
            self,
            Effect::FetchHistory | Effect::SendTurn { .. } | Effect::ClearHistory
        )
    }
}
